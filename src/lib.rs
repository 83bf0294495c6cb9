//! `BarcodeBuddy` - an inventory/barcode tool.
//!
//! This crate provides a product registry with synthetic 12-digit barcode
//! assignment, lookup by scan or manual entry, and interchangeable storage
//! backends (a local key-value file, a per-user database collection, or an
//! in-memory store), driven by a line-oriented console front-end.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Configuration management for storage selection and scanner hints
pub mod config;
/// Console front-end - the thin line-oriented view controller
pub mod console;
/// Core business logic - code generation, registry, and lookup
pub mod core;
/// SeaORM entity definitions for the remote backend's tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Barcode rendering capability and the console's text-label renderer
pub mod render;
/// Scan session - device acquisition, decode attempts, match lifecycle
pub mod scan;
/// Storage backend capability and its three strategies
pub mod store;

#[cfg(test)]
pub mod test_utils;
