//! Core business logic - framework-agnostic code generation, registry, and
//! lookup operations.

/// Barcode identifier generation
pub mod code;
/// Found/not-found resolution shared by scan and manual entry
pub mod lookup;
/// The product registry and its mutation/query operations
pub mod registry;
