//! Code resolution shared by the scan path and manual entry.
//!
//! Both paths end in the same registry lookup and surface the same
//! found/not-found outcome; manual entry additionally trims and validates
//! its input before looking anything up.

use crate::{
    core::registry::Registry,
    errors::{Error, Result},
    store::Product,
};

/// The result of resolving a scanned or typed code against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A product with exactly this code exists.
    Found(Product),
    /// No product matched; carries the raw scanned/typed text for display.
    NotFound {
        /// The text as scanned or typed, unmodified.
        raw: String,
    },
}

/// Resolves `text` against the registry exactly as given. Used by the scan
/// path, where the decoder's output is matched byte-for-byte.
#[must_use]
pub fn resolve(registry: &Registry, text: &str) -> LookupOutcome {
    match registry.find_by_code(text) {
        Some(product) => LookupOutcome::Found(product.clone()),
        None => LookupOutcome::NotFound {
            raw: text.to_string(),
        },
    }
}

/// Manual-entry lookup: trims the input, rejects empty input, then performs
/// the same resolution as the scan path.
///
/// # Errors
/// Returns `Validation` if the input trims to empty.
pub fn resolve_manual(registry: &Registry, input: &str) -> Result<LookupOutcome> {
    let text = input.trim();
    if text.is_empty() {
        return Err(Error::validation("Please enter a barcode number"));
    }
    Ok(resolve(registry, text))
}
