//! Decode capability: turns frames into code text.

use crate::errors::Result;
use crate::scan::device::Frame;

/// Barcode decoder seam. Symbol decoding itself lives behind it.
pub trait Decoder {
    /// Attempts one decode. `Ok(None)` means no code is present in this
    /// frame, which is the common case and not an error.
    ///
    /// # Errors
    /// Returns `Decode` for any other per-frame failure; the session logs
    /// these and keeps scanning.
    fn decode(&mut self, frame: &Frame) -> Result<Option<String>>;

    /// Halts and clears any in-flight decoder state.
    fn reset(&mut self);
}
