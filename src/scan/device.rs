//! Capture-device capability: acquisition constraints, frames, and the
//! source/stream seam the session drives.

use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which way the capture device should face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// The environment-facing (rear) device, preferred for scanning
    #[default]
    Environment,
    /// The user-facing (front) device
    User,
}

/// Acquisition hints passed to the capture capability. Resolution values are
/// ideals, not requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConstraints {
    /// Preferred device facing
    pub facing: Facing,
    /// Ideal frame width in pixels
    pub width: u32,
    /// Ideal frame height in pixels
    pub height: u32,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            facing: Facing::Environment,
            width: 640,
            height: 480,
        }
    }
}

/// One captured frame, opaque to the session; only the decoder interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw frame bytes in whatever encoding the source produces
    pub bytes: Vec<u8>,
}

impl Frame {
    /// Wraps raw bytes as a frame.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

/// A capture device that can be acquired into a live frame stream.
#[async_trait]
pub trait FrameSource {
    /// Requests a live stream honoring `constraints`.
    ///
    /// # Errors
    /// Returns `Device` with the appropriate subtype (permission denied,
    /// not found, not supported) when acquisition fails.
    async fn acquire(&self, constraints: &CaptureConstraints) -> Result<Box<dyn FrameStream + Send>>;
}

/// A live capture stream. At most one exists per session; the session
/// releases it on stop, after a match, and on drop.
#[async_trait]
pub trait FrameStream {
    /// Pulls the next frame; `Ok(None)` means the stream has ended (device
    /// went away or the host tore it down).
    async fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Releases the underlying device. Idempotent.
    fn release(&mut self);
}
