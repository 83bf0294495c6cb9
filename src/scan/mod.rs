//! Scan session - the lifecycle wrapper around capture-device acquisition
//! and continuous decode attempts.

/// Decoder seam
pub mod decode;
/// Capture-device seam: constraints, frames, source/stream traits
pub mod device;
/// The session state machine
pub mod session;

pub use decode::Decoder;
pub use device::{CaptureConstraints, Facing, Frame, FrameSource, FrameStream};
pub use session::{ScanSession, SessionState, StopHandle};
