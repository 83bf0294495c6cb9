//! The scan session state machine.
//!
//! A session moves `Idle -> Acquiring -> Active -> Stopped`. While active it
//! pulls frames and attempts one decode per frame; the first decoded value,
//! matched or not, ends the session and releases the device. A shared stop
//! flag is checked before every decode attempt so the host can end the loop
//! at the next frame boundary (navigation away, page hidden, explicit stop).

use crate::{
    core::{
        lookup::{self, LookupOutcome},
        registry::Registry,
    },
    errors::Result,
    scan::{
        decode::Decoder,
        device::{CaptureConstraints, FrameSource, FrameStream},
    },
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument, warn};

/// Lifecycle states of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No device held; nothing in flight
    #[default]
    Idle,
    /// Device acquisition requested, not yet granted
    Acquiring,
    /// Device held, decode attempts running
    Active,
    /// Device released after an active run
    Stopped,
}

/// Shared cancellation flag for an active session. Cloneable; any holder can
/// request a stop, which the run loop honors before its next decode attempt.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Asks the session to stop at the next frame boundary.
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// One camera-scan lifecycle: acquire, decode until a value or a stop,
/// release.
#[derive(Default)]
pub struct ScanSession {
    state: SessionState,
    stream: Option<Box<dyn FrameStream + Send>>,
    stop: StopHandle,
}

impl ScanSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// A handle that can stop this session's run loop from elsewhere.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Acquires a frame stream and activates the session. A no-op while
    /// already `Acquiring` or `Active` (at most one outstanding
    /// acquisition).
    ///
    /// # Errors
    /// Propagates the device error on acquisition failure, returning the
    /// session to `Idle`.
    #[instrument(skip(self, source, constraints))]
    pub async fn start(
        &mut self,
        source: &dyn FrameSource,
        constraints: &CaptureConstraints,
    ) -> Result<()> {
        if matches!(self.state, SessionState::Acquiring | SessionState::Active) {
            debug!("start requested while already {:?}; ignoring", self.state);
            return Ok(());
        }

        self.state = SessionState::Acquiring;
        self.stop.reset();
        match source.acquire(constraints).await {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = SessionState::Active;
                info!("capture device acquired; scanning");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    /// Runs decode attempts until the first decoded value, a stop request,
    /// or the end of the stream. Returns the lookup outcome of the decoded
    /// value, or `None` if the session stopped without one. The device is
    /// released before this returns, whatever the path.
    ///
    /// # Errors
    /// Propagates frame-stream read failures; per-frame decode errors are
    /// logged and scanning continues.
    #[instrument(skip_all)]
    pub async fn run(
        &mut self,
        decoder: &mut dyn Decoder,
        registry: &Registry,
    ) -> Result<Option<LookupOutcome>> {
        if self.state != SessionState::Active {
            return Ok(None);
        }

        loop {
            if self.stop.is_stop_requested() {
                debug!("stop requested; ending scan");
                decoder.reset();
                self.stop();
                return Ok(None);
            }

            let Some(stream) = self.stream.as_mut() else {
                self.stop();
                return Ok(None);
            };
            let frame = match stream.next_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    debug!("frame stream ended");
                    decoder.reset();
                    self.stop();
                    return Ok(None);
                }
                Err(e) => {
                    decoder.reset();
                    self.stop();
                    return Err(e);
                }
            };

            match decoder.decode(&frame) {
                Ok(Some(text)) => {
                    info!("decoded barcode value");
                    let outcome = lookup::resolve(registry, &text);
                    decoder.reset();
                    self.stop();
                    return Ok(Some(outcome));
                }
                // No code in this frame; keep scanning
                Ok(None) => {}
                Err(e) => {
                    warn!("decode attempt failed: {e}");
                }
            }
        }
    }

    /// Releases the frame stream and marks the session stopped. Idempotent;
    /// a no-op while `Idle`.
    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
        match self.state {
            SessionState::Idle => {}
            _ => self.state = SessionState::Stopped,
        }
    }
}

impl Drop for ScanSession {
    // Last-resort release on host teardown
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
    }
}
