//! Keyboard-wedge capture capability for the console front-end.
//!
//! A wedge scanner types its reading as a line of text, so the console's
//! input stream doubles as the capture device: each line is one frame, a
//! blank line is a frame with no code in it, and `stop` or end of input ends
//! the stream the same way a released camera would. The input handle is
//! shared with the command loop, which is why it sits behind a lock.

use crate::{
    errors::Result,
    scan::{CaptureConstraints, Decoder, Frame, FrameSource, FrameStream},
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::debug;

/// Shared console input handle, usable by the command loop and by at most
/// one wedge stream at a time.
pub type SharedInput = Arc<Mutex<Lines<BufReader<Stdin>>>>;

/// Wraps standard input as a shared line stream.
#[must_use]
pub fn shared_stdin() -> SharedInput {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

/// Capture source over the shared console input.
pub struct WedgeSource {
    input: SharedInput,
}

impl WedgeSource {
    /// Creates a source reading frames from `input`.
    pub fn new(input: SharedInput) -> Self {
        Self { input }
    }
}

#[async_trait]
impl FrameSource for WedgeSource {
    async fn acquire(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Box<dyn FrameStream + Send>> {
        debug!(?constraints, "acquiring wedge stream");
        Ok(Box::new(WedgeStream {
            input: Arc::clone(&self.input),
            released: false,
        }))
    }
}

struct WedgeStream {
    input: SharedInput,
    released: bool,
}

#[async_trait]
impl FrameStream for WedgeStream {
    async fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.released {
            return Ok(None);
        }
        let line = self.input.lock().await.next_line().await?;
        match line {
            // `stop` and end of input both end the stream, like a camera
            // going away
            None => Ok(None),
            Some(text) if text.trim() == "stop" => Ok(None),
            Some(text) => Ok(Some(Frame::new(text.into_bytes()))),
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Decoder for wedge frames: the trimmed line text is the decoded value, a
/// blank line carries no code.
#[derive(Debug, Default)]
pub struct WedgeDecoder;

impl WedgeDecoder {
    /// Creates the decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Decoder for WedgeDecoder {
    fn decode(&mut self, frame: &Frame) -> Result<Option<String>> {
        let text = String::from_utf8_lossy(&frame.bytes);
        let text = text.trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }

    fn reset(&mut self) {}
}
