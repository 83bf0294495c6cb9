//! Shared test utilities for `BarcodeBuddy`.
//!
//! Provides registry setups over the in-memory store, a fault-injecting
//! store wrapper, scripted capture/decode fakes for the scan session suite,
//! and the in-memory database setup for the remote store tests.

use crate::{
    core::registry::Registry,
    errors::{DeviceError, Error, Result},
    scan::{CaptureConstraints, Decoder, Frame, FrameSource, FrameStream},
    store::{MemoryStore, ProductDraft, ProductStore},
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with the product table created.
/// This is the standard setup for remote-store integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a registry over a fresh in-memory store.
pub fn setup_registry() -> Registry {
    Registry::new(Box::new(MemoryStore::new()))
}

/// Creates a registry over a [`FlakyStore`], returning a handle for
/// injecting faults after setup.
pub fn setup_registry_with_flaky_store() -> (Registry, FlakyStore) {
    let flaky = FlakyStore::default();
    let registry = Registry::new(Box::new(flaky.clone()));
    (registry, flaky)
}

/// Store wrapper that fails on demand: specific deletions, or the next load.
/// Clones share state, so a clone kept outside the registry configures the
/// one boxed inside it.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: Arc<MemoryStore>,
    fail_delete_ids: Arc<Mutex<HashSet<String>>>,
    fail_next_load: Arc<AtomicBool>,
}

impl FlakyStore {
    /// Makes every deletion of `id` fail.
    pub fn fail_delete_of(&self, id: &str) {
        self.fail_delete_ids
            .lock()
            .unwrap()
            .insert(id.to_string());
    }

    /// Makes the next load fail; later loads succeed again.
    pub fn fail_next_load(&self) {
        self.fail_next_load.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductStore for FlakyStore {
    async fn load(&self) -> Result<Vec<crate::store::Product>> {
        if self.fail_next_load.swap(false, Ordering::SeqCst) {
            return Err(Error::persistence("injected load failure"));
        }
        self.inner.load().await
    }

    async fn save(&self, draft: &ProductDraft) -> Result<()> {
        self.inner.save(draft).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.fail_delete_ids.lock().unwrap().contains(id) {
            return Err(Error::persistence(format!(
                "injected delete failure for {id}"
            )));
        }
        self.inner.delete(id).await
    }
}

/// Scripted frame source: each entry becomes one frame, in order, then the
/// stream ends. Tracks acquisitions and whether the stream was released.
pub struct FakeSource {
    frames: Vec<String>,
    released: Arc<AtomicBool>,
    acquisitions: Arc<AtomicUsize>,
}

impl FakeSource {
    /// Scripts the frames the stream will yield.
    pub fn new(frames: Vec<&str>) -> Self {
        Self {
            frames: frames.into_iter().map(str::to_string).collect(),
            released: Arc::new(AtomicBool::new(false)),
            acquisitions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Whether the acquired stream has been released.
    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// How many times `acquire` was called.
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FrameSource for FakeSource {
    async fn acquire(
        &self,
        _constraints: &CaptureConstraints,
    ) -> Result<Box<dyn FrameStream + Send>> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStream {
            frames: self.frames.iter().map(|s| Frame::new(s.as_bytes())).collect(),
            released: Arc::clone(&self.released),
        }))
    }
}

struct FakeStream {
    frames: VecDeque<Frame>,
    released: Arc<AtomicBool>,
}

#[async_trait]
impl FrameStream for FakeStream {
    async fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }

    fn release(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// Frame source whose acquisition always fails with the given device error.
pub struct FailingSource {
    error: DeviceError,
}

impl FailingSource {
    /// Scripts the acquisition failure.
    pub fn new(error: DeviceError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl FrameSource for FailingSource {
    async fn acquire(
        &self,
        _constraints: &CaptureConstraints,
    ) -> Result<Box<dyn FrameStream + Send>> {
        Err(self.error.clone().into())
    }
}

/// Decoder over UTF-8 frames: blank text means no code in the frame, the
/// literal `!err` raises a decode error, anything else is the decoded value.
#[derive(Default)]
pub struct FakeDecoder {
    reset_called: bool,
}

impl FakeDecoder {
    /// Creates the decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `reset` has been called.
    pub fn was_reset(&self) -> bool {
        self.reset_called
    }
}

impl Decoder for FakeDecoder {
    fn decode(&mut self, frame: &Frame) -> Result<Option<String>> {
        let text = String::from_utf8_lossy(&frame.bytes).to_string();
        if text.is_empty() {
            return Ok(None);
        }
        if text == "!err" {
            return Err(Error::Decode("scripted failure".to_string()));
        }
        Ok(Some(text))
    }

    fn reset(&mut self) {
        self.reset_called = true;
    }
}
