//! Copy-to-clipboard acknowledgment for prompt cells.
//!
//! Copying a row's prompt flips that row to `Copied` for a fixed window, then
//! back to `Idle`. Copying again while `Copied` does nothing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

pub const COPY_RESET: Duration = Duration::from_secs(2);

/// Destination for copied text.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Clipboard that keeps the last written text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    last: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckState {
    Idle,
    Copied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Row was already acknowledged; nothing written, timer untouched.
    AlreadyCopied,
}

type ResetTimers = Arc<Mutex<HashMap<usize, JoinHandle<()>>>>;

/// Per-row copy state with self-reverting acknowledgment.
pub struct CopyAck<C: Clipboard> {
    clipboard: C,
    reset_after: Duration,
    copied: ResetTimers,
}

impl<C: Clipboard> CopyAck<C> {
    pub fn new(clipboard: C) -> Self {
        Self {
            clipboard,
            reset_after: COPY_RESET,
            copied: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_reset(mut self, reset_after: Duration) -> Self {
        self.reset_after = reset_after;
        self
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn state(&self, row: usize) -> AckState {
        let copied = self.copied.lock().unwrap_or_else(|e| e.into_inner());
        if copied.contains_key(&row) {
            AckState::Copied
        } else {
            AckState::Idle
        }
    }

    /// Copy `text` for `row`. Must be called from within a Tokio runtime.
    pub fn copy(&self, row: usize, text: &str) -> anyhow::Result<CopyOutcome> {
        let mut copied = self.copied.lock().unwrap_or_else(|e| e.into_inner());
        if copied.contains_key(&row) {
            return Ok(CopyOutcome::AlreadyCopied);
        }
        self.clipboard.write_text(text)?;

        let timers = Arc::clone(&self.copied);
        let reset_after = self.reset_after;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(reset_after).await;
            timers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(&row);
        });
        copied.insert(row, handle);
        tracing::debug!("copied prompt of row {}", row + 1);
        Ok(CopyOutcome::Copied)
    }
}

impl<C: Clipboard> Drop for CopyAck<C> {
    fn drop(&mut self) {
        let mut copied = self.copied.lock().unwrap_or_else(|e| e.into_inner());
        for (_, handle) in copied.drain() {
            handle.abort();
        }
    }
}
