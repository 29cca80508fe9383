//! Copy-to-clipboard pipeline
//!
//! Copies the original raw response text, never the rendered structure.
//! The acknowledgment is a single restartable 2-second window: copying again
//! while it is visible restarts the window instead of stacking timers.
//! Clipboard failures are swallowed; the acknowledgment simply does not show.

use std::time::{Duration, Instant};

use crate::error::{BotdeskError, Result};

/// How long the "copied" acknowledgment stays visible
pub const ACK_VISIBLE: Duration = Duration::from_millis(2000);

/// Destination for clipboard writes
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Create a system clipboard sink
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| BotdeskError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| BotdeskError::Clipboard(e.to_string()))
    }
}

/// Self-expiring "copied" acknowledgment
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAck {
    set_at: Option<Instant>,
}

impl CopyAck {
    /// Acknowledgment that has never been triggered
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark as copied now; restarts the visibility window
    pub fn mark(&mut self) {
        self.mark_at(Instant::now());
    }

    /// Mark as copied at a specific instant
    pub fn mark_at(&mut self, at: Instant) {
        self.set_at = Some(at);
    }

    /// Check visibility now
    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    /// Check visibility at a specific instant: true for exactly ACK_VISIBLE
    /// after the most recent mark
    pub fn is_visible_at(&self, now: Instant) -> bool {
        match self.set_at {
            Some(set_at) => match now.checked_duration_since(set_at) {
                Some(elapsed) => elapsed < ACK_VISIBLE,
                None => false,
            },
            None => false,
        }
    }
}

/// Copy affordance over a clipboard sink
#[derive(Debug, Default)]
pub struct Copier<S: ClipboardSink> {
    sink: S,
    ack: CopyAck,
}

impl<S: ClipboardSink> Copier<S> {
    /// Create a copier over a sink
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            ack: CopyAck::new(),
        }
    }

    /// Write `raw` to the clipboard. Returns whether the acknowledgment is
    /// now showing; a failed write is swallowed and leaves it hidden.
    pub fn copy(&mut self, raw: &str) -> bool {
        match self.sink.set_text(raw) {
            Ok(()) => {
                self.ack.mark();
                true
            }
            Err(e) => {
                log::warn!("clipboard write failed: {}", e);
                false
            }
        }
    }

    /// Current acknowledgment state
    pub fn ack(&self) -> &CopyAck {
        &self.ack
    }
}
