//! Clipboard copy for code blocks.
//!
//! [`ClipboardCopier`] takes whatever text is visible *right now* and hands
//! it to a [`ClipboardSink`]. It never retries and never panics: a missing
//! content node copies the empty string, and a sink failure comes back as
//! [`ClipboardResult::Failed`], whose [`text`](ClipboardResult::text) is
//! empty. The caller decides how to surface either outcome.
//!
//! Two sinks ship with the crate: [`MemoryClipboard`], which records writes
//! (and can be told to refuse them), and [`Osc52Clipboard`], which asks the
//! controlling terminal to set its clipboard via an OSC 52 escape sequence.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard not available")]
    NotAvailable,
    #[error("clipboard access denied")]
    Denied,
    #[error("clipboard payload too large ({size} > {limit} bytes)")]
    TooLarge { size: usize, limit: usize },
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Host capability that accepts text for the system clipboard.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Outcome of one copy action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardResult {
    Copied(String),
    Failed(ClipboardError),
}

impl ClipboardResult {
    /// The copied text; empty when the copy failed.
    pub fn text(&self) -> &str {
        match self {
            ClipboardResult::Copied(text) => text,
            ClipboardResult::Failed(_) => "",
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, ClipboardResult::Copied(_))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClipboardCopier;

impl ClipboardCopier {
    /// Copy `visible` (or `""` when there is no visible content) into `sink`.
    pub fn copy(&self, visible: Option<&str>, sink: &mut dyn ClipboardSink) -> ClipboardResult {
        let text = visible.unwrap_or_default();
        match sink.write_text(text) {
            Ok(()) => {
                tracing::debug!(bytes = text.len(), "copied code block");
                ClipboardResult::Copied(text.to_string())
            }
            Err(err) => {
                tracing::debug!(error = %err, "clipboard write failed");
                ClipboardResult::Failed(err)
            }
        }
    }
}

/// Records every write. Optionally denies access to simulate a locked-down host.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    /// Last successfully written text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Denied);
        }
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Sets the terminal clipboard with `ESC ] 52 ; c ; <base64> BEL`.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    writer: W,
    max_payload: usize,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Common terminal limit on the base64 payload.
    pub const DEFAULT_MAX_PAYLOAD: usize = 74_994;

    pub fn new(writer: W) -> Self {
        Self {
            writer,
            max_payload: Self::DEFAULT_MAX_PAYLOAD,
        }
    }

    pub fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let encoded = STANDARD.encode(text.as_bytes());
        if encoded.len() > self.max_payload {
            return Err(ClipboardError::TooLarge {
                size: encoded.len(),
                limit: self.max_payload,
            });
        }
        let seq = format!("\x1b]52;c;{encoded}\x07");
        self.writer
            .write_all(seq.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
