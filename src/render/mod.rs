//! Response rendering and copy pipeline
//!
//! Turns a raw bot response into display blocks and exposes the
//! copy-to-clipboard affordance with its self-expiring acknowledgment.

pub mod clipboard;
pub mod markdown;

pub use clipboard::{ACK_VISIBLE, ClipboardSink, Copier, CopyAck, SystemClipboard};
pub use markdown::{Block, Document, render};
