//! Invocation request types
//!
//! An InvocationRequest is built per submission, after the active schema has
//! been resolved and validated. Field values are strings at the wire
//! boundary; the optional attachment travels as a separate binary part.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A binary file attached to an invocation (at most one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name, forwarded to the backend
    pub file_name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Attachment size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the attachment is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One submission to the backend bot endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Target tool id; determines the backend route
    pub tool_id: String,
    /// Active-schema field values, ordered by field name
    pub fields: BTreeMap<String, String>,
    /// Optional binary attachment
    pub attachment: Option<Attachment>,
}

impl InvocationRequest {
    /// Create a request without an attachment
    pub fn new(tool_id: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            fields,
            attachment: None,
        }
    }

    /// Attach a file
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}
