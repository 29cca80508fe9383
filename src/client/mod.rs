//! Execution client - the backend seam
//!
//! One multipart POST per invocation to `/bot/{tool_id}`; the trait keeps
//! the workspace testable against a scripted mock.

pub mod http;
pub mod mock;
pub mod request;

use async_trait::async_trait;

use crate::error::Result;

pub use http::{HttpBotClient, HttpClientConfig};
pub use mock::MockBotClient;
pub use request::{Attachment, InvocationRequest};

/// Asynchronous bot invocation seam
///
/// Implementations perform exactly one backend call per `invoke` and never
/// retry; retry is a user-initiated resubmission.
#[async_trait]
pub trait BotClient: Send + Sync {
    /// Submit one invocation and return its textual result
    async fn invoke(&self, request: &InvocationRequest) -> Result<String>;
}
