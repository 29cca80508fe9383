//! Scripted execution client for tests
//!
//! Records every request and replays queued responses. A gated mock holds
//! each call until released, which lets tests pin an invocation in the
//! awaiting state while a second submission supersedes it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{BotdeskError, Result};

use super::BotClient;
use super::request::InvocationRequest;

/// In-memory BotClient with scripted responses
#[derive(Debug, Default)]
pub struct MockBotClient {
    responses: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<InvocationRequest>>,
    gate: Option<Arc<Notify>>,
}

impl MockBotClient {
    /// Create a mock that answers "ok" to everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn with_response(self, result: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(result.into()));
        self
    }

    /// Queue a failed response
    pub fn with_error(self, reason: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(BotdeskError::Invocation(reason.into())));
        self
    }

    /// Gate every call on an external release signal. Each `notify_one` on
    /// the returned handle releases exactly one pending call.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// Requests seen so far
    pub fn calls(&self) -> Vec<InvocationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests seen so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BotClient for MockBotClient {
    async fn invoke(&self, request: &InvocationRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }
}
