//! The tool-invocation workspace
//!
//! Owns the catalog, the execution client, the current invocation's state
//! and its status driver. Each submission gets a fresh sequence number;
//! outcomes are applied only if they still belong to the current submission,
//! so a superseded invocation can never overwrite newer state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use crate::catalog::ToolCatalog;
use crate::client::{Attachment, BotClient, InvocationRequest};
use crate::error::Result;
use crate::id::generate_invocation_id;
use crate::schema::resolver;
use crate::status::{StatusDriver, StatusTier};

use super::state::InvocationState;

/// Handle returned to the submitter
#[derive(Debug)]
pub struct Submission {
    /// Sequence identifying this submission in the workspace
    pub seq: u64,
    /// String id for log correlation
    pub invocation_id: String,
    /// Live status tier updates for this submission's wait
    pub status: watch::Receiver<StatusTier>,
}

#[derive(Debug)]
struct Inner {
    next_seq: u64,
    state: InvocationState,
    driver: Option<StatusDriver>,
}

/// One user-facing workspace; a single submission is outstanding at a time,
/// and a new submission supersedes the previous one
pub struct Workspace {
    catalog: Arc<ToolCatalog>,
    client: Arc<dyn BotClient>,
    inner: Arc<Mutex<Inner>>,
}

impl Workspace {
    /// Create a workspace over a catalog and an execution client
    pub fn new(catalog: ToolCatalog, client: Arc<dyn BotClient>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            client,
            inner: Arc::new(Mutex::new(Inner {
                next_seq: 0,
                state: InvocationState::idle(),
                driver: None,
            })),
        }
    }

    /// The workspace's catalog
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Snapshot of the current invocation state
    pub fn state(&self) -> InvocationState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Elapsed time of the outstanding submission, if one is in flight
    pub fn elapsed(&self) -> Option<Duration> {
        self.inner.lock().unwrap().driver.as_ref().map(|d| d.elapsed())
    }

    /// Validate and submit an invocation.
    ///
    /// Validation failures (unknown tool, incomplete active field set) are
    /// returned before any network call and leave the workspace untouched.
    /// A successful submit supersedes any outstanding invocation: its status
    /// driver is cancelled and its eventual outcome will be discarded.
    pub fn submit(
        &self,
        tool_id: &str,
        values: &HashMap<String, String>,
        attachment: Option<Attachment>,
    ) -> Result<Submission> {
        let entry = self.catalog.entry(tool_id)?;
        resolver::validate(entry, values, attachment.is_some())?;
        let fields = resolver::collect(entry, values);

        let mut request = InvocationRequest::new(tool_id, fields);
        if let Some(attachment) = attachment {
            request = request.with_attachment(attachment);
        }

        let invocation_id = generate_invocation_id();
        let (seq, status) = {
            let mut inner = self.inner.lock().unwrap();
            inner.next_seq += 1;
            let seq = inner.next_seq;

            if let Some(old) = inner.driver.take() {
                log::info!("superseding outstanding invocation (seq {})", inner.state.seq);
                old.stop();
            }

            inner.state.begin(seq);
            let driver = StatusDriver::start();
            let status = driver.subscribe();
            inner.driver = Some(driver);
            inner.state.dispatched();
            (seq, status)
        };

        log::info!(
            "submitted {} (seq {}) for tool '{}'",
            invocation_id,
            seq,
            tool_id
        );

        let client = self.client.clone();
        let inner = self.inner.clone();
        let task_id = invocation_id.clone();
        tokio::spawn(async move {
            let outcome = client.invoke(&request).await;
            Self::apply(&inner, seq, &task_id, outcome);
        });

        Ok(Submission {
            seq,
            invocation_id,
            status,
        })
    }

    /// Apply an invocation outcome, returning whether it was accepted.
    ///
    /// An outcome is stale when the workspace has moved on: its sequence is
    /// not the current submission's, or the current submission already
    /// settled. Stale outcomes are logged and dropped.
    pub fn apply_outcome(&self, seq: u64, outcome: Result<String>) -> bool {
        Self::apply(&self.inner, seq, "direct", outcome)
    }

    fn apply(inner: &Mutex<Inner>, seq: u64, invocation_id: &str, outcome: Result<String>) -> bool {
        let mut inner = inner.lock().unwrap();
        if inner.state.seq != seq || !inner.state.phase.is_pending() {
            log::debug!(
                "discarding stale outcome of {} (seq {}, current seq {})",
                invocation_id,
                seq,
                inner.state.seq
            );
            return false;
        }

        if let Some(driver) = inner.driver.take() {
            driver.stop();
        }

        match outcome {
            Ok(result) => {
                log::info!("{} (seq {}) succeeded", invocation_id, seq);
                inner.state.succeed(result);
            }
            Err(e) => {
                log::warn!("{} (seq {}) failed: {}", invocation_id, seq, e);
                inner.state.fail(e.to_string());
            }
        }
        true
    }

    /// Leave the workspace: cancel any outstanding narration and go Idle.
    /// The outstanding invocation's eventual outcome will be discarded.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(driver) = inner.driver.take() {
            driver.stop();
        }
        inner.state.reset();
    }

    /// Poll until the current submission settles (or the workspace is reset)
    pub async fn wait_settled(&self, poll: Duration) -> InvocationState {
        loop {
            let snapshot = self.state();
            if !snapshot.phase.is_pending() {
                return snapshot;
            }
            tokio::time::sleep(poll).await;
        }
    }
}
