//! Progress reporting for one tool invocation.
//!
//! A reporter is created per call and passed down explicitly; nothing here is
//! shared between requests.

use rmcp::model::{ProgressNotificationParam, ProgressToken};
use rmcp::service::{Peer, RoleServer};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::debug;

pub const PROGRESS_TOTAL: u8 = 100;

/// One synthetic progress update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowProgress {
    pub progress: u8,
    pub total: Option<u8>,
    pub message: Option<String>,
}

impl WorkflowProgress {
    pub fn new(progress: u8, message: impl Into<String>) -> Self {
        Self {
            progress,
            total: Some(PROGRESS_TOTAL),
            message: Some(message.into()),
        }
    }
}

/// Sink for progress updates. Must not block and must not fail the caller.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: WorkflowProgress);
}

/// Used when the caller sent no progress token.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn report(&self, _update: WorkflowProgress) {}
}

/// Forwards updates to one MCP peer, in order, tagged with the caller's token.
#[derive(Debug)]
pub struct PeerProgressReporter {
    sender: UnboundedSender<WorkflowProgress>,
    forwarder: JoinHandle<()>,
}

impl PeerProgressReporter {
    pub fn spawn(peer: Peer<RoleServer>, progress_token: ProgressToken) -> Self {
        let (sender, mut receiver) = unbounded_channel::<WorkflowProgress>();
        let forwarder = tokio::spawn(async move {
            while let Some(update) = receiver.recv().await {
                let notification = ProgressNotificationParam {
                    progress_token: progress_token.clone(),
                    progress: f64::from(update.progress),
                    total: update.total.map(f64::from),
                    message: update.message,
                };
                if let Err(error) = peer.notify_progress(notification).await {
                    debug!(%error, "dropping progress notification");
                }
            }
        });
        Self { sender, forwarder }
    }

    /// Wait until every queued update has been handed to the transport.
    pub async fn finish(self) {
        let Self { sender, forwarder } = self;
        drop(sender);
        if let Err(error) = forwarder.await {
            debug!(%error, "progress forwarder ended abnormally");
        }
    }
}

impl ProgressReporter for PeerProgressReporter {
    fn report(&self, update: WorkflowProgress) {
        if self.sender.send(update).is_err() {
            debug!("progress forwarder closed; update dropped");
        }
    }
}
