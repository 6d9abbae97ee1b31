//! Deferred reply completion
//!
//! The assistant "thinks" for a fixed delay before answering. That delay runs
//! as a tokio task which hands the [`PendingReply`] back once it elapses. The
//! task is aborted when the handle is dropped, so tearing the UI down mid-delay
//! leaves nothing behind.

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::state::PendingReply;

pub struct ReplyTask {
    handle: JoinHandle<PendingReply>,
}

impl ReplyTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn(pending: PendingReply, delay: Duration) -> Self {
        debug!(delay_ms = delay.as_millis() as u64, "scheduling reply");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            pending
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the delay to elapse.
    ///
    /// Returns `None` if the task was aborted or panicked; the reply is lost
    /// in that case. Cancel safe, so it can sit in a `tokio::select!` loop,
    /// but the task must not be awaited again once this has returned.
    pub async fn wait(&mut self) -> Option<PendingReply> {
        match (&mut self.handle).await {
            Ok(pending) => Some(pending),
            Err(e) => {
                warn!("reply task did not complete: {}", e);
                None
            }
        }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for ReplyTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
