//! Results of cart mutations.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::cart::{CartSnapshot, CartStoreError};

/// How the durable side of a mutation ended.
///
/// This never undoes the optimistic local change; it only tells the caller
/// whether the store agrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The store accepted the change (or the target was already absent).
    Synced,
    /// The store call failed.
    Failed(CartStoreError),
    /// Bulk operation where some store calls failed.
    PartiallyFailed { attempted: usize, failed: usize },
    /// The store had not answered when the caller stopped waiting. The write
    /// keeps running and logs its own result.
    Pending,
}

impl SyncOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }

    /// The store error behind a single failed call.
    pub fn error(&self) -> Option<&CartStoreError> {
        match self {
            SyncOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Short operator-facing description of a failure.
    pub fn warning(&self) -> Option<String> {
        match self {
            SyncOutcome::Synced => None,
            SyncOutcome::Failed(err) => Some(err.to_string()),
            SyncOutcome::PartiallyFailed { attempted, failed } => Some(format!(
                "{} of {} store deletions failed",
                failed, attempted
            )),
            SyncOutcome::Pending => Some("store write still in progress".to_string()),
        }
    }
}

/// An applied local mutation and its durable write.
///
/// The local view already reflects the change, and the store call is already
/// running on its own task. Dropping the mutation only stops observing it.
pub struct Mutation {
    view: CartSnapshot,
    sync: JoinHandle<SyncOutcome>,
}

/// A settled mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// View right after the optimistic change.
    pub view: CartSnapshot,
    pub sync: SyncOutcome,
}

impl Mutation {
    pub(crate) fn new(view: CartSnapshot, sync: JoinHandle<SyncOutcome>) -> Self {
        Self { view, sync }
    }

    /// Local view right after the optimistic change.
    pub fn view(&self) -> &CartSnapshot {
        &self.view
    }

    /// Waits for the durable write to finish.
    pub async fn settle(self) -> MutationResult {
        let sync = joined(self.sync.await);
        MutationResult {
            view: self.view,
            sync,
        }
    }

    /// Waits at most `wait` for the durable write. When it is still running
    /// the outcome is `Pending` and the write carries on in the background.
    pub async fn settle_within(mut self, wait: Duration) -> MutationResult {
        let sync = match tokio::time::timeout(wait, &mut self.sync).await {
            Ok(joined_write) => joined(joined_write),
            Err(_) => {
                tracing::debug!(wait_ms = wait.as_millis() as u64, "Store write outlived the wait");
                SyncOutcome::Pending
            }
        };
        MutationResult {
            view: self.view,
            sync,
        }
    }
}

fn joined(result: Result<SyncOutcome, tokio::task::JoinError>) -> SyncOutcome {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Store write task aborted");
        SyncOutcome::Failed(CartStoreError::unreachable(format!("store write aborted: {}", e)))
    })
}

impl std::fmt::Debug for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutation")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_keeps_cause() {
        let outcome = SyncOutcome::Failed(CartStoreError::unreachable("down"));
        assert!(!outcome.is_ok());
        assert_eq!(outcome.error(), Some(&CartStoreError::unreachable("down")));
        assert_eq!(outcome.warning().unwrap(), "store unreachable: down");
    }

    #[test]
    fn partial_failure_warning() {
        let outcome = SyncOutcome::PartiallyFailed {
            attempted: 3,
            failed: 1,
        };
        assert_eq!(outcome.warning().unwrap(), "1 of 3 store deletions failed");
        assert!(outcome.error().is_none());
    }

    #[tokio::test]
    async fn settle_waits_for_the_write() {
        let mutation = Mutation::new(
            CartSnapshot::empty(),
            tokio::spawn(async { SyncOutcome::Synced }),
        );
        let result = mutation.settle().await;
        assert!(result.sync.is_ok());
    }

    #[tokio::test]
    async fn slow_write_is_pending_and_keeps_running() {
        let (release, gate) = tokio::sync::oneshot::channel::<()>();
        let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();
        let mutation = Mutation::new(
            CartSnapshot::empty(),
            tokio::spawn(async move {
                let _ = gate.await;
                let _ = done_tx.send(());
                SyncOutcome::Synced
            }),
        );

        let result = mutation.settle_within(Duration::from_millis(10)).await;
        assert_eq!(result.sync, SyncOutcome::Pending);
        assert!(result.sync.warning().is_some());

        release.send(()).unwrap();
        assert!(done_rx.await.is_ok());
    }

    #[tokio::test]
    async fn aborted_write_reports_failure() {
        let handle = tokio::spawn(std::future::pending::<SyncOutcome>());
        handle.abort();
        let result = Mutation::new(CartSnapshot::empty(), handle).settle().await;
        assert!(matches!(result.sync, SyncOutcome::Failed(CartStoreError::Unreachable(_))));
    }
}
