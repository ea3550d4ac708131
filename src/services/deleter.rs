//! Removes likes one by one, absorbing per-item failures
use crate::{
    core::{
        likes::LikesApi,
        types::{TweetId, UserId},
    },
    services::retry::RetryPolicy,
};
use std::time::Instant;
use tracing::{error, info, warn};

/// A progress line is logged every this many processed items
pub const PROGRESS_INTERVAL: usize = 100;

/// Whether `processed` items (1-based) is a progress checkpoint
pub fn is_progress_checkpoint(processed: usize) -> bool {
    processed > 0 && processed % PROGRESS_INTERVAL == 0
}

/// An unlike that failed with a non-retryable error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUnlike {
    pub id: TweetId,
    pub error: String,
}

/// Outcome of a deletion batch.
///
/// Per-item failures are collected here rather than aborting the batch, so the caller decides
/// whether a partial run is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub processed: usize,
    pub succeeded: usize,
    /// Deletes that went through but left the post liked
    pub soft_failed: Vec<TweetId>,
    pub failed: Vec<FailedUnlike>,
}

impl BatchReport {
    fn new(total: usize) -> Self {
        Self { total, ..Self::default() }
    }

    /// True when every item was unliked
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.total
    }
}

/// Unlikes a collected list of posts in order
pub struct Deleter<'a, A: LikesApi + ?Sized> {
    api: &'a A,
    policy: &'a RetryPolicy,
}

impl<'a, A: LikesApi + ?Sized> Deleter<'a, A> {
    pub fn new(api: &'a A, policy: &'a RetryPolicy) -> Self {
        Self { api, policy }
    }

    /// Unlike every id in order. Transient failures retry the same id; anything else is
    /// recorded in the report and the batch moves on.
    pub async fn delete_all(&self, user: &UserId, ids: &[TweetId]) -> BatchReport {
        let start_time = Instant::now();
        let mut report = BatchReport::new(ids.len());
        let mut index = 0;

        while index < ids.len() {
            let id = &ids[index];
            match self.api.delete_like(user, id).await {
                Ok(false) => report.succeeded += 1,
                Ok(true) => {
                    warn!("Unlike did not take effect for post {}", id);
                    report.soft_failed.push(id.clone());
                },
                Err(e) => {
                    if self.policy.backoff(&e).await {
                        continue;
                    }
                    error!("Failed to unlike post {}: {}", id, e);
                    report.failed.push(FailedUnlike { id: id.clone(), error: e.to_string() });
                },
            }

            index += 1;
            report.processed = index;
            if is_progress_checkpoint(index) {
                info!("[{}] {}/{}", report.succeeded, index, report.total);
            }
        }

        info!(
            "Unlike batch finished: {} of {} succeeded, {} still liked, {} failed, elapsed: {:.2?}",
            report.succeeded,
            report.total,
            report.soft_failed.len(),
            report.failed.len(),
            start_time.elapsed()
        );

        report
    }
}
