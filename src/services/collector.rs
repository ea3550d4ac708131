//! Collects the ids of liked posts older than the age threshold
use crate::{
    api::error::ApiError,
    core::{
        likes::LikesApi,
        types::{LikedItem, PageCursor, TweetId, UserId},
    },
    services::retry::RetryPolicy,
};
use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to list liked posts: {0}")]
    Api(#[from] ApiError),

    /// Upstream returned a liked post without an id
    #[error("liked post with empty id on page {page}")]
    EmptyItemId { page: usize },
}

/// The instant `days` days before `now`
pub fn cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Keep the ids of items created at or before `cutoff`, in listing order
pub fn eligible_ids(
    items: Vec<LikedItem>,
    cutoff: DateTime<Utc>,
    page: usize,
) -> Result<Vec<TweetId>, CollectError> {
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        if item.is_newer_than(cutoff) {
            continue;
        }
        if item.id.is_empty() {
            return Err(CollectError::EmptyItemId { page });
        }
        ids.push(TweetId::new(item.id));
    }
    Ok(ids)
}

/// Walks the liked-posts listing of one user
pub struct Collector<'a, A: LikesApi + ?Sized> {
    api: &'a A,
    policy: &'a RetryPolicy,
}

impl<'a, A: LikesApi + ?Sized> Collector<'a, A> {
    pub fn new(api: &'a A, policy: &'a RetryPolicy) -> Self {
        Self { api, policy }
    }

    /// Ids of every liked post at least `days` days old, in page order.
    ///
    /// A page that fails transiently is fetched again with the same cursor.
    pub async fn collect(&self, user: &UserId, days: u32) -> Result<Vec<TweetId>, CollectError> {
        let mut ids = Vec::new();
        let mut cursor = PageCursor::start();
        let mut page_count = 0;

        loop {
            let page = match self.api.list_liked_items(user, &cursor).await {
                Ok(page) => page,
                Err(e) => {
                    if self.policy.backoff(&e).await {
                        continue;
                    }
                    return Err(e.into());
                },
            };
            page_count += 1;

            let page_items = page.items.len();
            let eligible = eligible_ids(page.items, cutoff(Utc::now(), days), page_count)?;
            debug!(
                "Received page {} with {} liked posts, {} older than {} days",
                page_count,
                page_items,
                eligible.len(),
                days
            );
            ids.extend(eligible);

            if page.next.is_end() {
                break;
            }
            cursor = page.next;
        }

        info!("Collected {} liked posts in {} pages", ids.len(), page_count);
        Ok(ids)
    }
}
