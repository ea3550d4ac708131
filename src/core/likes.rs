//! Likes API abstraction
use crate::api::error::ApiError;
use crate::core::types::{LikedPage, PageCursor, TweetId, UserId};
use async_trait::async_trait;

/// Result type for likes API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Operations the unlike run needs from the social network.
///
/// Every call is a single request; retrying is left to the caller.
#[async_trait]
pub trait LikesApi: Send + Sync {
    /// Look up a user id by handle
    async fn resolve_user_by_username(&self, username: &str) -> Result<UserId>;

    /// Look up the id of the authenticated user
    async fn resolve_current_user(&self) -> Result<UserId>;

    /// Fetch one page of liked posts starting at `cursor`
    async fn list_liked_items(&self, user: &UserId, cursor: &PageCursor) -> Result<LikedPage>;

    /// Remove a like and return the post-operation liked state
    async fn delete_like(&self, user: &UserId, tweet: &TweetId) -> Result<bool>;
}
