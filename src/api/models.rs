//! Wire models for the X API v2 responses the tool reads

use crate::core::types::{LikedItem, LikedPage, PageCursor};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Standard v2 envelope: `data` on success, `errors` on partial or total failure
#[derive(Debug, Deserialize)]
pub struct Envelope<T, M = Meta> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<Problem>,
    pub meta: Option<M>,
}

/// Entry of the `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

/// Pagination metadata
#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub result_count: u32,
    pub next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of the unlike response
#[derive(Debug, Deserialize)]
pub struct LikeState {
    pub liked: bool,
}

pub type UserResponse = Envelope<User>;
pub type LikedTweetsResponse = Envelope<Vec<Tweet>>;
pub type UnlikeResponse = Envelope<LikeState>;

impl From<Tweet> for LikedItem {
    fn from(tweet: Tweet) -> Self {
        LikedItem::new(tweet.id, tweet.created_at)
    }
}

impl LikedTweetsResponse {
    /// Missing `data` is an empty page, missing `next_token` is the end of the listing
    pub fn into_page(self) -> LikedPage {
        let items = self.data.unwrap_or_default().into_iter().map(LikedItem::from).collect();
        let next = PageCursor::from(self.meta.and_then(|meta| meta.next_token));
        LikedPage::new(items, next)
    }
}
