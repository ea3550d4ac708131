//! Core domain types for the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier
///
/// A newtype wrapper around String to provide type safety for user ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner value
    #[inline]
    pub fn value(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post identifier
///
/// A newtype wrapper around String naming a liked post
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(String);

impl TweetId {
    /// Create a new TweetId
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner value
    #[inline]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque continuation token for a paginated listing.
///
/// The empty cursor means "first page" when sent and "no further pages" when received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    /// Cursor for the first page of a listing
    #[inline]
    pub fn start() -> Self {
        Self(String::new())
    }

    #[inline]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// True when there is no continuation token
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Option<String>> for PageCursor {
    fn from(token: Option<String>) -> Self {
        Self(token.unwrap_or_default())
    }
}

/// A single entry of the liked-posts listing.
///
/// `id` is kept raw so an empty identifier from upstream can be detected by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikedItem {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl LikedItem {
    pub fn new(id: impl Into<String>, created_at: Option<DateTime<Utc>>) -> Self {
        Self { id: id.into(), created_at }
    }

    /// Whether the post was created strictly after `cutoff`.
    ///
    /// Items without a creation time are never considered recent.
    pub fn is_newer_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at.is_some_and(|created_at| created_at > cutoff)
    }
}

/// One page of the liked-posts listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikedPage {
    pub items: Vec<LikedItem>,
    pub next: PageCursor,
}

impl LikedPage {
    pub fn new(items: Vec<LikedItem>, next: PageCursor) -> Self {
        Self { items, next }
    }
}
