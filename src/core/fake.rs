//! Scripted in-memory `LikesApi` used by the unit tests

use crate::api::error::ApiError;
use crate::core::{
    likes::{LikesApi, Result},
    types::{LikedItem, LikedPage, PageCursor, TweetId, UserId},
};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A recorded call against the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ResolveUsername(String),
    ResolveMe,
    List(PageCursor),
    Delete(TweetId),
}

pub(crate) struct FakeLikesApi {
    current_user: UserId,
    usernames: HashMap<String, UserId>,
    pages: Mutex<VecDeque<Result<LikedPage>>>,
    deletes: Mutex<HashMap<String, VecDeque<Result<bool>>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeLikesApi {
    pub(crate) fn new() -> Self {
        Self {
            current_user: UserId::new("1000"),
            usernames: HashMap::new(),
            pages: Mutex::new(VecDeque::new()),
            deletes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_current_user(mut self, id: &str) -> Self {
        self.current_user = UserId::new(id);
        self
    }

    pub(crate) fn with_user(mut self, username: &str, id: &str) -> Self {
        self.usernames.insert(username.to_string(), UserId::new(id));
        self
    }

    /// Queue the next listing response; an exhausted queue yields an empty final page
    pub(crate) fn push_page(self, page: Result<LikedPage>) -> Self {
        self.pages.lock().unwrap().push_back(page);
        self
    }

    /// Queue responses for deleting `id`; unscripted deletes succeed
    pub(crate) fn script_delete(self, id: &str, responses: Vec<Result<bool>>) -> Self {
        self.deletes.lock().unwrap().entry(id.to_string()).or_default().extend(responses);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn list_cursors(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(cursor) => Some(cursor.value().to_string()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn delete_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete(id) => Some(id.value().to_string()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl LikesApi for FakeLikesApi {
    async fn resolve_user_by_username(&self, username: &str) -> Result<UserId> {
        self.record(Call::ResolveUsername(username.to_string()));
        self.usernames.get(username).cloned().ok_or_else(|| ApiError::Problem {
            title: "Not Found Error".to_string(),
            detail: format!("Could not find user with username: [{}].", username),
        })
    }

    async fn resolve_current_user(&self) -> Result<UserId> {
        self.record(Call::ResolveMe);
        Ok(self.current_user.clone())
    }

    async fn list_liked_items(&self, _user: &UserId, cursor: &PageCursor) -> Result<LikedPage> {
        self.record(Call::List(cursor.clone()));
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Ok(LikedPage::default()))
    }

    async fn delete_like(&self, _user: &UserId, tweet: &TweetId) -> Result<bool> {
        self.record(Call::Delete(tweet.clone()));
        self.deletes
            .lock()
            .unwrap()
            .get_mut(tweet.value())
            .and_then(|responses| responses.pop_front())
            .unwrap_or(Ok(false))
    }
}

/// A post liked `days_ago` days before now
pub(crate) fn item_days_old(id: &str, days_ago: i64) -> LikedItem {
    LikedItem::new(id, Some(days_ago_from_now(days_ago)))
}

pub(crate) fn days_ago_from_now(days_ago: i64) -> DateTime<Utc> {
    Utc::now() - TimeDelta::days(days_ago)
}

/// Page of `items` continued by `next` (empty for the last page)
pub(crate) fn page(items: Vec<LikedItem>, next: &str) -> LikedPage {
    LikedPage::new(items, PageCursor::new(next))
}
