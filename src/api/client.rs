//! X API v2 client implementing [`LikesApi`]
use crate::{
    api::{
        error::ApiError,
        models::{Envelope, LikedTweetsResponse, UnlikeResponse, UserResponse},
        oauth::OAuth1Signer,
    },
    config::{ApiConfig, Credentials},
    core::{
        likes::{LikesApi, Result},
        types::{LikedPage, PageCursor, TweetId, UserId},
    },
};
use async_trait::async_trait;
use reqwest::{Client, Method, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Smallest and largest `max_results` the liked_tweets endpoint accepts
const MIN_PAGE_SIZE: u32 = 5;
const MAX_PAGE_SIZE: u32 = 100;

/// Fields requested for each liked post
const TWEET_FIELDS: &str = "created_at,id";

/// Authenticated session against the X API
pub struct XClient {
    http: Client,
    base_url: Url,
    signer: OAuth1Signer,
    page_size: u32,
}

impl std::fmt::Debug for XClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XClient")
            .field("base_url", &self.base_url.as_str())
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl XClient {
    /// Create a client whose every request is bounded by `timeout`
    pub fn new(
        config: &ApiConfig,
        credentials: Credentials,
        timeout: Duration,
    ) -> std::result::Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{} cannot be a base url", base_url)));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            signer: OAuth1Signer::new(credentials),
            page_size: config.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
        })
    }

    /// Build an endpoint url from raw path segments; each segment is escaped
    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T> {
        debug!("Sending {} request to {}", method, url);

        let authorization = self.signer.authorization_header(method.as_str(), &url)?;
        let response = self
            .http
            .request(method, url)
            .header(header::AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(ApiError::from_status(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Unwrap `data`, turning a problem-only body into an error
    fn data<T, M>(envelope: Envelope<T, M>) -> Result<T> {
        if let Some(data) = envelope.data {
            return Ok(data);
        }

        Err(match envelope.errors.into_iter().next() {
            Some(problem) => ApiError::Problem { title: problem.title, detail: problem.detail },
            None => ApiError::Problem {
                title: "Missing data".to_string(),
                detail: "response carried neither data nor errors".to_string(),
            },
        })
    }
}

#[async_trait]
impl LikesApi for XClient {
    #[instrument(skip(self))]
    async fn resolve_user_by_username(&self, username: &str) -> Result<UserId> {
        let url = self.endpoint(&["2", "users", "by", "username", username])?;
        let response: UserResponse = self.send(Method::GET, url).await?;
        Ok(UserId::new(Self::data(response)?.id))
    }

    #[instrument(skip(self))]
    async fn resolve_current_user(&self) -> Result<UserId> {
        let url = self.endpoint(&["2", "users", "me"])?;
        let response: UserResponse = self.send(Method::GET, url).await?;
        Ok(UserId::new(Self::data(response)?.id))
    }

    #[instrument(skip_all, fields(user = %user))]
    async fn list_liked_items(&self, user: &UserId, cursor: &PageCursor) -> Result<LikedPage> {
        let mut url = self.endpoint(&["2", "users", user.value(), "liked_tweets"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("max_results", &self.page_size.to_string());
            query.append_pair("tweet.fields", TWEET_FIELDS);
            if !cursor.is_end() {
                query.append_pair("pagination_token", cursor.value());
            }
        }

        let response: LikedTweetsResponse = self.send(Method::GET, url).await?;
        Ok(response.into_page())
    }

    #[instrument(skip_all, fields(user = %user, tweet = %tweet))]
    async fn delete_like(&self, user: &UserId, tweet: &TweetId) -> Result<bool> {
        let url = self.endpoint(&["2", "users", user.value(), "likes", tweet.value()])?;
        let response: UnlikeResponse = self.send(Method::DELETE, url).await?;
        Ok(Self::data(response)?.liked)
    }
}
