//! X (Twitter) API v2 adapter
pub mod client;
pub mod error;
pub mod models;
pub mod oauth;

pub use client::XClient;
pub use error::ApiError;
