//! Unlike - removes old likes from an X (Twitter) account
//!
//! Unlike walks the liked-posts listing of one account page by page, keeps the posts older
//! than an age threshold, and removes each like in order, sleeping through timeouts and
//! rate limits.

pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod services;
