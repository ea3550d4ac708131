//! Core domain modules
pub mod likes;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;
