pub mod collector;
pub mod deleter;
pub mod retry;

pub use collector::{CollectError, Collector};
pub use deleter::{BatchReport, Deleter, FailedUnlike};
pub use retry::{ErrorClass, RetryPolicy};
