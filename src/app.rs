//! Run orchestration: resolve the account, collect old likes, remove them

use crate::{
    config::Target,
    core::{likes::LikesApi, types::UserId},
    error::{Error, Result},
    services::{BatchReport, Collector, Deleter, RetryPolicy},
};
use tracing::info;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No liked post was old enough; the deleter never ran
    NothingToDo,
    Completed(BatchReport),
}

/// Resolve the account whose likes are removed
pub async fn resolve_user<A: LikesApi + ?Sized>(api: &A, target: &Target) -> Result<UserId> {
    let user = match target {
        Target::Username(username) => api.resolve_user_by_username(username).await,
        Target::Me => api.resolve_current_user().await,
    }
    .map_err(Error::ResolveUser)?;

    if user.is_empty() {
        return Err(Error::EmptyUserId);
    }
    Ok(user)
}

/// Execute one unlike run against `api`.
///
/// Only startup and collection failures are errors; per-item deletion failures are reported
/// in the returned [`BatchReport`].
pub async fn run<A: LikesApi + ?Sized>(
    api: &A,
    policy: &RetryPolicy,
    target: &Target,
    days: u32,
) -> Result<RunOutcome> {
    let user = resolve_user(api, target).await?;
    info!("User id: {}", user);

    info!("Collecting liked posts older than {} days...", days);
    let ids = Collector::new(api, policy).collect(&user, days).await?;
    if ids.is_empty() {
        info!("Liked posts not found");
        return Ok(RunOutcome::NothingToDo);
    }

    info!("{} likes to delete", ids.len());
    let report = Deleter::new(api, policy).delete_all(&user, &ids).await;
    info!("Done");

    Ok(RunOutcome::Completed(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fake::{Call, FakeLikesApi, item_days_old, page};
    use crate::core::types::{LikedPage, PageCursor};
    use crate::services::CollectError;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_nothing_to_do() {
        let api = FakeLikesApi::new().push_page(Ok(LikedPage::default()));

        let outcome = run(&api, &RetryPolicy::default(), &Target::Me, 30).await.unwrap();

        assert_eq!(outcome, RunOutcome::NothingToDo);
        assert!(api.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn test_two_pages_unliked_in_order() {
        let api = FakeLikesApi::new()
            .with_user("jack", "12")
            .push_page(Ok(page(
                vec![item_days_old("1", 8), item_days_old("2", 9), item_days_old("3", 10)],
                "next",
            )))
            .push_page(Ok(page(
                vec![item_days_old("4", 11), item_days_old("5", 12), item_days_old("6", 13)],
                "",
            )));

        let outcome =
            run(&api, &RetryPolicy::default(), &Target::Username("jack".to_string()), 7)
                .await
                .unwrap();

        let RunOutcome::Completed(report) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(report.succeeded, 6);
        assert_eq!(api.delete_calls(), vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(
            api.calls()[..3].to_vec(),
            vec![
                Call::ResolveUsername("jack".to_string()),
                Call::List(PageCursor::start()),
                Call::List(PageCursor::new("next")),
            ]
        );
    }

    #[tokio::test]
    async fn test_resolves_current_user_without_username() {
        let api = FakeLikesApi::new().with_current_user("77");

        let user = resolve_user(&api, &Target::Me).await.unwrap();

        assert_eq!(user, UserId::new("77"));
        assert_eq!(api.calls(), vec![Call::ResolveMe]);
    }

    #[tokio::test]
    async fn test_unknown_username_is_fatal() {
        let api = FakeLikesApi::new();

        let err = run(&api, &RetryPolicy::default(), &Target::Username("ghost".to_string()), 30)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ResolveUser(_)));
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_user_id_is_fatal() {
        let api = FakeLikesApi::new().with_current_user("");

        let err = run(&api, &RetryPolicy::default(), &Target::Me, 30).await.unwrap_err();

        assert!(matches!(err, Error::EmptyUserId));
        assert!(api.list_cursors().is_empty());
    }

    #[tokio::test]
    async fn test_empty_item_id_stops_before_deleting() {
        let api = FakeLikesApi::new()
            .push_page(Ok(page(vec![item_days_old("1", 40), item_days_old("", 40)], "")));

        let err = run(&api, &RetryPolicy::default(), &Target::Me, 30).await.unwrap_err();

        assert!(matches!(err, Error::Collect(CollectError::EmptyItemId { .. })));
        assert!(api.delete_calls().is_empty());
    }
}
