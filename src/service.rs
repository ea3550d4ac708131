use tracing::{info, warn};
use unlike::{
    api::XClient,
    app::{self, RunOutcome},
    config::{Config, Credentials, RunOptions},
    error::{Error, Result},
    services::RetryPolicy,
};

/// Build the API session and run one unlike pass
pub async fn run_service(config: &Config, options: &RunOptions, credentials: Credentials) -> Result<()> {
    let timeout = options.timeout_or(&config.api);
    let client = XClient::new(&config.api, credentials, timeout).map_err(Error::Session)?;
    let policy = RetryPolicy::from_config(timeout, &config.retry);

    match app::run(&client, &policy, &options.target, options.days).await? {
        RunOutcome::NothingToDo => {},
        RunOutcome::Completed(report) if report.is_complete() => {
            info!("Unliked all {} posts", report.total);
        },
        RunOutcome::Completed(report) => {
            warn!(
                "Unliked {} of {} posts ({} still liked, {} failed)",
                report.succeeded,
                report.total,
                report.soft_failed.len(),
                report.failed.len()
            );
            for failure in &report.failed {
                warn!("Not unliked: {} ({})", failure.id, failure.error);
            }
        },
    }

    Ok(())
}
