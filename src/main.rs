//! Unlike - removes old likes from an X account
//!
//! Main application entry point: parses the command line, loads configuration and
//! credentials, and maps the run result to a process exit status.

mod commands;
mod service;

use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use unlike::{
    config::{self, Config, Credentials, LoggingConfig},
    error::{self, Error},
};

// The run is strictly sequential; a current-thread runtime also keeps startup single-threaded
// while credentials are removed from the environment.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = error::install_error_handlers() {
        eprintln!("Failed to install error handlers: {}", e);
    }

    let matches = commands::build_cli().get_matches();
    if commands::wants_version(&matches) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    config::load_env_file();
    let credentials = match Credentials::take_from_env() {
        Ok(credentials) => credentials,
        Err(e) => return report(Error::from(e)),
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => return report(Error::from(e)),
    };
    init_logging(&config.logging);

    let options = commands::run_options(&matches);
    match service::run_service(&config, &options, credentials).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e),
    }
}

/// Print a fatal error on stderr and pick the exit status
fn report(error: Error) -> ExitCode {
    let code = error.exit_code();
    eprintln!("Error: {:?}", color_eyre::Report::new(error));
    ExitCode::from(code)
}

fn init_logging(logging: &LoggingConfig) {
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.default_level));

    // Apply dependency filters if configured
    if let Some(dep_filter) = &logging.dependency_filter {
        let filter_string = format!("{},{}", env_filter, dep_filter);
        env_filter = EnvFilter::try_new(&filter_string).unwrap_or(env_filter);
    }

    let registry = tracing_subscriber::registry().with(env_filter);
    if logging.format == "json" {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().with_target(false).with_writer(std::io::stderr)).init();
    }
}
