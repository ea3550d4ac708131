use clap::{Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use unlike::config::{DEFAULT_DAYS, RunOptions, Target};

/// Build the command-line interface
pub fn build_cli() -> Command {
    Command::new("unlike")
        .about("Remove likes older than a number of days from an X account")
        .after_help(
            "Credentials are read from UNLIKE_OAUTH_TOKEN, UNLIKE_OAUTH_TOKEN_SECRET, \
             UNLIKE_CONSUMER_KEY and UNLIKE_CONSUMER_SECRET.",
        )
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .help("Account whose likes are removed; empty means the authenticated user")
                .value_parser(clap::value_parser!(String))
                .default_value(""),
        )
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .help("Only remove likes on posts at least this many days old")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("30"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Per-request timeout, e.g. 30s or 1m30s [default: api.timeout, 30s]")
                .value_parser(parse_timeout),
        )
}

/// Parse a humantime request timeout; zero would fail every request
fn parse_timeout(value: &str) -> Result<Duration, String> {
    let timeout = humantime::parse_duration(value).map_err(|e| e.to_string())?;
    if timeout.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(timeout)
}

/// Whether `-V` was given
pub fn wants_version(matches: &ArgMatches) -> bool {
    matches.get_flag("version")
}

/// Resolve the run options from parsed arguments
pub fn run_options(matches: &ArgMatches) -> RunOptions {
    let username = matches.get_one::<String>("username").map(String::as_str);
    let days = matches.get_one::<i64>("days").copied().unwrap_or(i64::from(DEFAULT_DAYS));
    let timeout = matches.get_one::<Duration>("timeout").copied();

    RunOptions::new(Target::from_username(username), days, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> ArgMatches {
        build_cli().try_get_matches_from(std::iter::once("unlike").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = run_options(&parse(&[]));

        assert_eq!(options, RunOptions { target: Target::Me, days: 30, timeout: None });
    }

    #[test]
    fn test_all_flags() {
        let matches = parse(&["-u", "jack", "-d", "7", "-t", "1m30s"]);
        let options = run_options(&matches);

        assert!(!wants_version(&matches));
        assert_eq!(options.target, Target::Username("jack".to_string()));
        assert_eq!(options.days, 7);
        assert_eq!(options.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_negative_days_fall_back() {
        let options = run_options(&parse(&["-d", "-5"]));

        assert_eq!(options.days, 30);
    }

    #[test]
    fn test_version_flag() {
        assert!(wants_version(&parse(&["-V"])));
    }

    #[test]
    fn test_rejects_bad_duration() {
        let result = build_cli().try_get_matches_from(["unlike", "-t", "soon"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        for value in ["0s", "0ms"] {
            let err = build_cli().try_get_matches_from(["unlike", "-t", value]).unwrap_err();

            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
            assert!(err.to_string().contains("greater than zero"));
        }
        assert!(build_cli().try_get_matches_from(["unlike", "-t", "0"]).is_err());
    }

    #[test]
    fn test_accepts_sub_second_timeout() {
        let options = run_options(&parse(&["-t", "500ms"]));

        assert_eq!(options.timeout, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
