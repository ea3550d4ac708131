//! Process-level checks of the unlike binary

use std::process::{Command, Output};

fn unlike(args: &[&str]) -> Output {
    unlike_with_env(args, &[])
}

fn unlike_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_unlike"))
        .args(args)
        .env_clear()
        .envs(vars.iter().copied())
        .current_dir(std::env::temp_dir())
        .output()
        .unwrap()
}

const CREDENTIALS: [(&str, &str); 4] = [
    ("UNLIKE_OAUTH_TOKEN", "token"),
    ("UNLIKE_OAUTH_TOKEN_SECRET", "token-secret"),
    ("UNLIKE_CONSUMER_KEY", "consumer"),
    ("UNLIKE_CONSUMER_SECRET", "consumer-secret"),
];

#[test]
fn test_version_flag_prints_version() {
    let output = unlike(&["-V"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_missing_credentials_exit_with_usage_status() {
    let output = unlike(&["-d", "7"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("UNLIKE_OAUTH_TOKEN"));
}

#[test]
fn test_bad_flag_is_rejected() {
    let output = unlike(&["--days", "many"]);

    assert!(!output.status.success());
}

#[test]
fn test_missing_credentials_win_over_bad_config() {
    let output = unlike_with_env(&[], &[("UNLIKE_API__TIMEOUT", "not a duration")]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_bad_config_exits_one() {
    let mut vars = CREDENTIALS.to_vec();
    vars.push(("UNLIKE_API__TIMEOUT", "not a duration"));

    let output = unlike_with_env(&[], &vars);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

#[test]
fn test_zero_timeout_is_usage_error() {
    let output = unlike_with_env(&["-t", "0s"], &CREDENTIALS);

    assert_eq!(output.status.code(), Some(2));
}
