//! CLI argument parsing tests.

use clap::Parser;
use pageling_cli::Cli;
use std::path::PathBuf;

#[test]
fn parses_minimal_invocation() {
    let cli = Cli::parse_from(["pageling", "page.html"]);
    assert_eq!(cli.input, PathBuf::from("page.html"));
    assert_eq!(cli.to, "es");
    assert!(cli.config.is_none());
    assert!(!cli.status);
}

#[test]
fn parses_target_language_and_status_flag() {
    let cli = Cli::parse_from(["pageling", "page.html", "--to", "de", "--status"]);
    assert_eq!(cli.to, "de");
    assert!(cli.status);
}

#[test]
fn parses_config_path() {
    let cli = Cli::parse_from(["pageling", "page.html", "--config", "fleet.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("fleet.toml")));
}

#[test]
fn missing_input_is_an_error() {
    assert!(Cli::try_parse_from(["pageling"]).is_err());
}
