//! Command line parsing of the tool binary.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use clap::{CommandFactory, Parser};
use metricset_tool::cli::Cli;

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn input_defaults_to_stdin() {
    let cli = Cli::try_parse_from(["metricset-tool", "rules.yaml"]).unwrap();
    assert_eq!(cli.config, "rules.yaml");
    assert_eq!(cli.input, "-");
    assert!(cli.reads_stdin());
}

#[test]
fn explicit_input_file() {
    let cli = Cli::try_parse_from(["metricset-tool", "rules.yaml", "scrape.prom"]).unwrap();
    assert_eq!(cli.input, "scrape.prom");
    assert!(!cli.reads_stdin());
}

#[test]
fn help_and_missing_config_are_not_taken_as_paths() {
    let err = Cli::try_parse_from(["metricset-tool", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let err = Cli::try_parse_from(["metricset-tool"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}
