//! metricset-tool
//!
//! Reads exposition text (file or stdin), applies the declare / rename /
//! merge rules of a YAML config, and prints the normalized text to stdout.
//!
//! Usage: `metricset-tool <config.yaml> [input | -]`

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use metricset_core::error::{MetricSetError, Result};
use metricset_core::Diagnostics;
use metricset_tool::cli::Cli;
use metricset_tool::{config, logging, pipeline};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("metricset-tool: {} ({})", e, e.code().as_str());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let cfg = config::load_from_file(&cli.config)?;
    logging::init(&cfg.log)?;

    let input = read_input(cli)?;
    tracing::info!(config = %cli.config, input = %cli.input, bytes = input.len(), "metricset-tool starting");

    let coll = pipeline::run(&cfg, &input, Diagnostics::default());
    tracing::info!(metrics = coll.len(), "writing exposition");

    io::stdout()
        .lock()
        .write_all(coll.serialize().as_bytes())
        .map_err(|e| MetricSetError::Io(format!("write stdout failed: {e}")))
}

fn read_input(cli: &Cli) -> Result<String> {
    if cli.reads_stdin() {
        let mut s = String::new();
        io::stdin()
            .read_to_string(&mut s)
            .map_err(|e| MetricSetError::Io(format!("read stdin failed: {e}")))?;
        return Ok(s);
    }
    let path = &cli.input;
    std::fs::read_to_string(path).map_err(|e| MetricSetError::Io(format!("read {path} failed: {e}")))
}
