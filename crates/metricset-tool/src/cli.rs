//! Command line of the `metricset-tool` binary.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "metricset-tool",
    about = "Normalize Prometheus text exposition with declare/rename/merge rules"
)]
pub struct Cli {
    /// YAML config file.
    pub config: String,
    /// Exposition text to read; `-` reads stdin.
    #[arg(default_value = "-")]
    pub input: String,
}

impl Cli {
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}
