//! metricset tool library entry.
//!
//! Wires the command line, the strict YAML config, logging setup and the
//! load/rewrite pipeline together. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod cli;
pub mod config;
pub mod logging;
pub mod pipeline;
