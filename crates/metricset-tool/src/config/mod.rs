//! Rewrite-rule config for `metricset-tool`.
//!
//! One YAML document (`version: 1`) with the log setup, load options and the
//! `declare`, `rename` and `merge` rule lists applied by
//! [`crate::pipeline::run`]. Unknown keys are rejected and every rule is
//! validated before the file is accepted, so a bad config fails before any
//! input is read.

pub mod schema;

use std::fs;

use metricset_core::error::{MetricSetError, Result};

pub use schema::{DeclareRule, LoadSection, LogFormat, LogSection, MergeRule, RenameRule, ToolConfig};

pub fn load_from_file(path: &str) -> Result<ToolConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricSetError::Io(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ToolConfig> {
    let cfg: ToolConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricSetError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
