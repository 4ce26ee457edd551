//! Tracing subscriber setup.
//!
//! Diagnostics of the core arrive here as `tracing` events; they are written
//! to stderr so stdout carries only the exposition text.

use tracing_subscriber::{fmt, EnvFilter};

use metricset_core::error::{MetricSetError, Result};

use crate::config::{LogFormat, LogSection};

/// `RUST_LOG` wins over the configured level.
pub fn init(cfg: &LogSection) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&cfg.level).map_err(|_| {
            MetricSetError::InvalidConfig(format!("invalid log.level: {}", cfg.level))
        })?,
    };

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let res = match cfg.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    res.map_err(|e| MetricSetError::Internal(format!("logger init failed: {e}")))
}
