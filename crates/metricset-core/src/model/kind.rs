//! Metric types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Type of a metric as written on its `# TYPE` line.
///
/// Unknown strings are kept in [`MetricType::Other`] so they can be written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetricType {
    Counter,
    #[default]
    Gauge,
    Histogram,
    Summary,
    Untyped,
    Other(String),
}

impl MetricType {
    /// The types the exposition format defines.
    pub const VALID: [&'static str; 5] = ["counter", "gauge", "histogram", "summary", "untyped"];

    pub fn as_str(&self) -> &str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Histogram => "histogram",
            MetricType::Summary => "summary",
            MetricType::Untyped => "untyped",
            MetricType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MetricType::Other(_))
    }
}

impl FromStr for MetricType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "counter" => MetricType::Counter,
            "gauge" => MetricType::Gauge,
            "histogram" => MetricType::Histogram,
            "summary" => MetricType::Summary,
            "untyped" => MetricType::Untyped,
            other => MetricType::Other(other.to_string()),
        })
    }
}

impl From<&str> for MetricType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MetricType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
