//! Identifier patterns of the exposition format.

use std::sync::OnceLock;

use regex::Regex;

/// Metric name pattern.
pub const METRIC_NAME_PATTERN: &str = "^[a-zA-Z_:][a-zA-Z0-9_:]*$";
/// Label key pattern.
pub const LABEL_NAME_PATTERN: &str = "^[a-zA-Z_][a-zA-Z0-9_]*$";

static METRIC_NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();
static LABEL_NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(cell: &OnceLock<Option<Regex>>, pattern: &str, s: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}

pub fn is_valid_metric_name(name: &str) -> bool {
    matches(&METRIC_NAME_RE, METRIC_NAME_PATTERN, name)
}

pub fn is_valid_label_name(name: &str) -> bool {
    matches(&LABEL_NAME_RE, LABEL_NAME_PATTERN, name)
}
