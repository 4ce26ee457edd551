use serde::Deserialize;
use metricset_core::error::{MetricSetError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    pub version: u32,

    #[serde(default)]
    pub log: LogSection,

    #[serde(default)]
    pub load: LoadSection,

    /// Applied first, in order.
    #[serde(default)]
    pub declare: Vec<DeclareRule>,

    /// Applied after `declare`, in order.
    #[serde(default)]
    pub rename: Vec<RenameRule>,

    /// Applied last, in order.
    #[serde(default)]
    pub merge: Vec<MergeRule>,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricSetError::UnsupportedVersion);
        }
        for d in &self.declare {
            if d.name.trim().is_empty() {
                return Err(MetricSetError::InvalidConfig(
                    "declare.name must not be empty".into(),
                ));
            }
        }
        for r in &self.rename {
            r.validate()?;
        }
        for m in &self.merge {
            m.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LoadSection {
    /// Skip free-form `# ...` comments of the input.
    #[serde(default)]
    pub dismiss_comments: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclareRule {
    pub name: String,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub force: bool,
}

impl RenameRule {
    pub fn validate(&self) -> Result<()> {
        if self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Err(MetricSetError::InvalidConfig(
                "rename.from and rename.to must not be empty".into(),
            ));
        }
        if self.from == self.to {
            return Err(MetricSetError::InvalidConfig(format!(
                "rename of `{}` onto itself",
                self.from
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeRule {
    pub into: String,
    pub from: String,
}

impl MergeRule {
    pub fn validate(&self) -> Result<()> {
        if self.into.trim().is_empty() || self.from.trim().is_empty() {
            return Err(MetricSetError::InvalidConfig(
                "merge.into and merge.from must not be empty".into(),
            ));
        }
        if self.into == self.from {
            return Err(MetricSetError::InvalidConfig(format!(
                "merge of `{}` into itself",
                self.from
            )));
        }
        Ok(())
    }
}
