//! One observation of a metric.

use serde::Serialize;

use crate::diag::Diagnostics;
use crate::model::labels::Labels;
use crate::model::names::{is_valid_label_name, LABEL_NAME_PATTERN};
use crate::model::value::Value;

/// Single sample: name, value and the labels identifying it.
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    name: String,
    value: Value,
    labels: Labels,
}

impl Instance {
    /// Build an instance. Invalid label keys are reported, never refused.
    pub fn new(name: impl Into<String>, value: Value, labels: Labels, diag: &Diagnostics) -> Self {
        let name = name.into();
        for key in labels.keys() {
            if !is_valid_label_name(key) {
                diag.error(
                    &name,
                    format!("label name \"{key}\" does not match {LABEL_NAME_PATTERN}"),
                );
            }
        }
        Self { name, value, labels }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Only called by the owning metric when it is renamed.
    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Same name and labels; the value is not compared.
    pub fn same(&self, other: &Instance) -> bool {
        self.name == other.name && self.labels == other.labels
    }
}

/// Full equality: [`Instance::same`] and an equal value.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.same(other) && self.value == other.value
    }
}
