//! A named, typed group of instances.

use std::ops::Index;

use crate::diag::Diagnostics;
use crate::error::{MetricSetError, Result};
use crate::model::instance::Instance;
use crate::model::kind::MetricType;
use crate::model::labels::Labels;
use crate::model::names::{is_valid_metric_name, METRIC_NAME_PATTERN};
use crate::model::repr::{MetricRepr, Representation};
use crate::model::value::Value;

/// All instances sharing one metric name, plus the metric's metadata.
///
/// Instances are unique by label set: adding one whose labels match an
/// existing instance overwrites that instance's value in place.
#[derive(Debug, Clone)]
pub struct Metric {
    name: String,
    kind: MetricType,
    help: Option<String>,
    comments: Vec<String>,
    instances: Vec<Instance>,
    diag: Diagnostics,
}

impl Metric {
    pub(crate) fn new(
        name: &str,
        help: Option<&str>,
        kind: MetricType,
        diag: Diagnostics,
    ) -> Self {
        let m = Self {
            name: name.trim().to_string(),
            kind,
            help: help.map(|h| h.trim().to_string()),
            comments: Vec::new(),
            instances: Vec::new(),
            diag,
        };
        m.check_kind();
        m.check_name();
        m
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &MetricType {
        &self.kind
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index)
    }

    /// Add an instance, or overwrite the value of the one with the same labels.
    pub fn add_instance(&mut self, value: impl Into<Value>, labels: Labels) {
        let inst = Instance::new(self.name.clone(), value.into(), labels, &self.diag);
        self.push_instance(inst);
    }

    pub(crate) fn push_instance(&mut self, mut inst: Instance) {
        if inst.name() != self.name {
            inst.set_name(&self.name);
        }
        match self.instances.iter_mut().find(|e| e.same(&inst)) {
            Some(existing) => {
                self.diag.debug(
                    &self.name,
                    format!(
                        "update value of `{}` from `{}` to `{}`",
                        self.name,
                        existing.value(),
                        inst.value()
                    ),
                );
                existing.set_value(inst.value());
            }
            None => self.instances.push(inst),
        }
    }

    /// Set the type. Unknown types are reported and stored anyway.
    pub fn set_type(&mut self, kind: impl Into<MetricType>) {
        self.kind = kind.into();
        self.check_kind();
        self.check_counter_suffix();
    }

    /// Rename the metric and every instance it holds. Only the collection
    /// may call this, after checking the new name is free.
    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.check_name();
        for inst in &mut self.instances {
            inst.set_name(&self.name);
        }
    }

    pub fn set_help(&mut self, text: &str) {
        self.help = Some(text.trim().to_string());
    }

    /// Append a comment unless the exact text is already present.
    pub fn add_comment(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !self.comments.contains(&text) {
            self.comments.push(text);
        }
    }

    pub fn pop_comment(&mut self, index: usize) -> Result<String> {
        if index >= self.comments.len() {
            return Err(MetricSetError::OutOfRange {
                index,
                len: self.comments.len(),
            });
        }
        Ok(self.comments.remove(index))
    }

    /// `{name -> {type, help, instances, comments}}` for rendering.
    pub fn representation(&self) -> Representation<'_> {
        let mut repr = Representation::default();
        repr.push(&self.name, self.repr_body());
        repr
    }

    pub(crate) fn repr_body(&self) -> MetricRepr<'_> {
        MetricRepr {
            kind: &self.kind,
            help: self.help.as_deref().unwrap_or(""),
            instances: &self.instances,
            comments: &self.comments,
        }
    }

    /// Move everything of `src` into `self`. Own help and type are kept.
    pub(crate) fn absorb(&mut self, src: Metric) {
        if let Some(h) = src.help {
            if self.help.is_none() {
                self.diag.debug(
                    &self.name,
                    format!("`{}` has no help, taking it from `{}`", self.name, src.name),
                );
                self.help = Some(h);
            } else if self.help.as_deref() != Some(h.as_str()) {
                self.diag.info(
                    &self.name,
                    format!("discarding help of `{}` while merging into `{}`: {h}", src.name, self.name),
                );
            }
        }
        if self.kind != src.kind {
            self.diag.warn(
                &self.name,
                format!(
                    "discarding type `{}` of `{}` while merging into `{}` (kept `{}`)",
                    src.kind, src.name, self.name, self.kind
                ),
            );
        }
        for c in src.comments {
            self.add_comment(c);
        }
        for inst in src.instances {
            self.push_instance(inst);
        }
    }

    fn check_kind(&self) {
        if !self.kind.is_known() {
            self.diag.error(
                &self.name,
                format!(
                    "\"{}\" is not a valid type, expected one of {:?}",
                    self.kind,
                    MetricType::VALID
                ),
            );
        }
    }

    fn check_name(&self) {
        if !is_valid_metric_name(&self.name) {
            self.diag.error(
                &self.name,
                format!("metric name \"{}\" does not match {METRIC_NAME_PATTERN}", self.name),
            );
        }
        self.check_counter_suffix();
    }

    fn check_counter_suffix(&self) {
        if self.kind == MetricType::Counter && !self.name.ends_with("_total") {
            self.diag.warn(
                &self.name,
                format!("counter `{}` should carry the `_total` suffix", self.name),
            );
        }
    }
}

impl Index<usize> for Metric {
    type Output = Instance;

    fn index(&self, index: usize) -> &Instance {
        &self.instances[index]
    }
}
