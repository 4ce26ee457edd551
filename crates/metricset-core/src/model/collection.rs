//! The metric set: ordered `name -> Metric` mapping.
//!
//! Every mutation goes through here. Metrics spring into existence the first
//! time their name is declared and only disappear through rename or merge.

use std::fmt;

use crate::codec;
use crate::diag::Diagnostics;
use crate::model::kind::MetricType;
use crate::model::labels::Labels;
use crate::model::metric::Metric;
use crate::model::repr::Representation;
use crate::model::value::Value;

/// Arguments of [`Collection::declare`]. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct Declare {
    pub value: Option<Value>,
    pub labels: Labels,
    pub help: Option<String>,
    pub kind: Option<MetricType>,
}

impl Declare {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a sample with the given labels.
    pub fn sample(value: impl Into<Value>, labels: impl Into<Labels>) -> Self {
        Self::new().value(value).labels(labels)
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn labels(mut self, labels: impl Into<Labels>) -> Self {
        self.labels = labels.into();
        self
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key, value);
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<MetricType>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// Ordered set of metrics. Insertion order is the output order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    metrics: Vec<Metric>,
    diag: Diagnostics,
}

impl Collection {
    /// Empty collection reporting through `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostics(diag: Diagnostics) -> Self {
        Self {
            metrics: Vec::new(),
            diag,
        }
    }

    /// Parse exposition text into a fresh collection.
    pub fn from_text(text: &str, diag: Diagnostics, dismiss_comments: bool) -> Self {
        let mut c = Self::with_diagnostics(diag);
        c.load(text, dismiss_comments);
        c
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Metric> {
        self.metrics.iter_mut().find(|m| m.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(Metric::name)
    }

    /// Metric called `name`, created as an empty gauge shell if missing.
    pub fn get_or_create(&mut self, name: &str) -> &mut Metric {
        let idx = self.ensure(name.trim(), None, None);
        &mut self.metrics[idx]
    }

    /// Create-or-update a metric, optionally adding a sample.
    ///
    /// A new name becomes a metric of the given type (gauge if none). On a
    /// known name, help and type are replaced when given and existing
    /// instances are left alone. Without a value only the metadata is
    /// touched, which is how TYPE/HELP get declared before any sample.
    pub fn declare(&mut self, name: &str, decl: Declare) {
        let Declare {
            value,
            labels,
            help,
            kind,
        } = decl;
        let name = name.trim();
        let idx = self.ensure(name, help, kind);
        if let Some(v) = value {
            self.metrics[idx].add_instance(v, labels);
        }
    }

    fn ensure(&mut self, name: &str, help: Option<String>, kind: Option<MetricType>) -> usize {
        if let Some(idx) = self.position(name) {
            let m = &mut self.metrics[idx];
            if let Some(h) = help {
                m.set_help(&h);
                self.diag.info(name, format!("changed help for metric `{name}`"));
            }
            if let Some(k) = kind {
                m.set_type(k);
                self.diag.warn(name, format!("changed type for metric `{name}`"));
            }
            return idx;
        }

        let kind = kind.unwrap_or_else(|| {
            let k = MetricType::default();
            self.diag
                .info(name, format!("defaulting type to `{k}` for new metric `{name}`"));
            k
        });
        if help.is_none() {
            self.diag
                .warn(name, format!("no help text given for new metric `{name}`"));
        }
        self.metrics
            .push(Metric::new(name, help.as_deref(), kind, self.diag.clone()));
        self.diag.debug(name, format!("added new metric `{name}`"));
        self.metrics.len() - 1
    }

    pub fn set_help(&mut self, name: &str, help: &str) {
        match self.get_mut(name) {
            Some(m) => m.set_help(help),
            None => self
                .diag
                .error(name, format!("cannot set help of unknown metric `{name}`")),
        }
    }

    pub fn set_type(&mut self, name: &str, kind: impl Into<MetricType>) {
        match self.get_mut(name) {
            Some(m) => m.set_type(kind),
            None => self
                .diag
                .error(name, format!("cannot set type of unknown metric `{name}`")),
        }
    }

    /// Rename `old` to `new`.
    ///
    /// If `new` already exists, nothing happens unless `force` is set, in
    /// which case `old` is merged into `new` (see [`Collection::merge_metrics`]).
    /// Returns whether the collection changed.
    pub fn rename_metrics(&mut self, old: &str, new: &str, force: bool) -> bool {
        let new = new.trim();
        let Some(src) = self.position(old) else {
            self.diag
                .error(old, format!("cannot rename unknown metric `{old}`"));
            return false;
        };
        if old == new {
            self.diag
                .debug(old, format!("rename of `{old}` onto itself ignored"));
            return false;
        }
        match self.position(new) {
            None => {
                self.metrics[src].set_name(new);
                self.diag.debug(new, format!("renamed metric `{old}` to `{new}`"));
                true
            }
            Some(_) if !force => {
                self.diag.error(
                    old,
                    format!("cannot rename `{old}` to `{new}`: target exists (use force to merge)"),
                );
                false
            }
            Some(_) => self.fold(new, src),
        }
    }

    /// Fold `src` into `dest`: instances of `src` move over (renamed), `dest`
    /// keeps its own help and type, `src` disappears. A missing `dest` turns
    /// this into a plain rename. Returns whether the collection changed.
    pub fn merge_metrics(&mut self, dest: &str, src: &str) -> bool {
        let dest = dest.trim();
        let Some(src_idx) = self.position(src) else {
            self.diag
                .error(src, format!("cannot merge unknown metric `{src}` into `{dest}`"));
            return false;
        };
        if dest == src {
            self.diag
                .debug(src, format!("merge of `{src}` into itself ignored"));
            return false;
        }
        if !self.contains(dest) {
            self.diag.warn(
                src,
                format!("merge target `{dest}` does not exist, renaming `{src}` instead"),
            );
            return self.rename_metrics(src, dest, false);
        }
        self.fold(dest, src_idx)
    }

    fn fold(&mut self, dest: &str, src_idx: usize) -> bool {
        let src = self.metrics.remove(src_idx);
        let src_name = src.name().to_string();
        let Some(target) = self.get_mut(dest) else {
            // `dest` was checked by both callers; put `src` back untouched.
            self.metrics.insert(src_idx, src);
            return false;
        };
        target.absorb(src);
        self.diag
            .info(dest, format!("merged metric `{src_name}` into `{dest}`"));
        true
    }

    /// Ordered `{name -> {type, help, instances, comments}}` for every metric.
    pub fn prepare(&self) -> Representation<'_> {
        let mut repr = Representation::default();
        for m in &self.metrics {
            repr.push(m.name(), m.repr_body());
        }
        repr
    }

    /// Render the collection in the text exposition format.
    pub fn serialize(&self) -> String {
        codec::render(&self.prepare())
    }

    /// Parse exposition text into this collection.
    ///
    /// Known metrics are updated the same way [`Collection::declare`] does.
    /// With `dismiss_comments`, free-form comments are skipped.
    pub fn load(&mut self, text: &str, dismiss_comments: bool) {
        codec::load_into(self, text, dismiss_comments);
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m.name() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
