//! Ordered representation handed to the text renderer.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::instance::Instance;
use crate::model::kind::MetricType;

/// Body of one entry: `{type, help, instances, comments}`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricRepr<'a> {
    #[serde(rename = "type")]
    pub kind: &'a MetricType,
    /// Empty when the metric never got help text.
    pub help: &'a str,
    pub instances: &'a [Instance],
    pub comments: &'a [String],
}

/// Ordered `name -> MetricRepr` mapping (serializes as a map).
#[derive(Debug, Clone, Default)]
pub struct Representation<'a> {
    entries: Vec<(&'a str, MetricRepr<'a>)>,
}

impl<'a> Representation<'a> {
    pub(crate) fn push(&mut self, name: &'a str, body: MetricRepr<'a>) {
        self.entries.push((name, body));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MetricRepr<'a>> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, b)| b)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &MetricRepr<'a>)> {
        self.entries.iter().map(|(n, b)| (*n, b))
    }
}

impl Serialize for Representation<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, body) in &self.entries {
            map.serialize_entry(name, body)?;
        }
        map.end()
    }
}
