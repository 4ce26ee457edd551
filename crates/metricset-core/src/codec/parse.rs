//! Text exposition parsing.
//!
//! Recognized line shapes:
//! - `# HELP <name> <text>`
//! - `# TYPE <name> <type>`
//! - `# <comment>`
//! - `<name>{labels} <value> [timestamp]` or `<name> <value> [timestamp]`
//!
//! Blank lines separate blocks and are otherwise ignored. Lines that fit none
//! of the shapes are reported and skipped. Parsing never fails as a whole.

use std::collections::HashSet;

use crate::codec::escape::{decode_comment, decode_oneliner, unescape_label_value};
use crate::diag::{Diagnostics, Severity};
use crate::model::names::{is_valid_label_name, is_valid_metric_name};
use crate::model::{Collection, Declare, Labels, MetricType, Value};

#[derive(Debug)]
enum Line<'a> {
    Blank,
    Help { name: &'a str, text: &'a str },
    Type { name: &'a str, kind: &'a str },
    Comment(&'a str),
    Sample(Sample<'a>),
}

#[derive(Debug)]
struct Sample<'a> {
    name: &'a str,
    labels: Labels,
    value: Value,
}

/// Metadata collected for the block being read, applied on first sample or
/// when the block ends.
#[derive(Debug)]
struct Block {
    name: String,
    help: Option<String>,
    kind: Option<MetricType>,
    comments: Vec<String>,
    materialized: bool,
}

impl Block {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            help: None,
            kind: None,
            comments: Vec::new(),
            materialized: false,
        }
    }
}

struct Loader<'c> {
    coll: &'c mut Collection,
    diag: Diagnostics,
    dismiss_comments: bool,
    pending: Vec<String>,
    block: Option<Block>,
    help_seen: HashSet<String>,
    type_seen: HashSet<String>,
}

pub(crate) fn load_into(coll: &mut Collection, text: &str, dismiss_comments: bool) {
    let diag = coll.diagnostics().clone();
    let mut loader = Loader {
        coll,
        diag,
        dismiss_comments,
        pending: Vec::new(),
        block: None,
        help_seen: HashSet::new(),
        type_seen: HashSet::new(),
    };
    for (idx, raw) in text.lines().enumerate() {
        match classify(raw) {
            Ok(Line::Blank) => {}
            Ok(Line::Help { name, text }) => loader.on_help(name, text),
            Ok(Line::Type { name, kind }) => loader.on_type(name, kind),
            Ok(Line::Comment(text)) => loader.on_comment(text),
            Ok(Line::Sample(s)) => loader.on_sample(s),
            Err(reason) => loader.diag.emit(
                Severity::Warning,
                None,
                format!("ignoring line {}: {reason}", idx + 1),
            ),
        }
    }
    loader.finish();
}

impl Loader<'_> {
    fn on_comment(&mut self, text: &str) {
        if self.dismiss_comments {
            return;
        }
        self.pending.push(decode_comment(text, &self.diag));
    }

    fn on_help(&mut self, name: &str, text: &str) {
        self.enter(name);
        if !self.help_seen.insert(name.to_string()) {
            self.diag.error(
                name,
                format!("duplicate HELP for `{name}`, ignoring: {text}"),
            );
            return;
        }
        if text.is_empty() {
            return;
        }
        let help = decode_oneliner(text, &self.diag);
        match self.block.as_mut() {
            Some(b) if !b.materialized => b.help = Some(help),
            _ => self.coll.declare(name, Declare::new().help(help)),
        }
    }

    fn on_type(&mut self, name: &str, kind: &str) {
        self.enter(name);
        if !self.type_seen.insert(name.to_string()) {
            self.diag.error(
                name,
                format!("duplicate TYPE for `{name}`, ignoring: {kind}"),
            );
            return;
        }
        let kind = MetricType::from(kind);
        match self.block.as_mut() {
            Some(b) if !b.materialized => b.kind = Some(kind),
            _ => self.coll.declare(name, Declare::new().kind(kind)),
        }
    }

    fn on_sample(&mut self, sample: Sample<'_>) {
        self.enter(sample.name);
        self.materialize();
        self.coll
            .get_or_create(sample.name)
            .add_instance(sample.value, sample.labels);
    }

    /// Make `name` the current block and hand it the pending comments.
    fn enter(&mut self, name: &str) {
        if self.block.as_ref().map(|b| b.name.as_str()) != Some(name) {
            self.materialize();
            self.block = Some(Block::new(name));
        }
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        let Some(block) = self.block.as_mut() else {
            return;
        };
        if block.materialized {
            if let Some(m) = self.coll.get_mut(&block.name) {
                for c in pending {
                    m.add_comment(c);
                }
            }
        } else {
            block.comments.extend(pending);
        }
    }

    /// Declare the current block's metric in the collection (once).
    fn materialize(&mut self) {
        let Some(block) = self.block.as_mut() else {
            return;
        };
        if block.materialized {
            return;
        }
        block.materialized = true;

        let name = block.name.as_str();
        if !self.coll.contains(name) && block.kind.is_none() {
            self.diag
                .info(name, format!("no TYPE line for `{name}`, using the default"));
            if !self.help_seen.contains(name) {
                self.diag
                    .info(name, format!("neither TYPE nor HELP given for `{name}`"));
            }
        }

        let decl = Declare {
            help: block.help.take(),
            kind: block.kind.take(),
            ..Declare::default()
        };
        self.coll.declare(name, decl);
        if let Some(m) = self.coll.get_mut(name) {
            for c in block.comments.drain(..) {
                m.add_comment(c);
            }
        }
    }

    fn finish(&mut self) {
        self.materialize();
        if !self.pending.is_empty() {
            self.diag.emit(
                Severity::Warning,
                None,
                format!(
                    "dropping {} trailing comment(s) not followed by a metric",
                    self.pending.len()
                ),
            );
            self.pending.clear();
        }
    }
}

fn classify(line: &str) -> Result<Line<'_>, String> {
    if line.trim().is_empty() {
        return Ok(Line::Blank);
    }
    if let Some(rest) = line.strip_prefix('#') {
        let body = rest.strip_prefix(' ').unwrap_or(rest);
        if let Some(meta) = body.strip_prefix("HELP ") {
            let (name, text) = split_name(meta)?;
            return Ok(Line::Help { name, text });
        }
        if let Some(meta) = body.strip_prefix("TYPE ") {
            let (name, kind) = split_name(meta)?;
            if kind.is_empty() {
                return Err(format!("TYPE line for `{name}` names no type"));
            }
            return Ok(Line::Type { name, kind });
        }
        return Ok(Line::Comment(body));
    }
    parse_sample(line).map(Line::Sample)
}

fn split_name(meta: &str) -> Result<(&str, &str), String> {
    let meta = meta.trim();
    let (name, rest) = match meta.split_once(char::is_whitespace) {
        Some((n, r)) => (n, r.trim()),
        None => (meta, ""),
    };
    if !is_valid_metric_name(name) {
        return Err(format!("invalid metric name `{name}`"));
    }
    Ok((name, rest))
}

fn parse_sample(line: &str) -> Result<Sample<'_>, String> {
    let line = line.trim();
    let name_end = line
        .find(|c: char| c == '{' || c.is_whitespace())
        .ok_or_else(|| format!("sample `{line}` has no value"))?;
    let (name, mut rest) = line.split_at(name_end);
    if !is_valid_metric_name(name) {
        return Err(format!("invalid metric name `{name}`"));
    }

    let labels = match rest.strip_prefix('{') {
        Some(inner) => {
            let (labels, after) = parse_labels(inner)?;
            rest = after;
            labels
        }
        None => Labels::new(),
    };

    let mut tokens = rest.split_whitespace();
    let value = tokens
        .next()
        .ok_or_else(|| format!("sample `{name}` has no value"))?
        .parse::<Value>()
        .map_err(|e| e.to_string())?;
    if let Some(ts) = tokens.next() {
        if ts.parse::<i64>().is_err() {
            return Err(format!("invalid timestamp `{ts}`"));
        }
    }
    if tokens.next().is_some() {
        return Err(format!("trailing data after sample `{name}`"));
    }
    Ok(Sample {
        name,
        labels,
        value,
    })
}

/// Parse `k="v",...}`; returns the labels and what follows the `}`.
fn parse_labels(s: &str) -> Result<(Labels, &str), String> {
    let mut labels = Labels::new();
    let mut rest = s;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix('}') {
            return Ok((labels, after));
        }
        let (key, after_key) = rest
            .split_once('=')
            .ok_or_else(|| "label without `=`".to_string())?;
        let key = key.trim();
        if !is_valid_label_name(key) {
            return Err(format!("invalid label name `{key}`"));
        }
        let quoted = after_key
            .trim_start()
            .strip_prefix('"')
            .ok_or_else(|| format!("value of label `{key}` is not quoted"))?;
        let end = closing_quote(quoted)
            .ok_or_else(|| format!("unterminated value of label `{key}`"))?;
        let (raw, after_value) = quoted.split_at(end);
        labels.insert(key, unescape_label_value(raw));

        rest = after_value.strip_prefix('"').unwrap_or(after_value).trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after;
        } else if !rest.starts_with('}') {
            return Err(format!("expected `,` or `}}` after label `{key}`"));
        }
    }
}

fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}
