//! Text exposition rendering.
//!
//! Layout per metric block, blocks separated by one blank line:
//!
//! ```text
//! # <comment>
//! # HELP <name> <help>
//! # TYPE <name> <type>
//! <name>{k="v",...} <value>
//! ```
//!
//! Labels keep insertion order; an instance without labels renders as
//! `<name>{} <value>`. `# HELP <name>` is written bare when there is no help.
//! Comments that start like a HELP or TYPE line get a leading `\`.

use std::fmt::Write;

use crate::codec::escape::{encode_comment, encode_oneliner, escape_label_value};
use crate::model::{Instance, Representation};

/// Render a prepared representation. The result always ends in exactly one
/// newline, so an empty representation gives `"\n"`.
pub fn render(repr: &Representation<'_>) -> String {
    if repr.is_empty() {
        return "\n".to_string();
    }
    let mut out = String::new();
    for (i, (name, body)) in repr.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for c in body.comments {
            let _ = writeln!(out, "# {}", encode_comment(c));
        }
        if body.help.is_empty() {
            let _ = writeln!(out, "# HELP {name}");
        } else {
            let _ = writeln!(out, "# HELP {name} {}", encode_oneliner(body.help));
        }
        let _ = writeln!(out, "# TYPE {name} {}", body.kind);
        for inst in body.instances {
            render_sample(inst, &mut out);
        }
    }
    out
}

fn render_sample(inst: &Instance, out: &mut String) {
    let label_str = inst
        .labels()
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect::<Vec<_>>()
        .join(",");
    let _ = writeln!(out, "{}{{{}}} {}", inst.name(), label_str, inst.value());
}
