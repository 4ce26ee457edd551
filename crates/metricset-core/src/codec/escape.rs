//! Escaping for comment/help text and label values.

use crate::diag::{Diagnostics, Severity};

/// Escape `\`, newline and carriage return so `s` fits on one physical line.
pub fn encode_oneliner(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Reverse [`encode_oneliner`].
///
/// Input must be a single physical line; anything containing a real newline
/// is reported and returned unchanged.
pub fn decode_oneliner(s: &str, diag: &Diagnostics) -> String {
    if s.contains('\n') {
        diag.emit(
            Severity::Error,
            None,
            format!("refusing to decode text spanning several lines: {s:?}"),
        );
        return s.to_string();
    }
    unescape(s, |c| match c {
        '\\' => Some('\\'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        _ => None,
    })
}

// Comment bodies that would read back as a HELP or TYPE line.
const META_PREFIXES: [&str; 2] = ["HELP ", "TYPE "];

/// Encode a free-form comment body.
///
/// Like [`encode_oneliner`], plus a leading `\` when the text starts like a
/// HELP or TYPE line. `encode_oneliner` never puts a lone backslash in
/// front of `H` or `T`, so the marker cannot collide with escaped text.
pub fn encode_comment(s: &str) -> String {
    let enc = encode_oneliner(s);
    if META_PREFIXES.iter().any(|p| enc.starts_with(p)) {
        format!("\\{enc}")
    } else {
        enc
    }
}

/// Reverse [`encode_comment`].
pub fn decode_comment(s: &str, diag: &Diagnostics) -> String {
    let body = s
        .strip_prefix('\\')
        .filter(|rest| META_PREFIXES.iter().any(|p| rest.starts_with(p)))
        .unwrap_or(s);
    decode_oneliner(body, diag)
}

/// Escape a label value for use between double quotes.
pub fn escape_label_value(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

pub(crate) fn unescape_label_value(v: &str) -> String {
    unescape(v, |c| match c {
        '\\' => Some('\\'),
        '"' => Some('"'),
        'n' => Some('\n'),
        _ => None,
    })
}

// Unknown escapes are kept verbatim, backslash included.
fn unescape(s: &str, map: impl Fn(char) -> Option<char>) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => match map(next) {
                Some(m) => out.push(m),
                None => {
                    out.push('\\');
                    out.push(next);
                }
            },
            None => out.push('\\'),
        }
    }
    out
}
