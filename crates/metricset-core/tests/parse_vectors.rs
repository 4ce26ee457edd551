//! Exposition parsing vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metricset_core::{Collection, Diagnostics, Severity};


#[test]
fn parse_vectors() {
    let files = [
        "parse_comment_attachment.json",
        "parse_help_type_conflict.json",
        "parse_dismiss_comments.json",
        "parse_interleaved_blocks.json",
        "parse_unknown_type.json",
    ];

    for f in files {
        let v = vector_loader::load(f);
        let (diag, rec) = Diagnostics::recording();
        let mc = Collection::from_text(&v.text(), diag, v.dismiss_comments);

        let got = serde_json::to_value(mc.prepare()).unwrap();
        assert_eq!(got, v.expect, "vector={}", v.description);

        let errors = rec.messages(Severity::Error);
        assert_eq!(errors.len(), v.errors, "vector={} errors={errors:?}", v.description);

        for ex in &v.expect_diagnostics {
            let hit = rec
                .records()
                .iter()
                .any(|d| d.severity.as_str() == ex.severity && d.message.contains(&ex.contains));
            assert!(hit, "vector={} missing {} diagnostic containing {:?}", v.description, ex.severity, ex.contains);
        }
    }
}

#[test]
fn parse_order_follows_first_appearance() {
    let v = vector_loader::load("parse_interleaved_blocks.json");
    let mc = Collection::from_text(&v.text(), Diagnostics::default(), false);
    assert_eq!(mc.names().collect::<Vec<_>>(), ["x", "y"]);
}
