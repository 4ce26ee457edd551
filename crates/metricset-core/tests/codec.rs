//! Rendering, parsing and escaping.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metricset_core::codec::{
    decode_comment, decode_oneliner, encode_comment, encode_oneliner, escape_label_value,
};
use metricset_core::{Collection, Declare, Diagnostics, Labels, MetricType, Severity, Value};

use fixture::{build, EXPOSITION, NAMES};

#[test]
fn renders_example_collection() {
    let mc = build(Diagnostics::default());
    assert_eq!(mc.serialize(), EXPOSITION);
    assert_eq!(mc.to_string(), EXPOSITION);
}

#[test]
fn concrete_scenario() {
    let name = "example_job_1_result_unit";
    let mut mc = Collection::new();
    mc.declare(name, Declare::new().help("job result").kind("counter"));
    mc.declare(name, Declare::sample(1, [("label1", "v1")]));
    mc.declare(name, Declare::sample(19, Labels::new()));

    assert_eq!(
        mc.serialize(),
        "# HELP example_job_1_result_unit job result\n\
         # TYPE example_job_1_result_unit counter\n\
         example_job_1_result_unit{label1=\"v1\"} 1\n\
         example_job_1_result_unit{} 19\n"
    );
}

#[test]
fn renders_comments_escaped_before_help() {
    let mut mc = build(Diagnostics::default());
    let comments = [
        "This is a multiline\ncomment ...",
        "This is a comment with a backslash \\ in it",
    ];
    let expected_lines: Vec<String> = comments
        .iter()
        .map(|c| format!("# {}", c.replace('\\', "\\\\").replace('\n', "\\n")))
        .collect();
    for c in comments {
        mc.get_mut(NAMES[0]).unwrap().add_comment(c);
    }

    let mut lines: Vec<String> = EXPOSITION.lines().map(str::to_string).collect();
    lines.splice(0..0, expected_lines.iter().cloned());
    assert_eq!(mc.serialize(), lines.join("\n") + "\n");

    let m = mc.get_mut(NAMES[0]).unwrap();
    assert_eq!(m.comments().len(), 2);
    assert_eq!(m.pop_comment(1).unwrap(), comments[1]);

    let mut lines: Vec<String> = EXPOSITION.lines().map(str::to_string).collect();
    lines.splice(0..0, expected_lines[..1].iter().cloned());
    assert_eq!(mc.serialize(), lines.join("\n") + "\n");
}

#[test]
fn bare_help_line_without_help_text() {
    let mut mc = Collection::new();
    mc.declare("no_help", Declare::sample(0, Labels::new()));
    assert_eq!(
        mc.serialize(),
        "# HELP no_help\n# TYPE no_help gauge\nno_help{} 0\n"
    );
}

#[test]
fn empty_collection_renders_single_newline() {
    let text = Collection::new().serialize();
    assert_eq!(text, "\n");
    let back = Collection::from_text(&text, Diagnostics::default(), false);
    assert!(back.is_empty());
    assert_eq!(back.serialize(), text);
}

#[test]
fn label_values_and_special_floats() {
    let mut mc = Collection::new();
    mc.declare(
        "weird",
        Declare::sample(f64::NAN, [("path", "C:\\tmp"), ("quote", "say \"hi\"")]).help("h"),
    );
    mc.declare("weird", Declare::sample(f64::INFINITY, [("nl", "a\nb")]));
    mc.declare("weird", Declare::sample(f64::NEG_INFINITY, Labels::new()));
    mc.declare("weird", Declare::sample(-3, [("n", "neg")]));

    let text = mc.serialize();
    assert_eq!(
        text,
        "# HELP weird h\n\
         # TYPE weird gauge\n\
         weird{path=\"C:\\\\tmp\",quote=\"say \\\"hi\\\"\"} NaN\n\
         weird{nl=\"a\\nb\"} +Inf\n\
         weird{} -Inf\n\
         weird{n=\"neg\"} -3\n"
    );

    let back = Collection::from_text(&text, Diagnostics::default(), false);
    let m = back.get("weird").unwrap();
    assert_eq!(m[0].labels().get("path"), Some("C:\\tmp"));
    assert_eq!(m[0].labels().get("quote"), Some("say \"hi\""));
    assert_eq!(m[1].labels().get("nl"), Some("a\nb"));
    assert!(m[0].value().as_f64().is_nan());
    assert_eq!(m[1].value(), Value::Float(f64::INFINITY));
    assert_eq!(back.serialize(), text);
}

#[test]
fn round_trip_of_built_collection() {
    let mut mc = build(Diagnostics::default());
    mc.get_mut(NAMES[2]).unwrap().add_comment("multi\nline \\ comment");
    mc.declare("untyped_thing", Declare::new().kind("untyped"));

    let text = mc.serialize();
    let back = Collection::from_text(&text, Diagnostics::default(), false);
    assert_eq!(back.serialize(), text);
    assert_eq!(back.names().collect::<Vec<_>>(), mc.names().collect::<Vec<_>>());
    assert_eq!(
        back.get(NAMES[2]).unwrap().comments(),
        ["multi\nline \\ comment"]
    );
}

#[test]
fn comments_that_look_like_metadata_round_trip() {
    let (diag, rec) = Diagnostics::recording();
    let mut mc = Collection::with_diagnostics(diag.clone());
    mc.declare("up", Declare::sample(1, Labels::new()).help("target up"));
    let comments = ["HELP other_metric", "TYPE x gauge", "TYPE 1bad", "HELP", "\\HELP y"];
    for c in comments {
        mc.get_mut("up").unwrap().add_comment(c);
    }

    let text = mc.serialize();
    assert!(text.starts_with(
        "# \\HELP other_metric\n# \\TYPE x gauge\n# \\TYPE 1bad\n# HELP\n# \\\\HELP y\n"
    ));

    rec.clear();
    let back = Collection::from_text(&text, diag, false);
    assert_eq!(back.names().collect::<Vec<_>>(), ["up"]);
    assert_eq!(back.get("up").unwrap().comments(), comments);
    assert_eq!(back.serialize(), text);
    assert!(rec.messages(Severity::Warning).is_empty());
    assert!(rec.messages(Severity::Error).is_empty());
}

#[test]
fn carriage_return_in_comment_survives() {
    let mut mc = Collection::new();
    mc.declare("m", Declare::sample(1, Labels::new()).help("h"));
    mc.get_mut("m").unwrap().add_comment("ends with cr\r");

    let text = mc.serialize();
    assert!(text.starts_with("# ends with cr\\r\n"));
    let back = Collection::from_text(&text, Diagnostics::default(), false);
    assert_eq!(back.get("m").unwrap().comments(), ["ends with cr\r"]);
}

#[test]
fn load_reads_bare_samples_and_defaults_type() {
    let (diag, rec) = Diagnostics::recording();
    let mc = Collection::from_text("bare_metric 12\nbare_metric{a=\"b\"} 1.5 1700000000\n", diag, false);

    let m = mc.get("bare_metric").unwrap();
    assert_eq!(m.kind(), &MetricType::Gauge);
    assert_eq!(m.len(), 2);
    assert_eq!(m[0].value(), Value::Int(12));
    assert_eq!(m[1].value(), Value::Float(1.5));

    let info = rec.messages(Severity::Info);
    assert!(info.contains(&"no TYPE line for `bare_metric`, using the default".to_string()));
    assert!(info.contains(&"neither TYPE nor HELP given for `bare_metric`".to_string()));
}

#[test]
fn load_keeps_first_help_and_type() {
    let (diag, rec) = Diagnostics::recording();
    let text = "# HELP m first\n# HELP m second\n# TYPE m counter\n# TYPE m gauge\nm{} 1\n";
    let mc = Collection::from_text(text, diag, false);

    let m = mc.get("m").unwrap();
    assert_eq!(m.help(), Some("first"));
    assert_eq!(m.kind(), &MetricType::Counter);

    let errors = rec.messages(Severity::Error);
    assert!(errors.contains(&"duplicate HELP for `m`, ignoring: second".to_string()));
    assert!(errors.contains(&"duplicate TYPE for `m`, ignoring: gauge".to_string()));
}

#[test]
fn load_can_dismiss_comments() {
    let text = "# note\n# HELP m h\n# TYPE m gauge\nm{} 1\n";
    let kept = Collection::from_text(text, Diagnostics::default(), false);
    assert_eq!(kept.get("m").unwrap().comments(), ["note"]);

    let dismissed = Collection::from_text(text, Diagnostics::default(), true);
    assert!(dismissed.get("m").unwrap().comments().is_empty());
    assert_eq!(dismissed.serialize(), "# HELP m h\n# TYPE m gauge\nm{} 1\n");
}

#[test]
fn load_skips_malformed_lines() {
    let (diag, rec) = Diagnostics::recording();
    let text = "good{} 1\n=bad 2\ngood{x=\"1\" 3\ngood{x=1} 4\ngood{} notanumber\n";
    let mc = Collection::from_text(text, diag, false);

    assert_eq!(mc.len(), 1);
    assert_eq!(mc.get("good").unwrap().len(), 1);
    let skipped = rec
        .messages(Severity::Warning)
        .into_iter()
        .filter(|w| w.starts_with("ignoring line"))
        .count();
    assert_eq!(skipped, 4);
}

#[test]
fn load_merges_into_existing_collection() {
    let (diag, rec) = Diagnostics::recording();
    let mut mc = Collection::with_diagnostics(diag);
    mc.declare("m", Declare::sample(1, [("a", "1")]).help("h"));

    rec.clear();
    mc.load("# TYPE m counter\nm{a=\"1\"} 5\nm{a=\"2\"} 6\n", false);

    let m = mc.get("m").unwrap();
    assert_eq!(m.kind(), &MetricType::Counter);
    assert_eq!(m.len(), 2);
    assert_eq!(m[0].value(), Value::Int(5));
    assert!(rec
        .messages(Severity::Warning)
        .contains(&"changed type for metric `m`".to_string()));
}

#[test]
fn escape_law() {
    let diag = Diagnostics::default();
    for s in [
        "",
        "plain",
        "back\\slash",
        "trailing\\",
        "\\n is not a newline",
        "line one\nline two",
        "crlf\r\n",
        "\\\\\\",
        "“unicode” ✓",
    ] {
        let enc = encode_oneliner(s);
        assert!(!enc.contains('\n'));
        assert_eq!(decode_oneliner(&enc, &diag), s, "input={s:?}");
    }
}

#[test]
fn comment_escape_law() {
    let diag = Diagnostics::default();
    for s in ["HELP a b", "TYPE a", "\\TYPE a", "HELPER", " HELP a", "plain\nHELP a"] {
        let enc = encode_comment(s);
        assert!(!enc.starts_with("HELP ") && !enc.starts_with("TYPE "), "input={s:?}");
        assert_eq!(decode_comment(&enc, &diag), s, "input={s:?}");
    }
}

#[test]
fn decode_refuses_multiline_input() {
    let (diag, rec) = Diagnostics::recording();
    let input = "two\nlines";
    assert_eq!(decode_oneliner(input, &diag), input);
    assert_eq!(rec.messages(Severity::Error).len(), 1);
}

#[test]
fn label_value_escaping() {
    assert_eq!(escape_label_value("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
}
