//! Loading workspace descriptions and reporting their errors

use blockview::model::{parse_description, ModelError};
use blockview::{render, Colour, RenderError};
use pretty_assertions::assert_eq;

fn load_error(source: &str) -> ModelError {
    parse_description(source)
        .expect("description should parse")
        .into_workspace(Colour::BLACK)
        .unwrap_err()
}

#[test]
fn syntax_error_report_points_into_the_file() {
    let source = "[[block]]\nid = \n";
    let err = render(source).unwrap_err();
    assert!(matches!(err, RenderError::Parse(_)));
    let report = err.format(source, "broken.toml");
    assert!(report.contains("broken.toml"));
}

#[test]
fn unknown_field_type_is_a_syntax_error() {
    let source = r#"
[[block]]
id = "a"
[[block.input]]
kind = "dummy"
fields = [{ type = "slider" }]
"#;
    assert!(parse_description(source).is_err());
}

#[test]
fn conflicting_connectors_carry_the_id_span() {
    let source = r#"
[[block]]
id = "both"
output = true
previous = true
"#;
    let err = load_error(source);
    assert!(matches!(err, ModelError::ConflictingConnectors { .. }));
    let span = err.span().cloned().unwrap();
    assert!(source[span].contains("both"));
}

#[test]
fn next_chain_loop_is_rejected() {
    let source = r#"
[[block]]
id = "a"
previous = true
next = true
next_block = "b"

[[block]]
id = "b"
previous = true
next = true
next_block = "a"
"#;
    match load_error(source) {
        ModelError::Cycle { cycle } => assert_eq!(cycle, vec!["a", "b", "a"]),
        other => panic!("expected a cycle, got {:?}", other),
    }
}

#[test]
fn value_input_needs_an_output_block() {
    let source = r#"
[[block]]
id = "if"
[[block.input]]
name = "COND"
kind = "value"
block = "body"

[[block]]
id = "body"
previous = true
"#;
    let err = render(source).unwrap_err();
    assert_eq!(
        err.to_string(),
        "block 'body' needs an output connector to attach to 'if'"
    );
    assert!(err.format(source, "ws.toml").contains("ws.toml"));
}

#[test]
fn dummy_input_cannot_hold_a_block() {
    let source = r#"
[[block]]
id = "p"
[[block.input]]
name = "D"
kind = "dummy"
block = "c"

[[block]]
id = "c"
output = true
"#;
    assert!(matches!(
        load_error(source),
        ModelError::DummyInputWithBlock { .. }
    ));
}
