//! End-to-end rendering of workspace descriptions

use blockview::{render, render_with_config, RenderConfig, SvgConfig, Theme};

const PROGRAM: &str = r##"
[[block]]
id = "loop"
type = "controls_repeat"
colour = 120
previous = true
next = true
x = 20
y = 20

[[block.input]]
name = "TIMES"
kind = "value"
fields = [{ type = "label", text = "repeat" }]
block = "count"

[[block.input]]
name = "DO"
kind = "statement"
fields = [{ type = "label", text = "do" }]
block = "print"

[[block]]
id = "count"
output = true
colour = "#aa3355"
[[block.input]]
kind = "dummy"
fields = [{ type = "input", text = "10" }]

[[block]]
id = "print"
previous = true
next = true
[[block.input]]
kind = "dummy"
fields = [{ type = "label", text = "print" }]
"##;

#[test]
fn renders_every_block_in_its_colour() {
    let svg = render(PROGRAM).unwrap();
    assert!(svg.contains(r#"<g id="loop" class="bv-block bv-type-controls_repeat""#));
    assert!(svg.contains(r#"id="count""#));
    assert!(svg.contains(r#"id="print""#));
    assert!(svg.contains("#aa3355"));
    assert!(svg.contains("bv-statement-input-top"));
    assert!(svg.contains("bv-value-input-external"));
    assert!(!svg.contains("bv-connector"));
}

#[test]
fn debug_marks_connected_and_open_connectors() {
    let svg = render_with_config(PROGRAM, RenderConfig::new().with_debug(true)).unwrap();
    // loop: previous, next, two inputs; count: output; print: previous, next
    assert_eq!(svg.matches(r#"<circle class="bv-connector"#).count(), 7);
    assert!(svg.contains("#00ff00"));
    assert!(svg.contains("#00ffff"));
}

#[test]
fn rtl_and_compact_output() {
    let config = RenderConfig::new()
        .with_rtl(true)
        .with_scale(2.0)
        .with_theme(Theme::default())
        .with_svg(
            SvgConfig::default()
                .with_standalone(false)
                .with_pretty_print(false),
        );
    let svg = render_with_config(PROGRAM, config).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(!svg.contains('\n'));
    assert!(svg.contains("bv-rtl"));
    assert!(svg.contains(r#"transform="translate(40,40)""#));
}

#[test]
fn empty_workspace_renders_an_empty_canvas() {
    let svg = render("").unwrap();
    assert!(svg.contains(r#"viewBox="-20 -20 40 40""#));
    assert!(!svg.contains("<g"));
}
