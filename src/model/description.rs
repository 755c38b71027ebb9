//! Workspace descriptions written in TOML
//!
//! ```toml
//! [[block]]
//! id = "loop"
//! colour = 120
//! previous = true
//! next = true
//!
//! [[block.input]]
//! name = "DO"
//! kind = "statement"
//! fields = [{ type = "label", text = "do" }]
//! block = "body"
//! ```

use serde::Deserialize;
use toml::Spanned;

use crate::error::ParseError;

use super::{Block, BlockShape, Colour, ColourSpec, Field, Input, InputKind, ModelError, Workspace};

/// A parsed, not yet validated workspace description
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Description {
    #[serde(default, rename = "block")]
    pub blocks: Vec<BlockDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockDecl {
    pub id: Spanned<String>,
    #[serde(default, rename = "type")]
    pub type_name: String,
    pub colour: Option<Spanned<ColourSpec>>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub inline: bool,
    #[serde(default)]
    pub previous: bool,
    #[serde(default)]
    pub next: bool,
    #[serde(default)]
    pub output: bool,
    pub next_block: Option<Spanned<String>>,
    #[serde(default, rename = "input")]
    pub inputs: Vec<InputDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputDecl {
    #[serde(default)]
    pub name: String,
    pub kind: InputKind,
    #[serde(default)]
    pub fields: Vec<Field>,
    pub block: Option<Spanned<String>>,
}

/// Parse a description without checking the block graph
pub fn parse_description(source: &str) -> Result<Description, ParseError> {
    Ok(toml::from_str(source)?)
}

impl BlockDecl {
    fn shape(&self) -> Result<BlockShape, ModelError> {
        match (self.output, self.previous || self.next) {
            (true, true) => Err(ModelError::ConflictingConnectors {
                id: self.id.get_ref().clone(),
                span: Some(self.id.span()),
            }),
            (true, false) => Ok(BlockShape::Output),
            (false, true) => Ok(BlockShape::Statement {
                previous: self.previous,
                next: self.next,
            }),
            (false, false) => Ok(BlockShape::Plain),
        }
    }

    fn colour(&self, default_colour: Colour) -> Result<Colour, ModelError> {
        let Some(spec) = &self.colour else {
            return Ok(default_colour);
        };
        spec.get_ref()
            .resolve()
            .ok_or_else(|| ModelError::InvalidColour {
                id: self.id.get_ref().clone(),
                value: match spec.get_ref() {
                    ColourSpec::Hex(s) => s.clone(),
                    ColourSpec::Hue(h) => h.to_string(),
                },
                span: Some(spec.span()),
            })
    }
}

impl Description {
    /// Build the block graph, attaching children in declaration order
    pub fn into_workspace(self, default_colour: Colour) -> Result<Workspace, ModelError> {
        let mut workspace = Workspace::new();

        for decl in &self.blocks {
            let mut block = Block::new(
                decl.id.get_ref().clone(),
                decl.shape()?,
                decl.colour(default_colour)?,
            )
            .with_type(decl.type_name.clone())
            .with_inputs_inline(decl.inline)
            .with_position(decl.x, decl.y);
            for input in &decl.inputs {
                block = block.with_input(Input::new(
                    input.name.clone(),
                    input.kind,
                    input.fields.clone(),
                ));
            }
            workspace
                .add_block(block)
                .map_err(|e| e.with_span(decl.id.span()))?;
        }

        for decl in &self.blocks {
            let parent = workspace.resolve(decl.id.get_ref())?;
            for (index, input) in decl.inputs.iter().enumerate() {
                let Some(child_ref) = &input.block else {
                    continue;
                };
                let span = child_ref.span();
                let child = workspace
                    .resolve(child_ref.get_ref())
                    .map_err(|e| e.with_span(span.clone()))?;
                workspace
                    .connect_input(parent, index, child)
                    .map_err(|e| e.with_span(span))?;
            }
            if let Some(next_ref) = &decl.next_block {
                let span = next_ref.span();
                let child = workspace
                    .resolve(next_ref.get_ref())
                    .map_err(|e| e.with_span(span.clone()))?;
                workspace
                    .connect_next(parent, child)
                    .map_err(|e| e.with_span(span))?;
            }
        }

        log::debug!(
            "loaded {} blocks, {} top-level",
            workspace.len(),
            workspace.roots().len()
        );
        Ok(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(source: &str) -> Result<Workspace, ModelError> {
        parse_description(source)
            .expect("description should parse")
            .into_workspace(Colour::BLACK)
    }

    #[test]
    fn test_load_nested_blocks() {
        let ws = load(
            r##"
[[block]]
id = "if"
previous = true
next = true
x = 10
y = 20

[[block.input]]
name = "COND"
kind = "value"
block = "cond"
fields = [{ type = "label", text = "if" }]

[[block]]
id = "cond"
output = true
colour = "#ff0000"
"##,
        )
        .unwrap();

        let parent = ws.find("if").unwrap();
        let child = ws.find("cond").unwrap();
        let block = ws.block(parent).unwrap();
        assert_eq!(block.inputs[0].target(), Some(child));
        assert_eq!(block.position.x, 10.0);
        assert_eq!(
            block.inputs[0].fields,
            vec![Field::Label {
                text: "if".to_string()
            }]
        );
        assert_eq!(ws.block(child).unwrap().colour, Colour::from_rgb(255, 0, 0));
        assert_eq!(ws.roots(), vec![parent]);
    }

    #[test]
    fn test_hue_colour() {
        let ws = load("[[block]]\nid = \"a\"\ncolour = 120\n").unwrap();
        let id = ws.find("a").unwrap();
        assert_eq!(ws.block(id).unwrap().colour, Colour::from_hue(120.0));
    }

    #[test]
    fn test_unknown_child_has_span() {
        let source = r#"
[[block]]
id = "a"
next = true
next_block = "bb"

[[block]]
id = "b"
previous = true
"#;
        let err = load(source).unwrap_err();
        let span = err.span().cloned().expect("span");
        assert!(source[span].contains("bb"));
        let first = err.suggestions().and_then(|s| s.first()).map(String::as_str);
        assert_eq!(first, Some("b"));
    }

    #[test]
    fn test_output_conflicts_with_previous_or_next() {
        for other in ["previous", "next"] {
            let source = format!("[[block]]\nid = \"a\"\noutput = true\n{other} = true\n");
            let err = load(&source).unwrap_err();
            assert!(
                matches!(err, ModelError::ConflictingConnectors { .. }),
                "output + {other}: {err:?}"
            );
        }
    }

    #[test]
    fn test_invalid_colour() {
        let err = load("[[block]]\nid = \"a\"\ncolour = \"blue\"\n").unwrap_err();
        assert!(matches!(err, ModelError::InvalidColour { .. }));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        assert!(parse_description("[[block]]\nid = \"a\"\nshape = 3\n").is_err());
    }
}
