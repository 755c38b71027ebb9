//! Core model types: blocks, inputs, fields and connections

use std::fmt;

use serde::Deserialize;

use crate::geometry::WorkspacePoint;

use super::colour::Colour;

/// Index of a block inside its [`Workspace`](super::Workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A non-interactive or editable piece of block content
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Field {
    Label {
        text: String,
    },
    Input {
        text: String,
    },
    Angle {
        degrees: f64,
    },
    Checkbox {
        #[serde(default)]
        checked: bool,
    },
    Colour {
        colour: String,
    },
    Date {
        date: String,
    },
    Dropdown {
        options: Vec<String>,
        #[serde(default)]
        selected: usize,
    },
    Image {
        src: String,
        width: i32,
        height: i32,
    },
    Variable {
        name: String,
    },
}

impl Field {
    /// Text shown by the field, if it shows any
    pub fn display_text(&self) -> Option<String> {
        match self {
            Field::Label { text } | Field::Input { text } => Some(text.clone()),
            Field::Angle { degrees } => Some(format!("{}°", degrees)),
            Field::Date { date } => Some(date.clone()),
            Field::Dropdown { options, selected } => options.get(*selected).cloned(),
            Field::Variable { name } => Some(name.clone()),
            Field::Checkbox { .. } | Field::Colour { .. } | Field::Image { .. } => None,
        }
    }
}

/// Kind of a block input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Accepts a single expression block, drawn with a connector
    Value,
    /// Accepts a chain of statement blocks, drawn as a C-shaped cutout
    Statement,
    /// Fields only
    Dummy,
}

/// Kind of a connection point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    Output,
    Previous,
    Next,
    Input,
}

impl ConnectionKind {
    /// True if a connection of this kind can attach to one of `other`
    pub fn is_compatible_with(self, other: ConnectionKind) -> bool {
        matches!(
            (self, other),
            (ConnectionKind::Output, ConnectionKind::Input)
                | (ConnectionKind::Input, ConnectionKind::Output)
                | (ConnectionKind::Previous, ConnectionKind::Next)
                | (ConnectionKind::Next, ConnectionKind::Previous)
        )
    }
}

/// An attachment point on a block or input
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub kind: ConnectionKind,
    /// Absolute position in workspace coordinates
    pub position: WorkspacePoint,
    /// Block on the other end (non-owning)
    pub target: Option<BlockId>,
    /// Set while the owning block is being dragged
    pub drag_mode: bool,
}

impl Connection {
    pub fn new(kind: ConnectionKind) -> Self {
        Self {
            kind,
            position: WorkspacePoint::default(),
            target: None,
            drag_mode: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.target.is_some()
    }
}

/// A slot on a block accepting fields and optionally nested blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub name: String,
    pub kind: InputKind,
    pub fields: Vec<Field>,
    pub connection: Option<Connection>,
}

impl Input {
    /// Create an input; Value and Statement inputs get their connection
    pub fn new(name: impl Into<String>, kind: InputKind, fields: Vec<Field>) -> Self {
        let connection = match kind {
            InputKind::Value => Some(Connection::new(ConnectionKind::Input)),
            InputKind::Statement => Some(Connection::new(ConnectionKind::Next)),
            InputKind::Dummy => None,
        };
        Self {
            name: name.into(),
            kind,
            fields,
            connection,
        }
    }

    pub fn value(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(name, InputKind::Value, fields)
    }

    pub fn statement(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(name, InputKind::Statement, fields)
    }

    pub fn dummy(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(name, InputKind::Dummy, fields)
    }

    /// Block attached to this input, if any
    pub fn target(&self) -> Option<BlockId> {
        self.connection.as_ref().and_then(|c| c.target)
    }
}

/// Which block-level connectors a block exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockShape {
    /// No connectors: a free-standing top-level block
    #[default]
    Plain,
    /// An expression block with an Output connector
    Output,
    /// A statement block with a Previous and/or Next connector
    Statement { previous: bool, next: bool },
}

/// One visual/programmatic unit in the program being edited
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub type_name: String,
    pub colour: Colour,
    /// Absolute position in workspace coordinates
    pub position: WorkspacePoint,
    pub inputs_inline: bool,
    pub inputs: Vec<Input>,
    pub previous: Option<Connection>,
    pub next: Option<Connection>,
    pub output: Option<Connection>,
}

impl Block {
    /// Create a block; the shape fixes its block-level connectors so that a block never
    /// has both an Output and a Previous connector
    pub fn new(name: impl Into<String>, shape: BlockShape, colour: Colour) -> Self {
        let (previous, next, output) = match shape {
            BlockShape::Plain => (None, None, None),
            BlockShape::Output => (None, None, Some(Connection::new(ConnectionKind::Output))),
            BlockShape::Statement { previous, next } => (
                previous.then(|| Connection::new(ConnectionKind::Previous)),
                next.then(|| Connection::new(ConnectionKind::Next)),
                None,
            ),
        };
        Self {
            name: name.into(),
            type_name: String::new(),
            colour,
            position: WorkspacePoint::default(),
            inputs_inline: false,
            inputs: vec![],
            previous,
            next,
            output,
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_inputs_inline(mut self, inline: bool) -> Self {
        self.inputs_inline = inline;
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = WorkspacePoint::new(x, y);
        self
    }

    pub fn has_value_input(&self) -> bool {
        self.inputs.iter().any(|i| i.kind == InputKind::Value)
    }

    /// Block this one hangs below, if any
    pub fn previous_block(&self) -> Option<BlockId> {
        self.previous.as_ref().and_then(|c| c.target)
    }

    /// Block hanging below this one, if any
    pub fn next_block(&self) -> Option<BlockId> {
        self.next.as_ref().and_then(|c| c.target)
    }

    /// Block whose input this one is plugged into, if any
    pub fn output_target(&self) -> Option<BlockId> {
        self.output.as_ref().and_then(|c| c.target)
    }

    /// A top-level block is attached to nothing above it and keeps its own position
    pub fn is_top_level(&self) -> bool {
        self.previous_block().is_none() && self.output_target().is_none()
    }
}

/// Position of a connection on its block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionSlot {
    Previous,
    Next,
    Output,
    Input(usize),
}

/// Identifies a single connection in a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionRef {
    pub block: BlockId,
    pub slot: ConnectionSlot,
}

impl ConnectionRef {
    pub fn new(block: BlockId, slot: ConnectionSlot) -> Self {
        Self { block, slot }
    }
}
