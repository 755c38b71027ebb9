//! Core types for the block layout engine

use std::ops::Range;

use crate::geometry::{ViewPoint, ViewSize};
use crate::model::InputKind;

use super::input::InputLayout;

/// How a block arranges its inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// One row per input
    External,
    /// Inputs packed left to right, broken around Statement inputs
    Inline,
}

/// Result of measuring one block
///
/// Everything here is in left-to-right view coordinates; mirroring happens in the
/// compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub mode: LayoutMode,
    pub has_previous: bool,
    pub has_next: bool,
    pub has_output: bool,
    pub has_value_input: bool,
    pub inputs: Vec<InputLayout>,
    /// Input index ranges of the visual rows, top to bottom
    pub rows: Vec<Range<usize>>,
    /// Inline mode: width of each section between Statement inputs, plus the trailing one
    pub row_widths: Vec<i32>,
    /// Size of the block outline without extruding connectors or attached children
    pub content: ViewSize,
    /// Full size of the block view
    pub view: ViewSize,
    /// Room left of the content for the Output connector
    pub layout_margin_left: i32,
    /// Gap between the content's left edge and the first field
    pub padding_left: i32,
    /// Where the next block in the chain is placed, relative to this view's top
    pub next_block_vertical_offset: i32,
    pub max_statement_fields_width: i32,
}

impl BlockLayout {
    pub fn is_inline(&self) -> bool {
        self.mode == LayoutMode::Inline
    }

    pub fn input(&self, index: usize) -> Option<&InputLayout> {
        self.inputs.get(index)
    }

    pub fn input_origin(&self, index: usize) -> Option<ViewPoint> {
        self.inputs.get(index).map(|i| i.origin)
    }

    /// Visual row an input sits in
    pub fn row_of(&self, index: usize) -> Option<usize> {
        self.rows.iter().position(|r| r.contains(&index))
    }

    pub fn has_statement_input(&self) -> bool {
        self.inputs.iter().any(|i| i.kind == InputKind::Statement)
    }
}
