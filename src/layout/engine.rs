//! Block measurement
//!
//! [`measure_block`] turns a block's inputs into a [`BlockLayout`]: the origin of every
//! input inside the content area, the content and view sizes, and the per-row widths the
//! compositor needs to draw the outline.
//!
//! ## External inputs
//!
//! One row per input. All Value and Dummy inputs share one field width, all Statement
//! inputs share another, and the former is widened to clear the Statement indent.
//!
//! ## Inline inputs
//!
//! Inputs pack left to right. Every Statement input sits in a row of its own, so rows break
//! before and after it. Row heights are back-propagated so that every input in a row
//! reports the height of the tallest one.

use log::debug;

use crate::geometry::{ViewPoint, ViewSize};
use crate::model::{Block, InputKind};
use crate::theme::{PatchMetrics, Theme};

use super::field::FieldMeasurer;
use super::input::InputLayout;
use super::types::{BlockLayout, LayoutMode};

/// Measure a block given the sizes of the chains attached to its inputs
///
/// `child_sizes[i]` is the size of the chain plugged into input `i`; missing entries count
/// as unconnected.
pub fn measure_block(
    block: &Block,
    child_sizes: &[ViewSize],
    measurer: &dyn FieldMeasurer,
    theme: &Theme,
) -> BlockLayout {
    let metrics = &theme.metrics;
    let mut inputs: Vec<InputLayout> = block
        .inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let field_sizes = input.fields.iter().map(|f| measurer.measure(f)).collect();
            let child = match input.kind {
                InputKind::Dummy => ViewSize::zero(),
                _ => child_sizes.get(i).copied().unwrap_or_default(),
            };
            let mut layout = InputLayout::new(input.kind, field_sizes, child);
            layout.measure_fields_and_inputs(&theme.fields);
            layout
        })
        .collect();

    let has_value_input = block.has_value_input();
    let measured = if block.inputs_inline {
        measure_inline(&mut inputs, metrics)
    } else {
        measure_external(&mut inputs, has_value_input, metrics)
    };

    let has_next = block.next.is_some();
    let has_output = block.output.is_some();
    let layout_margin_left = if has_output {
        metrics.output_connector_width
    } else {
        0
    };
    let view_height = measured.content.height
        + if has_next {
            metrics.next_connector_height
        } else {
            0
        };

    let layout = BlockLayout {
        mode: if block.inputs_inline {
            LayoutMode::Inline
        } else {
            LayoutMode::External
        },
        has_previous: block.previous.is_some(),
        has_next,
        has_output,
        has_value_input,
        inputs,
        rows: measured.rows,
        row_widths: measured.row_widths,
        content: measured.content,
        view: ViewSize::new(measured.view_width + layout_margin_left, view_height),
        layout_margin_left,
        padding_left: metrics.block_left_padding,
        next_block_vertical_offset: measured.content.height,
        max_statement_fields_width: measured.max_statement_fields_width,
    };

    debug_assert!(layout.view.width >= layout.content.width);
    debug_assert!(layout.content.height >= metrics.min_block_height);
    debug!(
        "measured block '{}' ({:?}): content {}x{}, view {}x{}, row widths {:?}",
        block.name,
        layout.mode,
        layout.content.width,
        layout.content.height,
        layout.view.width,
        layout.view.height,
        layout.row_widths
    );
    layout
}

/// Intermediate result shared by both modes
struct Measured {
    content: ViewSize,
    view_width: i32,
    rows: Vec<std::ops::Range<usize>>,
    row_widths: Vec<i32>,
    max_statement_fields_width: i32,
}

fn measure_external(
    inputs: &mut [InputLayout],
    has_value_input: bool,
    metrics: &PatchMetrics,
) -> Measured {
    let mut max_input_fields_width = metrics.min_width;
    let mut max_statement_fields_width = 0;
    let mut max_value_child_width = 0;
    let mut max_statement_child_width = 0;
    let mut has_statement = false;

    for input in inputs.iter() {
        match input.kind {
            InputKind::Statement => {
                has_statement = true;
                max_statement_fields_width =
                    max_statement_fields_width.max(input.total_field_width());
                max_statement_child_width =
                    max_statement_child_width.max(input.total_child_width());
            }
            InputKind::Value => {
                max_value_child_width = max_value_child_width.max(input.total_child_width());
                max_input_fields_width = max_input_fields_width.max(input.total_field_width());
            }
            InputKind::Dummy => {
                max_input_fields_width = max_input_fields_width.max(input.total_field_width());
            }
        }
    }

    // an empty Statement still reserves its indent
    if has_statement {
        max_statement_fields_width = max_statement_fields_width.max(metrics.min_width);
        max_input_fields_width = max_input_fields_width
            .max(max_statement_fields_width + metrics.statement_input_indent);
    }

    let mut row_top = 0;
    let mut rows = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.iter_mut().enumerate() {
        if input.kind == InputKind::Statement {
            input.set_field_layout_width(max_statement_fields_width);
        } else {
            input.set_field_layout_width(max_input_fields_width);
        }
        input.measure(false, metrics);
        input.origin = ViewPoint::new(0, row_top);
        row_top += input.measured_height();
        rows.push(i..i + 1);
    }

    let mut content_width =
        max_input_fields_width.max(max_statement_fields_width) + metrics.block_total_padding_x();
    if has_value_input {
        content_width += metrics.value_input_width;
    }
    let content_height = metrics.min_block_height.max(row_top);

    let mut view_width = content_width;
    if has_value_input {
        view_width = view_width.max(
            max_input_fields_width
                + max_value_child_width
                + metrics.block_total_padding_x()
                + metrics.value_input_width
                - metrics.output_connector_width,
        );
    }
    if has_statement {
        view_width = view_width.max(
            max_statement_fields_width
                + max_statement_child_width
                + metrics.block_left_padding
                + metrics.statement_input_padding,
        );
    }

    Measured {
        content: ViewSize::new(content_width, content_height),
        view_width,
        rows,
        row_widths: vec![],
        max_statement_fields_width,
    }
}

fn measure_inline(inputs: &mut [InputLayout], metrics: &PatchMetrics) -> Measured {
    let mut max_statement_fields_width = 0;
    let mut max_statement_child_width = 0;
    let mut has_statement = false;
    for input in inputs.iter().filter(|i| i.kind == InputKind::Statement) {
        has_statement = true;
        max_statement_fields_width = max_statement_fields_width.max(input.total_field_width());
        max_statement_child_width = max_statement_child_width.max(input.total_child_width());
    }
    let statement_row_width = max_statement_fields_width + metrics.statement_input_indent;
    let floor = |w: i32| w.max(metrics.min_width);

    let mut row_left = 0;
    let mut row_top = 0;
    let mut row_height = 0;
    let mut max_row_width = 0;
    let mut row_start = 0;
    let mut rows = vec![];
    let mut row_widths = vec![];

    for (i, input) in inputs.iter_mut().enumerate() {
        let is_statement = input.kind == InputKind::Statement;
        if is_statement {
            input.set_field_layout_width(max_statement_fields_width);
            // break before
            row_widths.push(floor(row_left.max(statement_row_width)));
            if row_start < i {
                rows.push(row_start..i);
            }
            row_top += row_height;
            row_height = 0;
            row_left = 0;
        }

        input.origin = ViewPoint::new(row_left, row_top);
        input.measure(true, metrics);
        row_height = row_height.max(input.measured_height());
        input.set_row_height(row_height);

        if is_statement {
            max_row_width = max_row_width.max(statement_row_width);
            // break after
            rows.push(i..i + 1);
            row_start = i + 1;
            row_top += row_height;
            row_left = 0;
            row_height = 0;
        } else {
            row_left += input.measured_width();
            max_row_width = max_row_width.max(row_left);
        }
    }
    row_top += row_height;
    if row_start < inputs.len() {
        rows.push(row_start..inputs.len());
    }

    let mut max_row_height = 0;
    for input in inputs.iter_mut().rev() {
        if input.kind == InputKind::Statement {
            max_row_height = 0;
        } else {
            max_row_height = max_row_height.max(input.row_height());
            input.set_row_height(max_row_height);
        }
    }

    if has_statement {
        max_row_width = max_row_width.max(statement_row_width);
        row_widths.push(floor(row_left.max(statement_row_width)));
    } else {
        row_widths.push(floor(row_left));
    }

    let content_width = metrics.min_width.max(max_row_width);
    let mut view_width = content_width;
    if has_statement {
        view_width = view_width.max(
            max_statement_fields_width
                + max_statement_child_width
                + metrics.block_left_padding
                + metrics.statement_input_padding,
        );
    }

    Measured {
        content: ViewSize::new(content_width, metrics.min_block_height.max(row_top)),
        view_width,
        rows,
        row_widths,
        max_statement_fields_width,
    }
}
