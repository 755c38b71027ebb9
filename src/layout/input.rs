//! Layout unit for a single block input

use crate::geometry::{ViewPoint, ViewSize};
use crate::model::InputKind;
use crate::theme::{FieldMetrics, PatchMetrics};

/// Measured geometry of one input: its fields and the chain plugged into it
///
/// All values are recomputed on every measure pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    pub kind: InputKind,
    field_sizes: Vec<ViewSize>,
    child: ViewSize,
    total_field_width: i32,
    total_field_height: i32,
    field_layout_width: i32,
    measured: ViewSize,
    row_height: i32,
    inline_extent: ViewSize,
    /// Position within the block's content area
    pub origin: ViewPoint,
}

impl InputLayout {
    /// `child` is the size of the attached chain, zero if nothing is attached
    pub fn new(kind: InputKind, field_sizes: Vec<ViewSize>, child: ViewSize) -> Self {
        Self {
            kind,
            field_sizes,
            child,
            total_field_width: 0,
            total_field_height: 0,
            field_layout_width: 0,
            measured: ViewSize::zero(),
            row_height: 0,
            inline_extent: ViewSize::zero(),
            origin: ViewPoint::default(),
        }
    }

    /// Sum field sizes into the field region and reset the forced field width
    pub fn measure_fields_and_inputs(&mut self, fields: &FieldMetrics) {
        let count = self.field_sizes.len() as i32;
        if count == 0 {
            self.total_field_width = 0;
            self.total_field_height = 0;
        } else {
            let widths: i32 = self.field_sizes.iter().map(|s| s.width.max(0)).sum();
            let tallest = self
                .field_sizes
                .iter()
                .map(|s| s.height.max(0))
                .max()
                .unwrap_or(0);
            self.total_field_width = widths + fields.field_spacing * (count - 1);
            self.total_field_height = tallest + 2 * fields.field_padding_y;
        }
        self.field_layout_width = self.total_field_width;
    }

    /// Force the field region to a shared width
    pub fn set_field_layout_width(&mut self, width: i32) {
        debug_assert!(width >= 0, "negative field width {}", width);
        self.field_layout_width = width;
    }

    /// Combine field and child sizes into the measured size for this input's kind
    pub fn measure(&mut self, inline: bool, metrics: &PatchMetrics) {
        let fw = self.field_layout_width;
        let fh = self.total_field_height;
        let child = self.child;
        let padding = metrics.block_total_padding_x();

        self.measured = match (self.kind, inline) {
            (InputKind::Dummy, _) => ViewSize::new(fw + padding, fh),
            (InputKind::Value, false) => {
                // a plugged block's output tab overlaps the connector
                let overlap = if child.width > 0 {
                    metrics.output_connector_width
                } else {
                    0
                };
                ViewSize::new(
                    fw + padding + metrics.value_input_width + child.width - overlap,
                    fh.max(child.height),
                )
            }
            (InputKind::Value, true) => {
                self.inline_extent = ViewSize::new(
                    child.width.max(metrics.inline_input_min_width),
                    child.height.max(metrics.inline_input_min_height),
                );
                ViewSize::new(
                    fw + self.inline_extent.width + metrics.inline_input_trailing + padding,
                    fh.max(
                        self.inline_extent.height
                            + metrics.block_top_padding
                            + metrics.block_bottom_padding,
                    ),
                )
            }
            (InputKind::Statement, _) => ViewSize::new(
                fw + metrics.statement_input_padding + child.width,
                fh.max(child.height + metrics.statement_bottom_height),
            ),
        };
        self.row_height = self.measured.height;
    }

    pub fn total_field_width(&self) -> i32 {
        self.total_field_width
    }

    pub fn total_field_height(&self) -> i32 {
        self.total_field_height
    }

    pub fn total_child_width(&self) -> i32 {
        self.child.width
    }

    pub fn total_child_height(&self) -> i32 {
        self.child.height
    }

    pub fn field_layout_width(&self) -> i32 {
        self.field_layout_width
    }

    pub fn measured_width(&self) -> i32 {
        self.measured.width
    }

    pub fn measured_height(&self) -> i32 {
        self.measured.height
    }

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    pub fn set_row_height(&mut self, height: i32) {
        self.row_height = height;
    }

    /// Size of the inline Value cutout; zero outside inline Value inputs
    pub fn inline_extent(&self) -> ViewSize {
        self.inline_extent
    }

    /// Horizontal offset of the inline cutout from the input origin
    pub fn inline_input_x(&self) -> i32 {
        self.field_layout_width
    }

    /// True if an input-local point falls on the field region
    pub fn is_on_fields(&self, x: i32, y: i32) -> bool {
        (0..=self.field_layout_width).contains(&x) && (0..=self.row_height).contains(&y)
    }
}
