//! Decomposes a measured block into outline patches, fill rectangles and connector offsets
//!
//! Bounds are computed left to right and mirrored about the view width once, as each patch
//! is placed or each fill run is committed.

use log::trace;

use crate::geometry::{ViewPoint, ViewRect};
use crate::layout::{BlockLayout, InputLayout};
use crate::model::InputKind;
use crate::theme::PatchMetrics;

use super::fill::FillRects;
use super::kind::{Patch, PatchImage, PatchKind, PatchProvider};

/// View-local positions of a block's connectors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorOffsets {
    pub previous: Option<ViewPoint>,
    pub next: Option<ViewPoint>,
    pub output: Option<ViewPoint>,
    /// One entry per input; `None` for Dummy inputs
    pub inputs: Vec<Option<ViewPoint>>,
}

/// Draw list for one block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composite {
    /// In draw order
    pub patches: Vec<Patch>,
    pub fill_rects: Vec<ViewRect>,
    pub connectors: ConnectorOffsets,
}

impl Composite {
    pub fn patches_of(&self, kind: PatchKind) -> impl Iterator<Item = &Patch> {
        self.patches.iter().filter(move |p| p.kind == kind)
    }
}

/// Lay out patches and connectors for a measured block
pub fn composite(
    layout: &BlockLayout,
    provider: &dyn PatchProvider,
    metrics: &PatchMetrics,
    rtl: bool,
) -> Composite {
    let mut compositor = Compositor {
        layout,
        provider,
        metrics,
        rtl,
        patches: vec![],
        fills: FillRects::new(
            metrics.block_top_padding,
            layout.content.height - metrics.block_bottom_padding,
            rtl.then_some(layout.view.width),
        ),
        connectors: ConnectorOffsets {
            inputs: vec![None; layout.inputs.len()],
            ..ConnectorOffsets::default()
        },
    };
    compositor.run();
    Composite {
        patches: compositor.patches,
        fill_rects: compositor.fills.into_rects(),
        connectors: compositor.connectors,
    }
}

struct Compositor<'a> {
    layout: &'a BlockLayout,
    provider: &'a dyn PatchProvider,
    metrics: &'a PatchMetrics,
    rtl: bool,
    patches: Vec<Patch>,
    fills: FillRects,
    connectors: ConnectorOffsets,
}

impl Compositor<'_> {
    fn point(&self, x: i32, y: i32) -> ViewPoint {
        ViewPoint::new(x, y).flip_if(self.rtl, self.layout.view.width)
    }

    fn image(&self, kind: PatchKind) -> PatchImage {
        self.provider.patch(kind, self.rtl)
    }

    fn place(&mut self, kind: PatchKind, left: i32, top: i32, right: i32, bottom: i32) {
        let bounds =
            ViewRect::new(left, top, right, bottom).flip_if(self.rtl, self.layout.view.width);
        trace!("patch {} at {:?}", kind.name(), bounds);
        self.patches.push(Patch {
            kind,
            rtl: self.rtl,
            bounds,
        });
    }

    fn row_width(&self, row: usize) -> i32 {
        self.layout
            .row_widths
            .get(row)
            .copied()
            .unwrap_or(self.layout.content.width)
    }

    fn run(&mut self) {
        let layout = self.layout;
        let margin = layout.layout_margin_left;
        let x_from = margin + self.metrics.block_left_padding;
        let mut x_to = margin
            + if layout.is_inline() {
                self.row_width(0)
            } else {
                layout.content.width
            };
        let mut row_idx = 0;

        let top_left = self.place_top_left(margin, x_from, x_to);

        for (i, input) in layout.inputs.iter().enumerate() {
            let origin = input.origin;
            self.fills.fill_rect_by_size(
                x_from + origin.x,
                origin.y,
                input.field_layout_width(),
                input.row_height(),
            );

            match (input.kind, layout.is_inline()) {
                (InputKind::Dummy, false) => self.dummy_boundary(i, x_to, input),
                (InputKind::Dummy, true) => {}
                (InputKind::Value, false) => self.external_value(i, x_to, input),
                (InputKind::Value, true) => self.inline_value(i, row_idx, x_from, input),
                (InputKind::Statement, inline) => {
                    let x_to_bottom = if inline {
                        row_idx += 1;
                        x_from + self.row_width(row_idx) - self.metrics.block_left_padding
                    } else {
                        x_to
                    };
                    self.statement(i, x_from, x_to, x_to_bottom, input);
                    x_to = x_to_bottom;
                }
            }

            if layout.is_inline() && input.kind != InputKind::Statement && self.ends_row(i) {
                self.row_end_boundary(row_idx, x_from, input);
            }
        }

        let bottom_left = if layout.has_next {
            self.connectors.next = Some(self.point(x_from, layout.next_block_vertical_offset));
            PatchKind::BottomLeftNext
        } else {
            PatchKind::BottomLeftDefault
        };
        self.place(bottom_left, margin, top_left.intrinsic.height, x_to, layout.view.height);
        self.fills.finish();
    }

    fn ends_row(&self, i: usize) -> bool {
        self.layout
            .inputs
            .get(i + 1)
            .map_or(true, |next| next.kind == InputKind::Statement)
    }

    fn place_top_left(&mut self, margin: i32, x_from: i32, x_to: i32) -> PatchImage {
        let layout = self.layout;
        let (kind, left) = if layout.has_previous {
            self.connectors.previous = Some(self.point(x_from, 0));
            (PatchKind::TopLeftPrevious, margin)
        } else if layout.has_output {
            self.connectors.output = Some(self.point(margin, 0));
            (PatchKind::TopLeftOutput, 0)
        } else {
            (PatchKind::TopLeftDefault, margin)
        };
        let image = self.image(kind);
        self.place(kind, left, 0, x_to, image.intrinsic.height);
        image
    }

    fn dummy_boundary(&mut self, i: usize, x_to: i32, input: &InputLayout) {
        let mut width = self.image(PatchKind::DummyInput).intrinsic.width;
        if self.layout.has_value_input {
            // as thick as the boundary carrying a Value connector
            width += self.metrics.value_input_width;
        }
        let top = input.origin.y + if i > 0 { 0 } else { self.metrics.block_top_padding };
        self.place(
            PatchKind::DummyInput,
            x_to - width,
            top,
            x_to,
            input.origin.y + input.measured_height(),
        );
    }

    fn external_value(&mut self, i: usize, x_to: i32, input: &InputLayout) {
        let y = input.origin.y;
        self.connectors.inputs[i] = Some(self.point(x_to, y));

        let width = self.image(PatchKind::ValueInputExternal).intrinsic.width;
        self.place(
            PatchKind::ValueInputExternal,
            x_to - width,
            y + self.metrics.block_top_padding,
            x_to,
            y + input.measured_height(),
        );
        if i > 0 {
            // close the gap left above the connector by the top boundary
            self.place(
                PatchKind::DummyInput,
                x_to - width,
                y,
                x_to,
                y + self.metrics.block_top_padding,
            );
        }
    }

    fn inline_value(&mut self, i: usize, row_idx: usize, x_from: i32, input: &InputLayout) {
        let origin = input.origin;
        let extent = input.inline_extent();
        let cutout_x = x_from + origin.x + input.inline_input_x();
        let cutout_y = origin.y + self.metrics.block_top_padding;
        self.connectors.inputs[i] =
            Some(self.point(cutout_x + self.metrics.output_connector_width, cutout_y));

        if row_idx > 0 {
            self.fills.fill_rect_by_size(
                cutout_x,
                origin.y,
                extent.width,
                self.metrics.block_top_padding,
            );
            self.fills.finish();
        }

        self.place(
            PatchKind::ValueInputInline,
            cutout_x,
            cutout_y,
            cutout_x + extent.width,
            cutout_y + extent.height,
        );

        let cutout_end_x = cutout_x + extent.width;
        let cutout_end_y = origin.y + input.row_height();
        self.fills
            .fill_rect(cutout_x, cutout_y + extent.height, cutout_end_x, cutout_end_y);
        self.fills.fill_rect(
            cutout_end_x,
            origin.y,
            x_from + origin.x + input.measured_width() - self.metrics.block_total_padding_x(),
            cutout_end_y,
        );
    }

    fn row_end_boundary(&mut self, row_idx: usize, x_from: i32, input: &InputLayout) {
        let origin = input.origin;
        let patch_x = x_from + self.row_width(row_idx) - self.metrics.block_total_padding_x();
        let patch_y = origin.y
            + if row_idx > 0 {
                0
            } else {
                self.metrics.block_top_padding
            };
        let bottom = origin.y + input.row_height();

        self.place(
            PatchKind::DummyInput,
            patch_x,
            patch_y,
            patch_x + self.metrics.block_right_padding,
            bottom,
        );
        self.fills.fill_rect(
            x_from + origin.x + input.measured_width() - self.metrics.block_total_padding_x(),
            patch_y,
            patch_x,
            bottom,
        );
    }

    fn statement(
        &mut self,
        i: usize,
        x_from: i32,
        x_to_above: i32,
        x_to_below: i32,
        input: &InputLayout,
    ) {
        let y = input.origin.y;
        let x_offset = x_from + input.field_layout_width();
        self.connectors.inputs[i] = Some(self.point(x_offset, y));

        let top_height = self.image(PatchKind::StatementInputTop).intrinsic.height;
        self.place(
            PatchKind::StatementInputTop,
            x_offset,
            y,
            x_to_above,
            y + top_height,
        );

        let connector_height = input.total_child_height().max(input.measured_height());
        self.place(
            PatchKind::StatementInputBottom,
            x_offset,
            y + top_height,
            x_to_below,
            y + connector_height,
        );
    }
}
