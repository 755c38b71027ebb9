//! Patch kinds and the provider that sizes them

use crate::geometry::{ViewRect, ViewSize};
use crate::theme::PatchMetrics;

/// A stretchable border piece of a block outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchKind {
    TopLeftDefault,
    TopLeftPrevious,
    TopLeftOutput,
    BottomLeftDefault,
    BottomLeftNext,
    /// Plain right-hand block boundary
    DummyInput,
    ValueInputExternal,
    ValueInputInline,
    StatementInputTop,
    StatementInputBottom,
}

impl PatchKind {
    /// Short name, used for CSS classes
    pub fn name(self) -> &'static str {
        match self {
            PatchKind::TopLeftDefault => "tl-default",
            PatchKind::TopLeftPrevious => "tl-previous",
            PatchKind::TopLeftOutput => "tl-output",
            PatchKind::BottomLeftDefault => "bl-default",
            PatchKind::BottomLeftNext => "bl-next",
            PatchKind::DummyInput => "dummy-input",
            PatchKind::ValueInputExternal => "value-input-external",
            PatchKind::ValueInputInline => "value-input-inline",
            PatchKind::StatementInputTop => "statement-input-top",
            PatchKind::StatementInputBottom => "statement-input-bottom",
        }
    }
}

/// A patch image as supplied by the host, before it is stretched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchImage {
    pub kind: PatchKind,
    pub rtl: bool,
    pub intrinsic: ViewSize,
}

/// Supplies patch images keyed by kind and direction
pub trait PatchProvider {
    fn patch(&self, kind: PatchKind, rtl: bool) -> PatchImage;
}

/// Patch provider deriving intrinsic sizes from theme metrics
#[derive(Debug, Clone)]
pub struct MetricPatches {
    metrics: PatchMetrics,
}

impl MetricPatches {
    pub fn new(metrics: PatchMetrics) -> Self {
        Self { metrics }
    }
}

impl PatchProvider for MetricPatches {
    fn patch(&self, kind: PatchKind, rtl: bool) -> PatchImage {
        let m = &self.metrics;
        let intrinsic = match kind {
            PatchKind::TopLeftDefault | PatchKind::TopLeftPrevious => {
                ViewSize::new(m.block_left_padding, m.block_top_padding)
            }
            PatchKind::TopLeftOutput => ViewSize::new(
                m.output_connector_width + m.block_left_padding,
                m.block_top_padding,
            ),
            PatchKind::BottomLeftDefault => {
                ViewSize::new(m.block_left_padding, m.block_bottom_padding)
            }
            PatchKind::BottomLeftNext => ViewSize::new(
                m.block_left_padding,
                m.block_bottom_padding + m.next_connector_height,
            ),
            PatchKind::DummyInput => ViewSize::new(m.block_right_padding, m.block_top_padding),
            PatchKind::ValueInputExternal => ViewSize::new(
                m.block_right_padding + m.value_input_width,
                m.block_top_padding,
            ),
            PatchKind::ValueInputInline => {
                ViewSize::new(m.inline_input_min_width, m.inline_input_min_height)
            }
            PatchKind::StatementInputTop => {
                ViewSize::new(m.statement_input_indent, m.statement_top_height)
            }
            PatchKind::StatementInputBottom => {
                ViewSize::new(m.statement_input_indent, m.statement_bottom_height)
            }
        };
        PatchImage {
            kind,
            rtl,
            intrinsic,
        }
    }
}

/// A patch stretched to its final bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    pub kind: PatchKind,
    pub rtl: bool,
    pub bounds: ViewRect,
}
