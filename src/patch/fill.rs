//! Background fill rectangles with run merging

use log::trace;

use crate::geometry::ViewRect;

/// Accumulates fill requests into merged runs
///
/// A request sharing left and right edges with the pending run extends it downwards; one
/// sharing top and bottom extends it to the right. Anything else commits the pending run.
/// Aligned requests merge across gaps, so callers must [`finish`](Self::finish) before two
/// fills that are meant to stay apart.
#[derive(Debug, Clone)]
pub struct FillRects {
    pending: Option<ViewRect>,
    committed: Vec<ViewRect>,
    min_top: i32,
    max_bottom: i32,
    mirror_width: Option<i32>,
}

impl FillRects {
    /// Runs are clamped vertically to `[min_top, max_bottom]` and mirrored about
    /// `mirror_width` when committed
    pub fn new(min_top: i32, max_bottom: i32, mirror_width: Option<i32>) -> Self {
        Self {
            pending: None,
            committed: vec![],
            min_top,
            max_bottom,
            mirror_width,
        }
    }

    pub fn fill_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        if let Some(run) = self.pending.as_mut() {
            if run.left == left && run.right == right {
                debug_assert!(run.top <= top, "fill run must not grow upwards");
                run.bottom = bottom;
                return;
            }
            if run.top == top && run.bottom == bottom {
                debug_assert!(run.left <= left, "fill run must not grow leftwards");
                run.right = right;
                return;
            }
            self.finish();
        }
        self.pending = Some(ViewRect::new(left, top, right, bottom));
    }

    pub fn fill_rect_by_size(&mut self, left: i32, top: i32, width: i32, height: i32) {
        self.fill_rect(left, top, left + width, top + height);
    }

    /// Commit the pending run, if any
    pub fn finish(&mut self) {
        let Some(mut run) = self.pending.take() else {
            return;
        };
        run.top = run.top.max(self.min_top);
        run.bottom = run.bottom.min(self.max_bottom);
        if let Some(width) = self.mirror_width {
            run = run.mirrored(width);
        }
        if run.is_empty() {
            return;
        }
        trace!(
            "fill ({}, {}) - ({}, {})",
            run.left,
            run.top,
            run.right,
            run.bottom
        );
        self.committed.push(run);
    }

    pub fn rects(&self) -> &[ViewRect] {
        &self.committed
    }

    /// Commit the pending run and return all runs
    pub fn into_rects(mut self) -> Vec<ViewRect> {
        self.finish();
        self.committed
    }
}
