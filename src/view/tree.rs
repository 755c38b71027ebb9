//! Views for every block in a workspace
//!
//! The model never points at its views. [`BlockViewTree`] keeps a `BlockId`-keyed map and
//! drives the measure and layout passes over the block graph with explicit stacks.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::geometry::{ViewPoint, ViewRect, ViewSize};
use crate::layout::{measure_block, BlockLayout, FieldMeasurer};
use crate::model::{BlockId, ConnectionRef, ConnectionSlot, InputKind, Workspace};
use crate::patch::{composite, Composite, PatchProvider};
use crate::theme::{PatchMetrics, Theme};

use super::helper::WorkspaceHelper;

/// What part of a block is drawn highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Connection(ConnectionRef),
    EntireBlock,
}

/// The view of one block
#[derive(Debug, Clone)]
pub struct BlockView {
    pub block: BlockId,
    pub layout: BlockLayout,
    pub composite: Composite,
    /// Top-left corner in view coordinates
    pub origin: ViewPoint,
    /// Size of this block plus everything hanging below it
    pub chain_size: ViewSize,
    highlight: Highlight,
}

impl BlockView {
    fn new(block: BlockId, layout: BlockLayout, chain_size: ViewSize) -> Self {
        Self {
            block,
            layout,
            composite: Composite::default(),
            origin: ViewPoint::default(),
            chain_size,
            highlight: Highlight::None,
        }
    }

    pub fn size(&self) -> ViewSize {
        self.layout.view
    }

    /// Bounds in view coordinates
    pub fn bounds(&self) -> ViewRect {
        ViewRect::from_size(
            self.origin.x,
            self.origin.y,
            self.layout.view.width,
            self.layout.view.height,
        )
    }

    /// View-local offset of one of this block's connectors
    pub fn connector_offset(&self, slot: ConnectionSlot) -> Option<ViewPoint> {
        let connectors = &self.composite.connectors;
        match slot {
            ConnectionSlot::Previous => connectors.previous,
            ConnectionSlot::Next => connectors.next,
            ConnectionSlot::Output => connectors.output,
            ConnectionSlot::Input(i) => connectors.inputs.get(i).copied().flatten(),
        }
    }

    /// View-local bounds of an input row, attached children included
    pub fn input_bounds(&self, index: usize, rtl: bool) -> Option<ViewRect> {
        let input = self.layout.input(index)?;
        let left = self.layout.layout_margin_left + input.origin.x;
        let bounds = ViewRect::from_size(
            left,
            input.origin.y,
            input.measured_width(),
            input.measured_height(),
        );
        Some(bounds.flip_if(rtl, self.layout.view.width))
    }

    /// Whether a view-local point lands on the visible body of the block
    ///
    /// Only the field regions count; attached children handle their own hits.
    pub fn hit_test(&self, local: ViewPoint, rtl: bool) -> bool {
        let margin = self.layout.layout_margin_left;
        let content_width = self.layout.content.width;
        let (begin, end) = if rtl {
            let end = self.layout.view.width - margin;
            (end - content_width, end)
        } else {
            (margin, margin + content_width)
        };
        if local.x < begin || local.x > end {
            return false;
        }

        (0..self.layout.inputs.len()).any(|i| {
            let Some(bounds) = self.input_bounds(i, rtl) else {
                return false;
            };
            let input = &self.layout.inputs[i];
            let padding = self.layout.padding_left;
            let fields_left = if rtl {
                bounds.right - padding - input.field_layout_width()
            } else {
                bounds.left + padding
            };
            input.is_on_fields(local.x - fields_left, local.y - bounds.top)
        })
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn set_highlight_connection(&mut self, conn: ConnectionRef) {
        debug_assert_eq!(conn.block, self.block);
        self.highlight = Highlight::Connection(conn);
    }

    /// Highlight the whole block, inline Value ports included
    pub fn set_highlight_entire_block(&mut self) {
        self.highlight = Highlight::EntireBlock;
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = Highlight::None;
    }
}

/// Views for all blocks reachable from the workspace roots
#[derive(Debug, Clone, Default)]
pub struct BlockViewTree {
    helper: WorkspaceHelper,
    views: HashMap<BlockId, BlockView>,
    draw_order: Vec<BlockId>,
}

impl BlockViewTree {
    pub fn new(helper: WorkspaceHelper) -> Self {
        Self {
            helper,
            views: HashMap::new(),
            draw_order: vec![],
        }
    }

    pub fn helper(&self) -> &WorkspaceHelper {
        &self.helper
    }

    pub fn view(&self, id: BlockId) -> Option<&BlockView> {
        self.views.get(&id)
    }

    pub fn view_mut(&mut self, id: BlockId) -> Option<&mut BlockView> {
        self.views.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Blocks in paint order: parents before their children, roots in workspace order
    pub fn draw_order(&self) -> &[BlockId] {
        &self.draw_order
    }

    /// Measure every block, children before parents
    pub fn measure(&mut self, workspace: &Workspace, measurer: &dyn FieldMeasurer, theme: &Theme) {
        let mut previous = std::mem::take(&mut self.views);

        for id in post_order(workspace) {
            let Some(block) = workspace.block(id) else {
                continue;
            };
            let child_sizes: Vec<ViewSize> = block
                .inputs
                .iter()
                .map(|input| {
                    input
                        .target()
                        .and_then(|t| self.views.get(&t))
                        .map(|v| v.chain_size)
                        .unwrap_or_default()
                })
                .collect();
            let layout = measure_block(block, &child_sizes, measurer, theme);

            let chain_size = match block.next_block().and_then(|n| self.views.get(&n)) {
                Some(next) => ViewSize::new(
                    layout.view.width.max(next.chain_size.width),
                    layout.next_block_vertical_offset + next.chain_size.height,
                ),
                None => layout.view,
            };

            let mut view = BlockView::new(id, layout, chain_size);
            if let Some(old) = previous.remove(&id) {
                view.highlight = old.highlight;
            }
            self.views.insert(id, view);
        }
        debug!("measured {} block views", self.views.len());
    }

    /// Composite every view, then place all views starting from the roots
    pub fn layout(
        &mut self,
        workspace: &Workspace,
        provider: &dyn PatchProvider,
        metrics: &PatchMetrics,
    ) {
        let rtl = self.helper.is_rtl();
        for view in self.views.values_mut() {
            view.composite = composite(&view.layout, provider, metrics, rtl);
        }
        self.draw_order.clear();
        for root in workspace.roots() {
            self.relocate(workspace, root);
        }
    }

    /// Re-place a block and everything attached below it, without re-measuring
    ///
    /// A top-level block is placed at its own workspace position; any other block keeps its
    /// current origin and only its subtree moves.
    pub fn relocate(&mut self, workspace: &Workspace, start: BlockId) {
        let origin = match workspace.block(start) {
            Some(block) if block.is_top_level() => self.helper.workspace_to_view(block.position),
            Some(_) => match self.views.get(&start) {
                Some(view) => view.origin,
                None => return,
            },
            None => return,
        };

        let mut placed = HashSet::new();
        let mut stack = vec![(start, origin)];
        while let Some((id, origin)) = stack.pop() {
            if !placed.insert(id) {
                continue;
            }
            let Some(view) = self.views.get_mut(&id) else {
                continue;
            };
            view.origin = origin;
            if !self.draw_order.contains(&id) {
                self.draw_order.push(id);
            }

            let Some(block) = workspace.block(id) else {
                continue;
            };
            let view = &self.views[&id];
            let mut children = vec![];
            if let (Some(next), Some(offset)) = (block.next_block(), view.composite.connectors.next) {
                children.push((next, offset, ConnectionSlot::Previous));
            }
            for (i, input) in block.inputs.iter().enumerate().rev() {
                let (Some(child), Some(offset)) = (input.target(), view.connector_offset(ConnectionSlot::Input(i))) else {
                    continue;
                };
                let slot = match input.kind {
                    InputKind::Value => ConnectionSlot::Output,
                    _ => ConnectionSlot::Previous,
                };
                children.push((child, offset, slot));
            }

            for (child, offset, slot) in children {
                let Some(child_view) = self.views.get(&child) else {
                    continue;
                };
                let child_offset = child_view.connector_offset(slot).unwrap_or_default();
                stack.push((child, origin + offset - child_offset));
            }
        }
    }

    /// Whether a view point hits the visible body of a block
    pub fn hit_test(&self, id: BlockId, point: ViewPoint) -> bool {
        self.views
            .get(&id)
            .is_some_and(|view| view.hit_test(point - view.origin, self.helper.is_rtl()))
    }

    /// Topmost block whose body contains the point
    pub fn block_at(&self, point: ViewPoint) -> Option<BlockId> {
        self.draw_order
            .iter()
            .rev()
            .copied()
            .find(|&id| self.hit_test(id, point))
    }
}

/// Every block reachable from the roots, each after all blocks attached below it
fn post_order(workspace: &Workspace) -> Vec<BlockId> {
    let mut order = vec![];
    let mut seen = HashSet::new();
    let mut stack: Vec<(BlockId, bool)> = workspace
        .roots()
        .into_iter()
        .rev()
        .map(|id| (id, false))
        .collect();

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            order.push(id);
            continue;
        }
        if !seen.insert(id) {
            continue;
        }
        stack.push((id, true));
        let Some(block) = workspace.block(id) else {
            continue;
        };
        if let Some(next) = block.next_block() {
            stack.push((next, false));
        }
        for input in block.inputs.iter().rev() {
            if let Some(child) = input.target() {
                stack.push((child, false));
            }
        }
    }
    order
}
