//! Pushes laid-out connector positions back into the model

use log::{trace, warn};

use crate::geometry::WorkspacePoint;
use crate::model::{BlockId, ConnectionRef, Workspace};

use super::tree::BlockViewTree;

/// Receives connection positions whenever a block is laid out
pub trait ConnectionMatcher {
    /// `offset` is relative to `block_position`; both are in workspace coordinates
    fn move_connection_to(
        &mut self,
        conn: ConnectionRef,
        block_position: WorkspacePoint,
        offset: WorkspacePoint,
    );
}

/// Update connection positions of `start` and of every block plugged into its inputs
///
/// Blocks hanging off `start`'s Next connector are not visited; callers walking a stack
/// call this once per block in the chain.
pub fn update_connector_locations(
    tree: &BlockViewTree,
    workspace: &mut Workspace,
    matcher: &mut dyn ConnectionMatcher,
    start: BlockId,
) {
    let helper = *tree.helper();
    let mut stack = vec![start];
    let mut visited = 0usize;

    while let Some(id) = stack.pop() {
        visited += 1;
        if visited > workspace.len() {
            warn!("connector update revisited blocks; stopping at {}", id);
            break;
        }
        let Some(view) = tree.view(id) else {
            warn!("block {} has no view, connectors left in place", id);
            continue;
        };

        let top_level = workspace.block(id).is_some_and(|b| b.is_top_level());
        if !top_level {
            workspace.set_position(id, helper.view_to_workspace(view.origin));
        }
        let Some(block_position) = workspace.block(id).map(|b| b.position) else {
            continue;
        };

        for conn in workspace.connections_of(id) {
            let Some(offset) = view.connector_offset(conn.slot) else {
                continue;
            };
            let delta = helper.view_to_workspace_delta(offset);
            if let Some(c) = workspace.connection_mut(conn) {
                c.position = block_position + delta;
            }
            trace!("{} {:?} at {:?}", id, conn.slot, block_position + delta);
            matcher.move_connection_to(conn, block_position, delta);
        }

        let Some(block) = workspace.block(id) else {
            continue;
        };
        let children: Vec<BlockId> = block.inputs.iter().filter_map(|i| i.target()).collect();
        for child in children.into_iter().rev() {
            stack.extend(workspace.chain(child).into_iter().rev());
        }
    }
}

/// Update every block reachable from the workspace roots
pub fn update_all_connector_locations(
    tree: &BlockViewTree,
    workspace: &mut Workspace,
    matcher: &mut dyn ConnectionMatcher,
) {
    for root in workspace.roots() {
        for id in workspace.chain(root) {
            update_connector_locations(tree, workspace, matcher, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::EstimatingMeasurer;
    use crate::model::{Block, BlockShape, Colour, ConnectionSlot, Input};
    use crate::patch::MetricPatches;
    use crate::theme::Theme;
    use crate::view::WorkspaceHelper;

    #[derive(Default)]
    struct Recorder(Vec<(ConnectionRef, WorkspacePoint)>);

    impl ConnectionMatcher for Recorder {
        fn move_connection_to(
            &mut self,
            conn: ConnectionRef,
            block_position: WorkspacePoint,
            offset: WorkspacePoint,
        ) {
            self.0.push((conn, block_position + offset));
        }
    }

    #[test]
    fn test_plugged_child_gets_position() {
        let mut ws = Workspace::new();
        let parent = ws
            .add_block(
                Block::new("p", BlockShape::Plain, Colour::BLACK)
                    .with_position(100.0, 50.0)
                    .with_input(Input::value("V", vec![])),
            )
            .unwrap();
        let child = ws
            .add_block(Block::new("c", BlockShape::Output, Colour::BLACK))
            .unwrap();
        ws.connect_input(parent, 0, child).unwrap();

        let theme = Theme::default();
        let mut tree = BlockViewTree::new(WorkspaceHelper::new(2.0, false));
        tree.measure(&ws, &EstimatingMeasurer::default(), &theme);
        tree.layout(
            &ws,
            &MetricPatches::new(theme.metrics.clone()),
            &theme.metrics,
        );

        let mut recorder = Recorder::default();
        update_all_connector_locations(&tree, &mut ws, &mut recorder);

        let input = ConnectionRef::new(parent, ConnectionSlot::Input(0));
        let output = ConnectionRef::new(child, ConnectionSlot::Output);
        let input_pos = ws.connection(input).unwrap().position;
        let output_pos = ws.connection(output).unwrap().position;
        assert_eq!(input_pos, output_pos);
        assert_eq!(ws.block(parent).unwrap().position, WorkspacePoint::new(100.0, 50.0));
        assert_eq!(recorder.0.len(), 2);
    }
}
