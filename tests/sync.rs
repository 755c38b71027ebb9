//! Connector positions flowing from views back into the model

use blockview::model::{Block, BlockShape, Colour, ConnectionRef, ConnectionSlot, Input, Workspace};
use blockview::view::{
    update_all_connector_locations, update_connector_locations, BlockViewTree, ConnectionManager,
    WorkspaceHelper,
};
use blockview::{EstimatingMeasurer, MetricPatches, Theme, ViewPoint, WorkspacePoint};
use pretty_assertions::assert_eq;

fn statement(name: &str) -> Block {
    Block::new(
        name,
        BlockShape::Statement {
            previous: true,
            next: true,
        },
        Colour::BLACK,
    )
}

fn lay_out(workspace: &Workspace, helper: WorkspaceHelper) -> BlockViewTree {
    let theme = Theme::default();
    let mut tree = BlockViewTree::new(helper);
    tree.measure(workspace, &EstimatingMeasurer::default(), &theme);
    tree.layout(
        workspace,
        &MetricPatches::new(theme.metrics.clone()),
        &theme.metrics,
    );
    tree
}

fn position(workspace: &Workspace, block: blockview::BlockId, slot: ConnectionSlot) -> WorkspacePoint {
    workspace
        .connection(ConnectionRef::new(block, slot))
        .map(|c| c.position)
        .unwrap()
}

#[test]
fn offsets_round_trip_through_the_helper() {
    let helper = WorkspaceHelper::new(2.0, false).with_view_origin(WorkspacePoint::new(-10.0, 5.0));
    for offset in [ViewPoint::new(8, 40), ViewPoint::new(-3, 7), ViewPoint::new(0, 0)] {
        let delta = helper.view_to_workspace_delta(offset);
        assert_eq!(helper.workspace_to_view_delta(delta), offset);
    }
    let point = WorkspacePoint::new(12.5, -4.0);
    assert_eq!(
        helper.view_to_workspace(helper.workspace_to_view(point)),
        point
    );
}

#[test]
fn attached_blocks_follow_their_parent() {
    let mut ws = Workspace::new();
    let a = ws
        .add_block(statement("a").with_position(10.0, 20.0))
        .unwrap();
    let b = ws.add_block(statement("b")).unwrap();
    ws.connect_next(a, b).unwrap();

    let tree = lay_out(&ws, WorkspaceHelper::new(2.0, false));
    let mut manager = ConnectionManager::new();
    update_all_connector_locations(&tree, &mut ws, &mut manager);

    assert_eq!(tree.view(b).map(|v| v.origin), Some(ViewPoint::new(20, 80)));
    assert_eq!(ws.block(b).unwrap().position, WorkspacePoint::new(10.0, 40.0));
    assert_eq!(
        position(&ws, a, ConnectionSlot::Next),
        position(&ws, b, ConnectionSlot::Previous)
    );
    assert_eq!(
        position(&ws, a, ConnectionSlot::Next),
        WorkspacePoint::new(14.0, 40.0)
    );
    assert_eq!(manager.len(), 4);
}

#[test]
fn statement_body_is_updated_with_its_parent() {
    let mut ws = Workspace::new();
    let parent = ws
        .add_block(statement("loop").with_input(Input::statement("DO", vec![])))
        .unwrap();
    let first = ws.add_block(statement("first")).unwrap();
    let second = ws.add_block(statement("second")).unwrap();
    ws.connect_input(parent, 0, first).unwrap();
    ws.connect_next(first, second).unwrap();

    let tree = lay_out(&ws, WorkspaceHelper::default());
    let mut manager = ConnectionManager::new();
    update_connector_locations(&tree, &mut ws, &mut manager, parent);

    assert_eq!(
        position(&ws, parent, ConnectionSlot::Input(0)),
        position(&ws, first, ConnectionSlot::Previous)
    );
    assert_eq!(
        position(&ws, first, ConnectionSlot::Next),
        position(&ws, second, ConnectionSlot::Previous)
    );
    assert!(manager
        .position(ConnectionRef::new(second, ConnectionSlot::Next))
        .is_some());
}

#[test]
fn nearest_compatible_after_layout() {
    let mut ws = Workspace::new();
    let a = ws.add_block(statement("a")).unwrap();
    let b = ws
        .add_block(statement("b").with_position(0.0, 45.0))
        .unwrap();

    let tree = lay_out(&ws, WorkspaceHelper::default());
    let mut manager = ConnectionManager::new();
    update_all_connector_locations(&tree, &mut ws, &mut manager);

    let dragged = ConnectionRef::new(b, ConnectionSlot::Previous);
    assert_eq!(
        manager.nearest_compatible(&ws, dragged, 10.0),
        Some(ConnectionRef::new(a, ConnectionSlot::Next))
    );
    assert_eq!(manager.nearest_compatible(&ws, dragged, 4.0), None);
}

#[test]
fn moved_stack_resyncs_its_connectors() {
    let mut ws = Workspace::new();
    let a = ws
        .add_block(statement("a").with_position(10.0, 20.0))
        .unwrap();
    let b = ws.add_block(statement("b")).unwrap();
    ws.connect_next(a, b).unwrap();

    let mut tree = lay_out(&ws, WorkspaceHelper::default());
    let mut manager = ConnectionManager::new();
    update_all_connector_locations(&tree, &mut ws, &mut manager);
    let before = position(&ws, b, ConnectionSlot::Previous);

    ws.set_position(a, WorkspacePoint::new(50.0, 70.0));
    tree.relocate(&ws, a);
    for id in ws.chain(a) {
        update_connector_locations(&tree, &mut ws, &mut manager, id);
    }

    assert_eq!(tree.view(b).map(|v| v.origin), Some(ViewPoint::new(50, 110)));
    assert_eq!(ws.block(b).unwrap().position, WorkspacePoint::new(50.0, 110.0));
    let after = position(&ws, b, ConnectionSlot::Previous);
    assert_eq!(after, before + WorkspacePoint::new(40.0, 50.0));
    assert_eq!(position(&ws, a, ConnectionSlot::Next), after);
    assert_eq!(
        manager.position(ConnectionRef::new(b, ConnectionSlot::Previous)),
        Some(after)
    );
}
