//! Spatial index of connection positions

use std::collections::HashMap;

use crate::geometry::WorkspacePoint;
use crate::model::{BlockId, ConnectionRef, Workspace};

use super::sync::ConnectionMatcher;

/// Tracks where every connection sits so drags can find a compatible partner
#[derive(Debug, Clone, Default)]
pub struct ConnectionManager {
    positions: HashMap<ConnectionRef, WorkspacePoint>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self, conn: ConnectionRef) -> Option<WorkspacePoint> {
        self.positions.get(&conn).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Forget every connection owned by `block`
    pub fn remove_block(&mut self, block: BlockId) {
        self.positions.retain(|conn, _| conn.block != block);
    }

    /// Closest unconnected connection on another block that `conn` could attach to
    ///
    /// Only candidates within `radius` workspace units are considered. Ties go to the
    /// candidate listed first by block id and slot order.
    pub fn nearest_compatible(
        &self,
        workspace: &Workspace,
        conn: ConnectionRef,
        radius: f64,
    ) -> Option<ConnectionRef> {
        let kind = workspace.connection(conn)?.kind;
        let origin = self.position(conn)?;

        let mut best: Option<(ConnectionRef, f64)> = None;
        for (id, _) in workspace.iter() {
            if id == conn.block {
                continue;
            }
            for candidate in workspace.connections_of(id) {
                let Some(c) = workspace.connection(candidate) else {
                    continue;
                };
                if c.is_connected() || !kind.is_compatible_with(c.kind) {
                    continue;
                }
                let Some(position) = self.position(candidate) else {
                    continue;
                };
                let distance = origin.distance_to(position);
                if distance > radius {
                    continue;
                }
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((candidate, distance));
                }
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}

impl ConnectionMatcher for ConnectionManager {
    fn move_connection_to(
        &mut self,
        conn: ConnectionRef,
        block_position: WorkspacePoint,
        offset: WorkspacePoint,
    ) {
        self.positions.insert(conn, block_position + offset);
    }
}
