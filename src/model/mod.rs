//! Block graph model
//!
//! Blocks live in a [`Workspace`] arena and refer to each other by [`BlockId`]. Connections
//! hold non-owning ids of the block on the other end, so the graph never needs shared
//! ownership and the view layer can keep its own `BlockId`-keyed map.

pub mod block;
pub mod colour;
pub mod description;
pub mod error;

pub use block::{
    Block, BlockId, BlockShape, Connection, ConnectionKind, ConnectionRef, ConnectionSlot, Field,
    Input, InputKind,
};
pub use colour::{Colour, ColourSpec};
pub use description::{parse_description, Description};
pub use error::ModelError;

use std::collections::{HashMap, HashSet};

use crate::geometry::WorkspacePoint;

/// Arena of blocks addressed by [`BlockId`]
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    blocks: Vec<Block>,
    index: HashMap<String, BlockId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block; names must be unique
    pub fn add_block(&mut self, block: Block) -> Result<BlockId, ModelError> {
        if self.index.contains_key(&block.name) {
            return Err(ModelError::DuplicateBlock {
                id: block.name,
                span: None,
            });
        }
        let id = BlockId(self.blocks.len());
        self.index.insert(block.name.clone(), id);
        self.blocks.push(block);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(id.0)
    }

    /// Look up a block by name
    pub fn find(&self, name: &str) -> Option<BlockId> {
        self.index.get(name).copied()
    }

    /// Look up a block by name, suggesting close names on failure
    pub fn resolve(&self, name: &str) -> Result<BlockId, ModelError> {
        self.find(name).ok_or_else(|| {
            ModelError::unknown(
                name,
                None,
                find_similar(self.index.keys().map(String::as_str), name, 2),
            )
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks.iter().enumerate().map(|(i, b)| (BlockId(i), b))
    }

    fn name_of(&self, id: BlockId) -> String {
        self.block(id)
            .map(|b| b.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn get(&self, id: BlockId) -> Result<&Block, ModelError> {
        self.block(id)
            .ok_or_else(|| ModelError::unknown(id.to_string(), None, vec![]))
    }

    /// Block directly above `id`: the one it hangs from or is plugged into
    pub fn parent_of(&self, id: BlockId) -> Option<BlockId> {
        let block = self.block(id)?;
        block.previous_block().or_else(|| block.output_target())
    }

    /// Plug `child` into input `input_index` of `parent`
    ///
    /// Value inputs take a child with an Output connector, Statement inputs take a child
    /// with a Previous connector. Dummy inputs never take a child.
    pub fn connect_input(
        &mut self,
        parent: BlockId,
        input_index: usize,
        child: BlockId,
    ) -> Result<(), ModelError> {
        let parent_block = self.get(parent)?;
        let child_block = self.get(child)?;
        let input = parent_block
            .inputs
            .get(input_index)
            .ok_or_else(|| ModelError::InputOutOfRange {
                block: parent_block.name.clone(),
                index: input_index,
                len: parent_block.inputs.len(),
            })?;

        let kind = input.kind;
        let (expected, has_connector) = match kind {
            InputKind::Dummy => {
                return Err(ModelError::DummyInputWithBlock {
                    block: parent_block.name.clone(),
                    input: input.name.clone(),
                    span: None,
                })
            }
            InputKind::Value => ("output", child_block.output.is_some()),
            InputKind::Statement => ("previous", child_block.previous.is_some()),
        };
        if !has_connector {
            return Err(ModelError::missing_connector(
                &parent_block.name,
                &child_block.name,
                expected,
            ));
        }
        if let Some(occupant) = input.target() {
            return Err(ModelError::already_attached(
                self.name_of(occupant),
                &parent_block.name,
            ));
        }
        self.check_attachable(parent, child)?;

        if let Some(conn) = self.blocks[parent.0].inputs[input_index].connection.as_mut() {
            conn.target = Some(child);
        }
        let child_block = &mut self.blocks[child.0];
        let upward = match kind {
            InputKind::Value => child_block.output.as_mut(),
            _ => child_block.previous.as_mut(),
        };
        if let Some(conn) = upward {
            conn.target = Some(parent);
        }
        Ok(())
    }

    /// Hang `child` below `parent` through their Next and Previous connectors
    pub fn connect_next(&mut self, parent: BlockId, child: BlockId) -> Result<(), ModelError> {
        let parent_block = self.get(parent)?;
        let child_block = self.get(child)?;
        let Some(next) = parent_block.next.as_ref() else {
            return Err(ModelError::MissingSlot {
                parent: parent_block.name.clone(),
                child: child_block.name.clone(),
                slot: "next connector".to_string(),
                span: None,
            });
        };
        if child_block.previous.is_none() {
            return Err(ModelError::missing_connector(
                &parent_block.name,
                &child_block.name,
                "previous",
            ));
        }
        if let Some(occupant) = next.target {
            return Err(ModelError::already_attached(
                self.name_of(occupant),
                &parent_block.name,
            ));
        }
        self.check_attachable(parent, child)?;

        if let Some(conn) = self.blocks[parent.0].next.as_mut() {
            conn.target = Some(child);
        }
        if let Some(conn) = self.blocks[child.0].previous.as_mut() {
            conn.target = Some(parent);
        }
        Ok(())
    }

    /// Reject a child that already hangs somewhere or sits above `parent`
    fn check_attachable(&self, parent: BlockId, child: BlockId) -> Result<(), ModelError> {
        if let Some(holder) = self.parent_of(child) {
            return Err(ModelError::already_attached(
                self.name_of(child),
                self.name_of(holder),
            ));
        }

        let mut path = vec![parent];
        let mut current = parent;
        while current != child {
            match self.parent_of(current) {
                Some(up) if path.len() <= self.blocks.len() => {
                    path.push(up);
                    current = up;
                }
                _ => return Ok(()),
            }
        }

        let mut cycle: Vec<String> = path.iter().rev().map(|&id| self.name_of(id)).collect();
        cycle.push(self.name_of(child));
        Err(ModelError::Cycle { cycle })
    }

    /// Top-level blocks in insertion order
    pub fn roots(&self) -> Vec<BlockId> {
        self.iter()
            .filter(|(_, b)| b.is_top_level())
            .map(|(id, _)| id)
            .collect()
    }

    /// Blocks reached from `head` by following Next connections, `head` included
    pub fn chain(&self, head: BlockId) -> Vec<BlockId> {
        let mut seen = HashSet::new();
        let mut out = vec![];
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            if !seen.insert(id) || self.block(id).is_none() {
                break;
            }
            out.push(id);
            cursor = self.block(id).and_then(Block::next_block);
        }
        out
    }

    pub fn connection(&self, conn: ConnectionRef) -> Option<&Connection> {
        let block = self.block(conn.block)?;
        match conn.slot {
            ConnectionSlot::Previous => block.previous.as_ref(),
            ConnectionSlot::Next => block.next.as_ref(),
            ConnectionSlot::Output => block.output.as_ref(),
            ConnectionSlot::Input(i) => block.inputs.get(i)?.connection.as_ref(),
        }
    }

    pub fn connection_mut(&mut self, conn: ConnectionRef) -> Option<&mut Connection> {
        let block = self.block_mut(conn.block)?;
        match conn.slot {
            ConnectionSlot::Previous => block.previous.as_mut(),
            ConnectionSlot::Next => block.next.as_mut(),
            ConnectionSlot::Output => block.output.as_mut(),
            ConnectionSlot::Input(i) => block.inputs.get_mut(i)?.connection.as_mut(),
        }
    }

    /// Every connection a block owns: previous, next, output, then inputs in order
    pub fn connections_of(&self, id: BlockId) -> Vec<ConnectionRef> {
        let Some(block) = self.block(id) else {
            return vec![];
        };
        let mut refs = vec![];
        if block.previous.is_some() {
            refs.push(ConnectionRef::new(id, ConnectionSlot::Previous));
        }
        if block.next.is_some() {
            refs.push(ConnectionRef::new(id, ConnectionSlot::Next));
        }
        if block.output.is_some() {
            refs.push(ConnectionRef::new(id, ConnectionSlot::Output));
        }
        for (i, input) in block.inputs.iter().enumerate() {
            if input.connection.is_some() {
                refs.push(ConnectionRef::new(id, ConnectionSlot::Input(i)));
            }
        }
        refs
    }

    pub fn set_position(&mut self, id: BlockId, position: WorkspacePoint) {
        if let Some(block) = self.block_mut(id) {
            block.position = position;
        }
    }

    /// Flag every connection of the given blocks as part of a drag
    pub fn set_drag_mode(&mut self, blocks: &[BlockId], drag: bool) {
        for &id in blocks {
            for conn in self.connections_of(id) {
                if let Some(c) = self.connection_mut(conn) {
                    c.drag_mode = drag;
                }
            }
        }
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0usize; b.len() + 1];
    for i in 1..=a.len() {
        row[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            row[j] = (prev[j] + 1).min(row[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

/// Find block names within a maximum edit distance, closest first
pub(crate) fn find_similar<'a>(
    names: impl Iterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = names
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist > 0 && dist <= max_distance).then_some((name, dist))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn expression(name: &str) -> Block {
        Block::new(name, BlockShape::Output, Colour::BLACK)
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("number", "number"), 0);
        assert_eq!(levenshtein_distance("number", "nmber"), 1);
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_find_similar_orders_by_distance() {
        let names = ["print", "prints", "paint", "loop"];
        let found = find_similar(names.iter().copied(), "prnt", 2);
        assert_eq!(found, vec!["paint", "print", "prints"]);
    }

    #[test]
    fn test_duplicate_block_rejected() {
        let mut ws = Workspace::new();
        ws.add_block(statement("a")).unwrap();
        let err = ws.add_block(statement("a")).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateBlock { .. }));
    }

    #[test]
    fn test_resolve_suggests() {
        let mut ws = Workspace::new();
        ws.add_block(statement("repeat")).unwrap();
        let err = ws.resolve("repaet").unwrap_err();
        assert_eq!(err.suggestions(), Some(&["repeat".to_string()][..]));
    }

    #[test]
    fn test_connect_value_input() {
        let mut ws = Workspace::new();
        let parent = ws
            .add_block(statement("if").with_input(Input::value("COND", vec![])))
            .unwrap();
        let child = ws.add_block(expression("true")).unwrap();
        ws.connect_input(parent, 0, child).unwrap();

        assert_eq!(ws.block(parent).unwrap().inputs[0].target(), Some(child));
        assert_eq!(ws.block(child).unwrap().output_target(), Some(parent));
        assert_eq!(ws.parent_of(child), Some(parent));
        assert_eq!(ws.roots(), vec![parent]);
    }

    #[test]
    fn test_connect_rejects_wrong_connector() {
        let mut ws = Workspace::new();
        let parent = ws
            .add_block(statement("if").with_input(Input::value("COND", vec![])))
            .unwrap();
        let child = ws.add_block(statement("print")).unwrap();
        let err = ws.connect_input(parent, 0, child).unwrap_err();
        assert!(matches!(err, ModelError::MissingConnector { .. }));
    }

    #[test]
    fn test_connect_rejects_dummy_and_out_of_range() {
        let mut ws = Workspace::new();
        let parent = ws
            .add_block(statement("p").with_input(Input::dummy("D", vec![])))
            .unwrap();
        let child = ws.add_block(expression("x")).unwrap();
        assert!(matches!(
            ws.connect_input(parent, 0, child),
            Err(ModelError::DummyInputWithBlock { .. })
        ));
        assert!(matches!(
            ws.connect_input(parent, 3, child),
            Err(ModelError::InputOutOfRange { index: 3, len: 1, .. })
        ));
    }

    #[test]
    fn test_attach_twice_rejected() {
        let mut ws = Workspace::new();
        let a = ws.add_block(statement("a")).unwrap();
        let b = ws.add_block(statement("b")).unwrap();
        let c = ws.add_block(statement("c")).unwrap();
        ws.connect_next(a, c).unwrap();
        let err = ws.connect_next(b, c).unwrap_err();
        assert!(matches!(err, ModelError::AlreadyAttached { .. }));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut ws = Workspace::new();
        let a = ws.add_block(statement("a")).unwrap();
        let b = ws.add_block(statement("b")).unwrap();
        ws.connect_next(a, b).unwrap();
        let err = ws.connect_next(b, a);
        // `a` is top-level, so the only reason to reject is the loop
        match err {
            Err(ModelError::Cycle { cycle }) => assert_eq!(cycle, vec!["a", "b", "a"]),
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_chain_follows_next() {
        let mut ws = Workspace::new();
        let a = ws.add_block(statement("a")).unwrap();
        let b = ws.add_block(statement("b")).unwrap();
        let c = ws.add_block(statement("c")).unwrap();
        ws.connect_next(a, b).unwrap();
        ws.connect_next(b, c).unwrap();
        assert_eq!(ws.chain(a), vec![a, b, c]);
        assert_eq!(ws.chain(b), vec![b, c]);
        assert_eq!(ws.roots(), vec![a]);
    }

    #[test]
    fn test_connections_of_order() {
        let mut ws = Workspace::new();
        let id = ws
            .add_block(
                statement("s")
                    .with_input(Input::dummy("D", vec![]))
                    .with_input(Input::statement("DO", vec![])),
            )
            .unwrap();
        assert_eq!(
            ws.connections_of(id),
            vec![
                ConnectionRef::new(id, ConnectionSlot::Previous),
                ConnectionRef::new(id, ConnectionSlot::Next),
                ConnectionRef::new(id, ConnectionSlot::Input(1)),
            ]
        );
    }

    #[test]
    fn test_drag_mode_flags_connections() {
        let mut ws = Workspace::new();
        let id = ws.add_block(statement("s")).unwrap();
        ws.set_drag_mode(&[id], true);
        let prev = ConnectionRef::new(id, ConnectionSlot::Previous);
        assert!(ws.connection(prev).unwrap().drag_mode);
    }
}
