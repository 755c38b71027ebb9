//! View adapter: per-block views, coordinate conversion and connector synchronization

pub mod connection_manager;
pub mod helper;
pub mod sync;
pub mod tree;

pub use connection_manager::ConnectionManager;
pub use helper::WorkspaceHelper;
pub use sync::{update_all_connector_locations, update_connector_locations, ConnectionMatcher};
pub use tree::{BlockView, BlockViewTree, Highlight};
