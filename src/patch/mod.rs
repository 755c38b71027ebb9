//! Block outline composition
//!
//! Turns a [`BlockLayout`](crate::layout::BlockLayout) into an ordered list of stretched
//! border patches, merged background fill rectangles and connector offsets.

pub mod compositor;
pub mod fill;
pub mod kind;

pub use compositor::{composite, Composite, ConnectorOffsets};
pub use fill::FillRects;
pub use kind::{MetricPatches, Patch, PatchImage, PatchKind, PatchProvider};
