//! Block layout engine
//!
//! This module measures blocks: it takes a block's inputs, the natural sizes of their fields
//! and the sizes of attached chains, and produces a [`BlockLayout`] with positioned inputs.

pub mod engine;
pub mod field;
pub mod input;
pub mod types;

pub use engine::measure_block;
pub use field::{EstimatingMeasurer, FieldMeasurer};
pub use input::InputLayout;
pub use types::{BlockLayout, LayoutMode};
