//! SVG adapter
//!
//! Draws laid-out block views as grouped, class-tagged rectangles.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, SvgBuilder};
