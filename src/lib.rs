//! Blockview - block geometry and rendering for visual programming editors
//!
//! Blocks are measured into rows of inputs, decomposed into stretched nine-patch
//! outline pieces and background fills, placed relative to the blocks they are
//! plugged into, and rendered to SVG.
//!
//! # Example
//!
//! ```rust
//! use blockview::render;
//!
//! let svg = render(r#"
//!     [[block]]
//!     id = "start"
//!     next = true
//! "#).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod patch;
pub mod renderer;
pub mod theme;
pub mod view;

pub use error::ParseError;
pub use geometry::{ViewPoint, ViewRect, ViewSize, WorkspacePoint};
pub use layout::{measure_block, BlockLayout, EstimatingMeasurer, FieldMeasurer};
pub use model::{parse_description, Block, BlockId, Colour, ModelError, Workspace};
pub use patch::{composite, Composite, MetricPatches, PatchProvider};
pub use renderer::{render_svg, SvgConfig};
pub use theme::{Theme, ThemeError};
pub use view::{BlockViewTree, ConnectionManager, WorkspaceHelper};

use log::debug;
use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
}

impl RenderError {
    /// Format the error with source context when its location is known
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RenderError::Parse(e) => e.format(source, filename),
            RenderError::Model(e) => {
                let message = e.to_string();
                let label = match e.suggestions() {
                    Some([first, rest @ ..]) => {
                        let mut names = vec![format!("`{}`", first)];
                        names.extend(rest.iter().map(|s| format!("`{}`", s)));
                        format!("did you mean {}?", names.join(" or "))
                    }
                    _ => message.clone(),
                };
                match e.span() {
                    Some(span) => error::report(source, filename, span.clone(), &message, &label),
                    None => format!("error: {}", message),
                }
            }
            RenderError::InvalidScale(_) => format!("error: {}", self),
        }
    }
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Metrics and colours
    pub theme: Theme,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Lay blocks out right to left
    pub rtl: bool,
    /// View pixels per workspace unit; rendering fails unless positive and finite
    pub scale: f64,
    /// Draw connector centres
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            svg: SvgConfig::default(),
            rtl: false,
            scale: 1.0,
            debug: false,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render a workspace description to SVG with default configuration
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render a workspace description to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use blockview::{render_with_config, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_rtl(true)
///     .with_svg(SvgConfig::default().with_viewbox_padding(0));
///
/// let svg = render_with_config("[[block]]\nid = \"a\"\n", config).unwrap();
/// assert!(svg.contains("bv-rtl"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    if !(config.scale.is_finite() && config.scale > 0.0) {
        return Err(RenderError::InvalidScale(config.scale));
    }
    let theme = &config.theme;
    let default_colour = Colour::parse_hex(&theme.colours.block).unwrap_or_else(|| {
        log::warn!(
            "theme block colour {:?} is not a hex colour, using black",
            theme.colours.block
        );
        Colour::BLACK
    });

    let mut workspace = parse_description(source)?.into_workspace(default_colour)?;

    let mut tree = BlockViewTree::new(WorkspaceHelper::new(config.scale, config.rtl));
    tree.measure(
        &workspace,
        &EstimatingMeasurer::new(theme.fields.clone()),
        theme,
    );
    tree.layout(
        &workspace,
        &MetricPatches::new(theme.metrics.clone()),
        &theme.metrics,
    );

    let mut connections = ConnectionManager::new();
    view::update_all_connector_locations(&tree, &mut workspace, &mut connections);
    debug!(
        "laid out {} blocks with {} connections",
        tree.len(),
        connections.len()
    );

    Ok(render_svg(
        &workspace,
        &tree,
        theme,
        &config.svg,
        config.debug,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_block() {
        let svg = render("[[block]]\nid = \"a\"\n").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"id="a""#));
        assert!(svg.contains("#5b80a5"));
    }

    #[test]
    fn test_render_parse_error() {
        let err = render("[[block]\n").unwrap_err();
        assert!(matches!(err, RenderError::Parse(_)));
    }

    #[test]
    fn test_model_error_report_suggests() {
        let source = r#"
[[block]]
id = "b"
output = true

[[block]]
id = "p"
[[block.input]]
name = "V"
kind = "value"
block = "bb"
"#;
        let err = render(source).unwrap_err();
        assert!(matches!(err, RenderError::Model(_)));
        let report = err.format(source, "test.toml");
        assert!(report.contains("test.toml"));
        assert!(report.contains("did you mean `b`?"));
    }

    #[test]
    fn test_rejects_degenerate_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = render_with_config("[[block]]\nid = \"a\"\n", RenderConfig::new().with_scale(scale))
                .unwrap_err();
            assert!(matches!(err, RenderError::InvalidScale(_)), "scale {scale}");
        }
    }
}
