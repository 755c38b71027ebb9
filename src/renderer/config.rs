//! How block views are written out as SVG

/// Output settings for [`render_svg`](super::render_svg)
///
/// Geometry is never affected; these only change how the document is framed and
/// which class names the pieces carry.
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Margin kept around the union of all block bounds
    pub viewbox_padding: i32,
    /// Start with an `<?xml ...?>` declaration so the output can be saved as a file
    pub standalone: bool,
    pub pretty_print: bool,
    /// Put in front of every class a block piece carries, such as `tl-default` or `fill`
    pub class_prefix: Option<String>,
    /// Debug marker size at each connector centre
    pub connector_radius: i32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 20,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("bv-".to_string()),
            connector_radius: 10,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class name for a block piece, prefixed when a prefix is set
    pub fn class(&self, name: &str) -> String {
        match &self.class_prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }

    pub fn with_viewbox_padding(mut self, padding: i32) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Leave out the XML declaration, for embedding in HTML
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Emit bare piece names such as `patch` and `tl-default`
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_connector_radius(mut self, radius: i32) -> Self {
        self.connector_radius = radius;
        self
    }
}
