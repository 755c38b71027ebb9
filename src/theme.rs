//! Visual themes: patch metrics, field metrics and fallback colours
//!
//! A theme bundles every fixed pixel metric the layout engine and the compositor need.
//! Themes are written in TOML; any key left out falls back to the built-in default theme.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing a theme
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Fixed pixel metrics for block patches and connectors
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchMetrics {
    /// Height of the top block boundary
    pub block_top_padding: i32,
    /// Height of the bottom block boundary
    pub block_bottom_padding: i32,
    /// Width of the left block boundary
    pub block_left_padding: i32,
    /// Width of the right block boundary
    pub block_right_padding: i32,
    /// Extra width of the boundary carrying an external Value input connector
    pub value_input_width: i32,
    /// Width of the Output connector tab extruding on the left of a block
    pub output_connector_width: i32,
    /// Height of the Next connector tab extruding below a block
    pub next_connector_height: i32,
    /// Minimum horizontal extent of a Statement cutout's top arm
    pub statement_input_indent: i32,
    /// Padding between Statement fields and the connected chain
    pub statement_input_padding: i32,
    /// Intrinsic height of the top part of a Statement connector
    pub statement_top_height: i32,
    /// Height of the bottom arm closing a Statement cutout
    pub statement_bottom_height: i32,
    /// Minimum height of any block
    pub min_block_height: i32,
    /// Minimum width of any block (same as an empty field)
    pub min_width: i32,
    /// Size of an empty inline Value cutout
    pub inline_input_min_width: i32,
    pub inline_input_min_height: i32,
    /// Gap between an inline Value cutout and the next input in the row
    pub inline_input_trailing: i32,
}

impl PatchMetrics {
    /// Sum of left and right block padding
    pub fn block_total_padding_x(&self) -> i32 {
        self.block_left_padding + self.block_right_padding
    }
}

impl Default for PatchMetrics {
    fn default() -> Self {
        Self {
            block_top_padding: 8,
            block_bottom_padding: 8,
            block_left_padding: 8,
            block_right_padding: 8,
            value_input_width: 12,
            output_connector_width: 12,
            next_connector_height: 8,
            statement_input_indent: 24,
            statement_input_padding: 16,
            statement_top_height: 8,
            statement_bottom_height: 16,
            min_block_height: 40,
            min_width: 40,
            inline_input_min_width: 24,
            inline_input_min_height: 24,
            inline_input_trailing: 4,
        }
    }
}

/// Metrics used to estimate natural field sizes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldMetrics {
    /// Advance of one character of field text
    pub char_width: i32,
    /// Height of one line of field text
    pub line_height: i32,
    /// Horizontal gap between adjacent fields
    pub field_spacing: i32,
    /// Vertical padding above and below the field row
    pub field_padding_y: i32,
    /// Extra horizontal room around editable text
    pub editable_padding_x: i32,
    pub checkbox_size: i32,
    pub dropdown_arrow_width: i32,
    /// Minimum edge length of a colour swatch
    pub colour_min_size: i32,
}

impl Default for FieldMetrics {
    fn default() -> Self {
        Self {
            char_width: 7,
            line_height: 16,
            field_spacing: 8,
            field_padding_y: 4,
            editable_padding_x: 8,
            checkbox_size: 16,
            dropdown_arrow_width: 12,
            colour_min_size: 40,
        }
    }
}

/// Theme-wide colours
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeColours {
    /// Colour for blocks that do not declare one
    pub block: String,
    /// Stroke colour for highlighted blocks and connectors
    pub highlight: String,
}

impl Default for ThemeColours {
    fn default() -> Self {
        Self {
            block: "#5b80a5".to_string(),
            highlight: "#ffcc33".to_string(),
        }
    }
}

/// A complete visual theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub metrics: PatchMetrics,
    pub fields: FieldMetrics,
    pub colours: ThemeColours,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    metrics: PatchMetrics,
    #[serde(default)]
    fields: FieldMetrics,
    #[serde(default)]
    colours: ThemeColours,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default theme, matching the stock block look
const DEFAULT_THEME: &str = r##"
[metadata]
name = "default"
description = "Stock block metrics"

[metrics]
block_top_padding = 8
block_bottom_padding = 8
block_left_padding = 8
block_right_padding = 8
value_input_width = 12
output_connector_width = 12
next_connector_height = 8
statement_input_indent = 24
statement_input_padding = 16
statement_top_height = 8
statement_bottom_height = 16
min_block_height = 40
min_width = 40
inline_input_min_width = 24
inline_input_min_height = 24
inline_input_trailing = 4

[fields]
char_width = 7
line_height = 16
field_spacing = 8
field_padding_y = 4
editable_padding_x = 8
checkbox_size = 16
dropdown_arrow_width = 12
colour_min_size = 40

[colours]
block = "#5b80a5"
highlight = "#ffcc33"
"##;

impl Theme {
    /// Load a theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a theme from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        Ok(Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            metrics: parsed.metrics,
            fields: parsed.fields,
            colours: parsed.colours,
        })
    }

    /// Replace the patch metrics
    pub fn with_metrics(mut self, metrics: PatchMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replace the field metrics
    pub fn with_field_metrics(mut self, fields: FieldMetrics) -> Self {
        self.fields = fields;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_str(DEFAULT_THEME).expect("Default theme should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_matches_struct_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.name.as_deref(), Some("default"));
        assert_eq!(theme.metrics, PatchMetrics::default());
        assert_eq!(theme.fields, FieldMetrics::default());
        assert_eq!(theme.colours, ThemeColours::default());
    }

    #[test]
    fn test_total_padding() {
        let metrics = PatchMetrics {
            block_left_padding: 3,
            block_right_padding: 5,
            ..PatchMetrics::default()
        };
        assert_eq!(metrics.block_total_padding_x(), 8);
    }

    #[test]
    fn test_partial_theme_falls_back_to_defaults() {
        let theme = Theme::from_str(
            r##"
[metrics]
min_block_height = 64
"##,
        )
        .expect("Should parse");
        assert_eq!(theme.name, None);
        assert_eq!(theme.metrics.min_block_height, 64);
        assert_eq!(theme.metrics.block_top_padding, 8);
        assert_eq!(theme.fields.char_width, 7);
    }

    #[test]
    fn test_theme_with_metadata() {
        let theme = Theme::from_str(
            r##"
[metadata]
name = "Compact"
description = "Tight paddings"

[colours]
block = "#112233"
"##,
        )
        .expect("Should parse");
        assert_eq!(theme.name, Some("Compact".to_string()));
        assert_eq!(theme.description, Some("Tight paddings".to_string()));
        assert_eq!(theme.colours.block, "#112233");
        assert_eq!(theme.colours.highlight, "#ffcc33");
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        let result = Theme::from_str("[metrics]\nblock_margin = 3\n");
        assert!(matches!(result, Err(ThemeError::ParseError(_))));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Theme::from_str("this is not valid toml {{{{");
        assert!(result.is_err());
    }
}
