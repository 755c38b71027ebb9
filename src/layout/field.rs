//! Natural sizes of block fields

use crate::geometry::ViewSize;
use crate::model::Field;
use crate::theme::FieldMetrics;

/// Host collaborator that knows how large a field draws itself
pub trait FieldMeasurer {
    fn measure(&self, field: &Field) -> ViewSize;
}

/// Estimates field sizes from fixed per-character metrics
#[derive(Debug, Clone, Default)]
pub struct EstimatingMeasurer {
    metrics: FieldMetrics,
}

impl EstimatingMeasurer {
    pub fn new(metrics: FieldMetrics) -> Self {
        Self { metrics }
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.metrics.char_width
    }

    fn editable(&self, text: &str, extra: i32) -> ViewSize {
        ViewSize::new(
            self.text_width(text) + 2 * self.metrics.editable_padding_x + extra,
            self.metrics.line_height,
        )
    }
}

impl FieldMeasurer for EstimatingMeasurer {
    fn measure(&self, field: &Field) -> ViewSize {
        let m = &self.metrics;
        let text = field.display_text().unwrap_or_default();
        match field {
            Field::Label { .. } => ViewSize::new(self.text_width(&text), m.line_height),
            Field::Input { .. } | Field::Angle { .. } | Field::Date { .. } => {
                self.editable(&text, 0)
            }
            Field::Dropdown { .. } | Field::Variable { .. } => {
                self.editable(&text, m.dropdown_arrow_width)
            }
            Field::Checkbox { .. } => ViewSize::new(m.checkbox_size, m.checkbox_size),
            Field::Colour { .. } => ViewSize::new(m.colour_min_size, m.colour_min_size),
            Field::Image { width, height, .. } => ViewSize::new((*width).max(0), (*height).max(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_width_per_char() {
        let measurer = EstimatingMeasurer::default();
        let size = measurer.measure(&Field::Label {
            text: "repeat".into(),
        });
        assert_eq!(size, ViewSize::new(42, 16));
    }

    #[test]
    fn test_dropdown_has_arrow() {
        let measurer = EstimatingMeasurer::default();
        let size = measurer.measure(&Field::Dropdown {
            options: vec!["ab".into()],
            selected: 0,
        });
        assert_eq!(size.width, 14 + 16 + 12);
    }

    #[test]
    fn test_colour_field_minimum() {
        let measurer = EstimatingMeasurer::default();
        let size = measurer.measure(&Field::Colour {
            colour: "#ff0000".into(),
        });
        assert!(size.width >= 40 && size.height >= 40);
    }

    #[test]
    fn test_image_uses_declared_size() {
        let measurer = EstimatingMeasurer::default();
        let size = measurer.measure(&Field::Image {
            src: "star.png".into(),
            width: 15,
            height: 20,
        });
        assert_eq!(size, ViewSize::new(15, 20));
    }
}
