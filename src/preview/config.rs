//! Configuration for the design preview

use serde::Deserialize;

/// Size, spacing and highlight colors of the preview canvas
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Width of the preview surface in pixels
    pub canvas_width: f64,

    /// Height of the preview surface in pixels
    pub canvas_height: f64,

    /// Margin between the preview edge and the scaled design
    pub padding: f64,

    /// Fill behind the scaled design canvas
    pub background: String,

    /// Stroke for rectangles flagged out of bounds
    pub stroke_out_of_bounds: String,

    /// Stroke for the rectangle under the pointer
    pub stroke_hovered: String,

    /// Stroke for every other rectangle
    pub stroke_default: String,

    /// Line width for out-of-bounds and hovered rectangles
    pub line_width_highlighted: f64,

    /// Line width for every other rectangle
    pub line_width_default: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 300.0,
            padding: 15.0,
            background: "#F3F4F6".to_string(),
            stroke_out_of_bounds: "#FF0000".to_string(),
            stroke_hovered: "#4F46E5".to_string(),
            stroke_default: "#374151".to_string(),
            line_width_highlighted: 2.5,
            line_width_default: 1.0,
        }
    }
}

impl PreviewConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preview surface size
    pub fn with_canvas_size(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Set the padding around the scaled design
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the background fill
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }
}
