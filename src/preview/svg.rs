//! SVG output for the scaled design preview

use crate::analysis::{AnalysisResult, RectItem};

use super::viewport::{BoundingBox, Viewport};
use super::PreviewConfig;

/// Stroke applied to one rectangle in the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
}

/// Pick the outline for a rectangle
///
/// Out-of-bounds rectangles are always highlighted red, even while hovered.
pub fn stroke_for<'a>(item: &RectItem, hovered: bool, config: &'a PreviewConfig) -> Stroke<'a> {
    if item.is_out_of_bounds() {
        Stroke {
            color: &config.stroke_out_of_bounds,
            width: config.line_width_highlighted,
        }
    } else if hovered {
        Stroke {
            color: &config.stroke_hovered,
            width: config.line_width_highlighted,
        }
    } else {
        Stroke {
            color: &config.stroke_default,
            width: config.line_width_default,
        }
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

impl SvgBuilder {
    /// Create a builder for a surface of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: vec![],
        }
    }

    /// Add the design canvas background
    pub fn add_background(&mut self, bounds: BoundingBox, fill: &str) {
        self.elements.push(format!(
            r#"  <rect class="preview-canvas" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            escape_attr(fill)
        ));
    }

    /// Add one design rectangle
    pub fn add_rect(&mut self, index: usize, bounds: BoundingBox, fill: &str, stroke: Stroke<'_>) {
        self.elements.push(format!(
            r#"  <rect class="preview-item" data-index="{}" x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            index,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            escape_attr(fill),
            escape_attr(stroke.color),
            stroke.width
        ));
    }

    /// Finish the document
    pub fn build(self) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        ));
        svg.push('\n');
        for element in &self.elements {
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// Render a design as a scaled preview
///
/// Rectangles are drawn in document order, so later ones sit on top, the
/// same order [`Viewport::hit_test`] resolves overlaps in.
pub fn render_preview(design: &AnalysisResult, config: &PreviewConfig, hovered: Option<usize>) -> String {
    let viewport = Viewport::fit(design.svg_width(), design.svg_height(), config);
    let mut builder = SvgBuilder::new(config.canvas_width, config.canvas_height);

    builder.add_background(
        viewport.project(0.0, 0.0, design.svg_width(), design.svg_height()),
        &config.background,
    );

    for (index, item) in design.items().iter().enumerate() {
        let stroke = stroke_for(item, hovered == Some(index), config);
        builder.add_rect(index, viewport.project_item(item), item.fill(), stroke);
    }

    builder.build()
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn test_stroke_priority() {
        let config = PreviewConfig::default();
        let design = analyze(
            r#"<svg width="100" height="100"><rect width="10" height="10"/><rect x="95" width="10" height="10"/></svg>"#,
            "s.svg",
        )
        .unwrap();
        let inside = &design.items()[0];
        let outside = &design.items()[1];

        assert_eq!(stroke_for(inside, false, &config).color, "#374151");
        assert_eq!(stroke_for(inside, false, &config).width, 1.0);
        assert_eq!(stroke_for(inside, true, &config).color, "#4F46E5");
        assert_eq!(stroke_for(outside, true, &config).color, "#FF0000");
        assert_eq!(stroke_for(outside, false, &config).width, 2.5);
    }

    #[test]
    fn test_render_preview_draws_items_in_order() {
        let design = analyze(
            r#"<svg width="100" height="100"><rect fill="red" width="10" height="10"/><rect fill="blue" x="50" width="10" height="10"/></svg>"#,
            "o.svg",
        )
        .unwrap();
        let svg = render_preview(&design, &PreviewConfig::default(), None);
        let red = svg.find(r#"fill="red""#).unwrap();
        let blue = svg.find(r#"fill="blue""#).unwrap();
        assert!(red < blue);
        assert!(svg.contains(r#"class="preview-canvas" x="15" y="15" width="270" height="270""#));
    }

    #[test]
    fn test_fill_is_escaped() {
        let design = analyze(r#"<svg><rect fill="a&quot;b"/></svg>"#, "e.svg").unwrap();
        let svg = render_preview(&design, &PreviewConfig::default(), None);
        assert!(svg.contains(r#"fill="a&quot;b""#));
    }
}
