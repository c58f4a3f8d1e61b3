//! Scale-to-fit mapping and hit-testing

use crate::analysis::RectItem;

use super::PreviewConfig;

/// A point on the preview surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box on the preview surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if this bounding box contains a point, edges included
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

/// Maps design coordinates onto the padded preview surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub padding: f64,
}

impl Viewport {
    /// Largest uniform scale that fits the design canvas inside the padding
    ///
    /// A zero or unparseable canvas gives no usable scale; the design is then
    /// drawn at 1:1.
    pub fn fit(svg_width: f64, svg_height: f64, config: &PreviewConfig) -> Self {
        let scale_x = (config.canvas_width - config.padding * 2.0) / svg_width;
        let scale_y = (config.canvas_height - config.padding * 2.0) / svg_height;
        let scale = if scale_x.is_nan() || scale_y.is_nan() {
            f64::NAN
        } else {
            scale_x.min(scale_y)
        };
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            scale,
            padding: config.padding,
        }
    }

    /// Where a design-space box lands on the preview surface
    pub fn project(&self, x: f64, y: f64, width: f64, height: f64) -> BoundingBox {
        BoundingBox::new(
            self.padding + x * self.scale,
            self.padding + y * self.scale,
            width * self.scale,
            height * self.scale,
        )
    }

    pub fn project_item(&self, item: &RectItem) -> BoundingBox {
        self.project(item.x(), item.y(), item.width(), item.height())
    }

    /// Index of the topmost rectangle under `point`
    ///
    /// Later rectangles are drawn over earlier ones, so the scan runs from the
    /// last item backwards and the first hit wins.
    pub fn hit_test(&self, items: &[RectItem], point: Point) -> Option<usize> {
        items
            .iter()
            .enumerate()
            .rev()
            .find(|(_, item)| self.project_item(item).contains(point))
            .map(|(index, _)| index)
    }
}
