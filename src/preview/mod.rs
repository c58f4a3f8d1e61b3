//! Visual inspection of analyzed designs
//!
//! Scales a design onto a fixed-size surface, renders it as SVG with
//! out-of-bounds and hover highlighting, and resolves which rectangle sits
//! under a point.

pub mod config;
pub mod svg;
pub mod viewport;

pub use config::PreviewConfig;
pub use svg::{render_preview, stroke_for, Stroke};
pub use viewport::{BoundingBox, Point, Viewport};
