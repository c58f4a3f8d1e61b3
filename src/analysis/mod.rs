//! SVG-to-design analysis
//!
//! Turns SVG text into an [`AnalysisResult`] in one synchronous pass:
//!
//! 1. parse the markup into an element tree, closing mismatched or unclosed
//!    tags instead of failing
//! 2. find the `<svg>` root (the only step that can fail)
//! 3. read `width`/`height` and the direct `<rect>` children
//! 4. coerce attribute text to numbers, defaulting missing values
//! 5. classify each rectangle and derive coverage, issues and status

pub mod coerce;
pub mod extract;
pub mod types;

pub use types::{AnalysisResult, Canvas, DesignIssue, DesignStatus, RectIssue, RectItem, RectSpec};

use tracing::{debug, warn};

use crate::error::{format_parse_errors, MalformedInputError};
use crate::parser::{self, Document};

use self::extract::RawRect;

/// Analyze SVG text
///
/// `filename` is carried into the result untouched. Fails only when the text
/// has no recognizable `<svg>` root.
pub fn analyze(svg_text: &str, filename: &str) -> Result<AnalysisResult, MalformedInputError> {
    let doc = parser::parse(svg_text).unwrap_or_else(|errors| {
        warn!(filename, errors = %format_parse_errors(&errors), "markup not parsed; no root available");
        Document::default()
    });
    debug!(filename, roots = doc.roots.len(), "parsed markup");

    let root = extract::locate_root(&doc)?;
    let raw = extract::extract(&root.node);

    let canvas = Canvas::new(coerce::number(raw.width), coerce::number(raw.height));
    debug!(
        filename,
        width = canvas.width,
        height = canvas.height,
        rects = raw.rects.len(),
        "extracted canvas"
    );

    let result = AnalysisResult::new(filename, canvas, raw.rects.iter().map(rect_spec));
    debug!(
        filename,
        status = %result.status(),
        coverage = result.coverage_ratio(),
        "analysis complete"
    );
    Ok(result)
}

fn rect_spec(raw: &RawRect<'_>) -> RectSpec {
    RectSpec {
        x: coerce::number(raw.x),
        y: coerce::number(raw.y),
        width: coerce::number(raw.width),
        height: coerce::number(raw.height),
        fill: coerce::text_or(raw.fill, coerce::DEFAULT_FILL),
    }
}
