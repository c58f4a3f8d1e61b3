//! Root validation and rectangle normalization
//!
//! Works on raw attribute text only. Numeric coercion happens afterwards, in
//! one place, so nothing here checks for missing values.

use crate::error::MalformedInputError;
use crate::parser::{Document, Element, Span, Spanned};

/// Name of the root drawing-surface element
pub const ROOT_ELEMENT: &str = "svg";

/// Name of the rectangle primitive
pub const RECT_ELEMENT: &str = "rect";

/// Raw attribute text of the root and its rectangles
#[derive(Debug, Clone, PartialEq)]
pub struct RawSvg<'a> {
    pub width: Option<&'a str>,
    pub height: Option<&'a str>,
    pub rects: Vec<RawRect<'a>>,
}

/// Raw attribute text of one `<rect>`
#[derive(Debug, Clone, PartialEq)]
pub struct RawRect<'a> {
    pub x: Option<&'a str>,
    pub y: Option<&'a str>,
    pub width: Option<&'a str>,
    pub height: Option<&'a str>,
    pub fill: Option<&'a str>,
    pub span: Span,
}

impl<'a> RawRect<'a> {
    fn from_element(rect: &'a Spanned<Element>) -> Self {
        let el = &rect.node;
        Self {
            x: el.attr("x"),
            y: el.attr("y"),
            width: el.attr("width"),
            height: el.attr("height"),
            fill: el.attr("fill"),
            span: rect.span.clone(),
        }
    }
}

/// Find the first top-level `<svg>` element
pub fn locate_root(doc: &Document) -> Result<&Spanned<Element>, MalformedInputError> {
    doc.root_named(ROOT_ELEMENT)
        .ok_or_else(|| MalformedInputError::MissingRoot {
            found: doc.roots.first().map(|r| r.node.name.clone()),
        })
}

/// Read the canvas attributes and every direct `<rect>` child in document order
///
/// Zero, one or many rectangles all come out as the same ordered list.
pub fn extract(root: &Element) -> RawSvg<'_> {
    RawSvg {
        width: root.attr("width"),
        height: root.attr("height"),
        rects: root
            .children_named(RECT_ELEMENT)
            .map(RawRect::from_element)
            .collect(),
    }
}
