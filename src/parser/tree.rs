//! Element tree produced by the markup parser

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// An attribute as written in the source, with its raw textual value
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A markup element with its attributes and child elements
///
/// Text content is not kept; the analyzer only looks at elements and
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Spanned<Attribute>>,
    pub children: Vec<Spanned<Element>>,
}

impl Element {
    /// Raw value of an attribute, if present
    ///
    /// When an attribute is repeated the last occurrence wins.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|a| a.node.name == name)
            .map(|a| a.node.value.as_str())
    }

    /// Direct children with the given element name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Spanned<Element>> + 'a {
        self.children.iter().filter(move |c| c.node.name == name)
    }
}

/// A parsed markup document: every top-level element in order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub roots: Vec<Spanned<Element>>,
}

impl Document {
    /// First top-level element with the given name
    pub fn root_named(&self, name: &str) -> Option<&Spanned<Element>> {
        self.roots.iter().find(|r| r.node.name == name)
    }
}
