//! Markup grammar using chumsky
//!
//! The grammar reads a flat sequence of tags; [`build_tree`] then nests them.
//! Nesting is lenient: a closing tag shuts every element opened after its
//! matching ancestor, a closing tag with no open match is ignored, and
//! whatever is still open at the end of input is closed there.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use tracing::debug;

use crate::parser::lexer::Token;
use crate::parser::tree::{Attribute, Document, Element, Spanned};

/// One tag as it appears in the source
#[derive(Debug, Clone, PartialEq)]
enum Markup {
    Open {
        name: String,
        attributes: Vec<Spanned<Attribute>>,
        self_closing: bool,
    },
    Close(String),
}

/// Parse markup text into an element tree
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input)
        .into_iter()
        .map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    markup_parser()
        .parse(token_stream)
        .into_result()
        .map(|events| build_tree(events, len))
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn markup_parser<'a, I>() -> impl Parser<'a, I, Vec<Spanned<Markup>>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Name(s) => s,
    };

    // Unquoted values that look like names lex as names
    let value = select! {
        Token::Name(s) => s,
        Token::Value(s) => s,
    };

    // `name = value`; a bare `name` is kept as None and dropped below
    let attribute = name
        .then(just(Token::Equals).ignore_then(value).or_not())
        .map_with(|(name, value), e| {
            value.map(|value| {
                Spanned::new(
                    Attribute {
                        name,
                        value: decode_entities(&value),
                    },
                    span_range(&e.span()),
                )
            })
        });

    // A value or `=` with no name in front of it
    let stray = select! {
        Token::Value(_) => (),
        Token::Equals => (),
    }
    .map(|_| None::<Spanned<Attribute>>);

    let attributes = choice((attribute, stray))
        .repeated()
        .collect::<Vec<_>>()
        .map(|attrs| attrs.into_iter().flatten().collect::<Vec<_>>());

    // A tag cut off by the end of input has no terminator and stays open
    let open_tag = select! {
        Token::TagOpen(s) => s,
    }
    .then(attributes)
    .then(
        select! {
            Token::SelfClose => true,
            Token::TagEnd => false,
        }
        .or_not(),
    )
    .map(|((name, attributes), end)| Markup::Open {
        name,
        attributes,
        self_closing: end.unwrap_or(false),
    });

    let close_tag = select! {
        Token::TagClose(s) => Markup::Close(s),
    };

    choice((open_tag, close_tag))
        .map_with(|markup, e| Spanned::new(markup, span_range(&e.span())))
        .repeated()
        .collect()
        .then_ignore(end())
}

/// Nest a flat tag sequence into a document
fn build_tree(events: Vec<Spanned<Markup>>, input_len: usize) -> Document {
    let mut roots = Vec::new();
    let mut open: Vec<Spanned<Element>> = Vec::new();

    for Spanned { node, span } in events {
        match node {
            Markup::Open {
                name,
                attributes,
                self_closing,
            } => {
                let element = Spanned::new(
                    Element {
                        name,
                        attributes,
                        children: Vec::new(),
                    },
                    span,
                );
                if self_closing {
                    attach(&mut open, &mut roots, element);
                } else {
                    open.push(element);
                }
            }
            Markup::Close(name) => {
                let Some(depth) = open.iter().rposition(|el| el.node.name == name) else {
                    debug!(tag = %name, "ignoring closing tag with no open element");
                    continue;
                };
                while open.len() > depth + 1 {
                    close_innermost(&mut open, &mut roots, span.start);
                }
                close_innermost(&mut open, &mut roots, span.end);
            }
        }
    }

    if !open.is_empty() {
        debug!(unclosed = open.len(), "closing elements left open at end of input");
    }
    while !open.is_empty() {
        close_innermost(&mut open, &mut roots, input_len);
    }

    Document { roots }
}

/// Pop the innermost open element, extend its span to `end` and attach it
fn close_innermost(open: &mut Vec<Spanned<Element>>, roots: &mut Vec<Spanned<Element>>, end: usize) {
    if let Some(mut element) = open.pop() {
        element.span = element.span.start..end.max(element.span.end);
        attach(open, roots, element);
    }
}

fn attach(open: &mut [Spanned<Element>], roots: &mut Vec<Spanned<Element>>, element: Spanned<Element>) {
    match open.last_mut() {
        Some(parent) => parent.node.children.push(element),
        None => roots.push(element),
    }
}

/// Decode the predefined XML entities and numeric character references
///
/// Unknown or malformed references are left as written.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .and_then(|semi| decode_reference(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
