//! Error types for parsing and analysis

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A structural error in the markup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }
}

/// The input has no recognizable `<svg>` root element
///
/// This is the only way analysis fails. Missing attributes never raise it;
/// they fall back to defaults.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedInputError {
    /// No top-level element is `<svg>`; `found` names the first one, if any
    #[error("Invalid SVG: missing <svg> root element{}", format_found(.found))]
    MissingRoot { found: Option<String> },
}

fn format_found(found: &Option<String>) -> String {
    match found {
        Some(name) => format!(" (found <{}>)", name),
        None => String::new(),
    }
}

/// Join parse errors into one line
pub fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl MalformedInputError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            MalformedInputError::MissingRoot { .. } => {
                let message = self.to_string();
                let end = source.len().min(source.find('>').map(|i| i + 1).unwrap_or(0));
                let written = Report::build(ReportKind::Error, filename, 0)
                    .with_message(&message)
                    .with_label(
                        Label::new((filename, 0..end))
                            .with_message("expected an <svg> element here")
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return message;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::TagOpen(name) => format!("start of <{}>", name),
        Token::TagClose(name) => format!("closing tag </{}>", name),
        Token::Name(s) => format!("attribute '{}'", s),
        Token::Value(s) => format!("value \"{}\"", s),
        Token::Equals => "'='".to_string(),
        Token::TagEnd => "'>'".to_string(),
        Token::SelfClose => "'/>'".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_display() {
        let err = MalformedInputError::MissingRoot {
            found: Some("html".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid SVG: missing <svg> root element (found <html>)"
        );

        let err = MalformedInputError::MissingRoot { found: None };
        assert_eq!(err.to_string(), "Invalid SVG: missing <svg> root element");
    }

    #[test]
    fn test_parse_errors_joined() {
        let text = format_parse_errors(&[
            ParseError::Syntax {
                span: 0..1,
                message: "first".to_string(),
                expected: vec![],
            },
            ParseError::Syntax {
                span: 2..3,
                message: "second".to_string(),
                expected: vec![],
            },
        ]);
        assert_eq!(
            text,
            "Parse error at 0..1: first; Parse error at 2..3: second"
        );
    }

    #[test]
    fn test_format_includes_filename() {
        let source = "<html></html>";
        let err = MalformedInputError::MissingRoot {
            found: Some("html".to_string()),
        };
        let report = err.format(source, "page.svg");
        assert!(report.contains("page.svg"));
        assert!(report.contains("missing <svg> root element"));
    }
}
