//! Markup lexer using logos
//!
//! SVG text is lexed in two modes. Content mode looks for the start of tags
//! and skips everything the analyzer does not need (text, comments, CDATA,
//! processing instructions, doctype declarations). Once a tag opens, the lexer
//! morphs into tag mode to read attributes until `>` or `/>`, then morphs back.

use logos::{Lexer, Logos, Skip};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Tokens handed to the grammar
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `<name`
    TagOpen(String),
    /// `</name>`
    TagClose(String),
    /// Attribute name (or an unquoted value that looks like a name)
    Name(String),
    /// `=`
    Equals,
    /// Quoted or unquoted attribute value
    Value(String),
    /// `>`
    TagEnd,
    /// `/>`
    SelfClose,
}

#[derive(Logos, Debug, PartialEq)]
enum Content {
    #[regex(r"<[A-Za-z_:][A-Za-z0-9_:.\-]*", |lex| lex.slice()[1..].to_string())]
    TagOpen(String),

    #[regex(r"</[A-Za-z_:][A-Za-z0-9_:.\-]*[ \t\r\n]*>", |lex| close_tag_name(lex.slice()))]
    TagClose(String),

    #[token("<!--", |lex| skip_past(lex, "-->"))]
    Comment,

    #[token("<![CDATA[", |lex| skip_past(lex, "]]>"))]
    CData,

    #[token("<?", |lex| skip_past(lex, "?>"))]
    Instruction,

    #[regex(r"<![A-Za-z]", skip_declaration)]
    Declaration,

    #[regex(r"[^<]+", logos::skip)]
    Text,
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Tag {
    #[regex(r"[A-Za-z_:][A-Za-z0-9_:.\-]*", |lex| lex.slice().to_string())]
    Name(String),

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, unquote)]
    #[regex(r"'[^']*'", unquote)]
    Quoted(String),

    #[regex(r#"[^ \t\r\n"'=<>/`A-Za-z_:][^ \t\r\n"'=<>/`]*"#, |lex| lex.slice().to_string())]
    Unquoted(String),

    #[token(">")]
    End,

    #[token("/>")]
    SelfClose,
}

fn close_tag_name(slice: &str) -> String {
    slice[2..slice.len() - 1].trim_end().to_string()
}

fn unquote(lex: &mut Lexer<'_, Tag>) -> String {
    let s = lex.slice();
    s[1..s.len() - 1].to_string()
}

/// Skip up to and including `terminator`, or to the end of input if it never appears
fn skip_past(lex: &mut Lexer<'_, Content>, terminator: &str) -> Skip {
    let remainder = lex.remainder();
    let len = remainder
        .find(terminator)
        .map(|i| i + terminator.len())
        .unwrap_or(remainder.len());
    lex.bump(len);
    Skip
}

/// Skip a `<!...>` declaration, including a bracketed internal subset
fn skip_declaration(lex: &mut Lexer<'_, Content>) -> Skip {
    let remainder = lex.remainder();
    let mut consumed = remainder.len();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in remainder.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => {
                    consumed = i + 1;
                    break;
                }
                _ => {}
            },
        }
    }

    lex.bump(consumed);
    Skip
}

/// Lex input string into tokens with spans
///
/// Characters that fit neither mode (a bare `<` in text, a stray `/` inside a
/// tag) are dropped.
pub fn lex(input: &str) -> Vec<(Token, Span)> {
    let mut tokens = Vec::new();
    let mut content = Content::lexer(input);

    while let Some(result) = content.next() {
        let span = content.span();
        match result {
            Ok(Content::TagOpen(name)) => {
                tokens.push((Token::TagOpen(name), span));

                let mut tag = content.morph::<Tag>();
                while let Some(result) = tag.next() {
                    let span = tag.span();
                    let token = match result {
                        Ok(Tag::Name(s)) => Token::Name(s),
                        Ok(Tag::Equals) => Token::Equals,
                        Ok(Tag::Quoted(s)) | Ok(Tag::Unquoted(s)) => Token::Value(s),
                        Ok(Tag::End) => {
                            tokens.push((Token::TagEnd, span));
                            break;
                        }
                        Ok(Tag::SelfClose) => {
                            tokens.push((Token::SelfClose, span));
                            break;
                        }
                        Err(()) => continue,
                    };
                    tokens.push((token, span));
                }
                content = tag.morph();
            }
            Ok(Content::TagClose(name)) => tokens.push((Token::TagClose(name), span)),
            Ok(_) | Err(()) => {}
        }
    }

    tokens
}
