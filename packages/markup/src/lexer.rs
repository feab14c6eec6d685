//! Lexer for card markup using logos
//!
//! The lexer only needs to be good enough to find elements and their
//! attributes. Text, comments and doctypes are kept as opaque tokens so the
//! byte offsets of every tag stay exact.

use logos::{Lexer, Logos};
use std::ops::Range;

/// Elements that never have a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Top-level markup tokens
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `<!-- ... -->` or `<!DOCTYPE ...>`
    #[token("<!", declaration)]
    Declaration,

    /// `<name attr="value" ...>` (the callback consumes up to the closing `>`)
    #[regex(r"<[a-zA-Z][a-zA-Z0-9:-]*", start_tag)]
    StartTag,

    #[regex(r"</[a-zA-Z][a-zA-Z0-9:-]*[ \t\r\n]*>")]
    EndTag,

    #[regex(r"[^<]+")]
    Text,
}

fn declaration(lex: &mut Lexer<Token>) -> bool {
    let rest = lex.remainder();
    let (terminator, skip) = if rest.starts_with("--") {
        ("-->", 3)
    } else {
        (">", 1)
    };

    match rest.find(terminator) {
        Some(pos) => {
            lex.bump(pos + skip);
            true
        }
        None => false,
    }
}

fn start_tag(lex: &mut Lexer<Token>) -> bool {
    let mut quote: Option<char> = None;

    for (i, ch) in lex.remainder().char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '>' => {
                    lex.bump(i + 1);
                    return true;
                }
                _ => {}
            },
        }
    }

    // Unterminated tag, let it fall through as text
    false
}

/// Tokens inside a start tag, after the element name
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum AttrToken {
    #[regex(r#"[^ \t\r\n"'>=<]+"#)]
    Word,

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[token(">")]
    Close,
}

/// A single attribute of a start tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name
    pub name: String,

    /// Raw value (quotes stripped), `None` for boolean attributes
    pub value: Option<String>,

    /// Byte range of the value inside the scanned source (quotes excluded)
    pub value_span: Option<Range<usize>>,
}

/// A start tag with its parsed attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Lowercased element name
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub span: Range<usize>,
    pub self_closing: bool,
}

impl StartTag {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(|a| a.value.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// True for elements that have no content and no end tag
    pub fn is_void(&self) -> bool {
        self.self_closing || VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

/// Structural events produced by [`scan`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Start(StartTag),
    End { name: String, span: Range<usize> },
}

/// Scan markup into start/end tag events with byte offsets into `source`.
///
/// Text, comments, doctypes and anything the lexer rejects are skipped.
pub fn scan(source: &str) -> Vec<TagEvent> {
    let mut events = Vec::new();
    let mut lex = Token::lexer(source);

    while let Some(token) = lex.next() {
        let span = lex.span();
        match token {
            Ok(Token::StartTag) => events.push(TagEvent::Start(parse_start_tag(lex.slice(), span))),
            Ok(Token::EndTag) => {
                let name = lex.slice()[2..]
                    .trim_end_matches('>')
                    .trim_end()
                    .to_ascii_lowercase();
                events.push(TagEvent::End { name, span });
            }
            Ok(Token::Declaration) | Ok(Token::Text) | Err(_) => {}
        }
    }

    events
}

fn parse_start_tag(slice: &str, span: Range<usize>) -> StartTag {
    let name_end = slice[1..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == ':' || c == '-'))
        .map(|i| i + 1)
        .unwrap_or(slice.len());
    let name = slice[1..name_end].to_ascii_lowercase();
    let self_closing = slice.trim_end_matches('>').trim_end().ends_with('/');

    let offset = span.start + name_end;
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut expect_value = false;
    let mut lex = AttrToken::lexer(&slice[name_end..]);

    while let Some(token) = lex.next() {
        let local = lex.span();
        match token {
            Ok(AttrToken::Word) if expect_value => {
                if let Some(last) = attributes.last_mut() {
                    last.value = Some(lex.slice().to_string());
                    last.value_span = Some(offset + local.start..offset + local.end);
                }
                expect_value = false;
            }
            Ok(AttrToken::Word) => {
                // A lone "/" is the self-closing marker
                if lex.slice() != "/" {
                    attributes.push(Attribute {
                        name: lex.slice().trim_end_matches('/').to_ascii_lowercase(),
                        value: None,
                        value_span: None,
                    });
                }
            }
            Ok(AttrToken::Eq) => expect_value = !attributes.is_empty(),
            Ok(AttrToken::DoubleQuoted) | Ok(AttrToken::SingleQuoted) if expect_value => {
                if let Some(last) = attributes.last_mut() {
                    let quoted = lex.slice();
                    last.value = Some(quoted[1..quoted.len() - 1].to_string());
                    last.value_span = Some(offset + local.start + 1..offset + local.end - 1);
                }
                expect_value = false;
            }
            _ => expect_value = false,
        }
    }

    StartTag {
        name,
        attributes,
        span,
        self_closing,
    }
}

/// Quote an attribute value, preferring double quotes
pub fn quote_attr(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{}\"", value)
    } else if !value.contains('\'') {
        format!("'{}'", value)
    } else {
        format!("\"{}\"", value.replace('"', "&quot;"))
    }
}
