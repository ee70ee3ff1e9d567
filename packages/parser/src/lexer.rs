//! Lexer for markup documents using logos
//!
//! Markup is context sensitive: text between tags and the inside of a tag
//! follow different rules. Two token sets cover the two contexts and the
//! tokenizer switches between them with [`logos::Lexer::morph`].

use crate::error::{ParseError, ParseResult};
use logos::{Lexer, Logos};
use std::ops::Range;

/// Tokens between tags
#[derive(Logos, Debug, Clone, PartialEq)]
enum ContentToken<'src> {
    #[token("<")]
    Open,

    #[token("</")]
    CloseOpen,

    #[token("<!--", skip_comment)]
    Comment,

    #[regex(r"<![a-zA-Z][^>]*>")]
    Doctype,

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

fn skip_comment<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> bool {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

/// Tokens inside `<...>`
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum TagToken<'src> {
    #[token(">")]
    End,

    #[token("/>")]
    SelfClose,

    #[token("=")]
    Equals,

    #[regex(r"[a-zA-Z_:][a-zA-Z0-9_:.\-]*", |lex| lex.slice(), priority = 3)]
    Name(&'src str),

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    #[regex(r#"[^\s"'=<>/`]+"#, |lex| lex.slice(), priority = 1)]
    Value(&'src str),
}

/// Unified token stream consumed by the parser
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    /// `<`
    OpenTag,
    /// `</`
    CloseTagOpen,
    /// `>`
    TagEnd,
    /// `/>`
    SelfClose,
    Equals,
    Name(&'src str),
    Value(&'src str),
    Text(&'src str),
}

impl<'src> Token<'src> {
    pub fn describe(&self) -> String {
        match self {
            Token::OpenTag => "'<'".to_string(),
            Token::CloseTagOpen => "'</'".to_string(),
            Token::TagEnd => "'>'".to_string(),
            Token::SelfClose => "'/>'".to_string(),
            Token::Equals => "'='".to_string(),
            Token::Name(name) => format!("name '{}'", name),
            Token::Value(value) => format!("value \"{}\"", value),
            Token::Text(_) => "text".to_string(),
        }
    }
}

enum Mode<'src> {
    Content(Lexer<'src, ContentToken<'src>>),
    Tag(Lexer<'src, TagToken<'src>>),
}

/// Tokenize markup source. Comments and doctype declarations are dropped.
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token<'_>, Range<usize>)>> {
    let mut tokens = Vec::new();
    let mut mode = Mode::Content(ContentToken::lexer(source));

    loop {
        mode = match mode {
            Mode::Content(mut lex) => {
                let Some(result) = lex.next() else { break };
                let span = lex.span();
                let token = result.map_err(|_| ParseError::LexerError { span: span.clone().into() })?;

                match token {
                    ContentToken::Open => {
                        tokens.push((Token::OpenTag, span));
                        Mode::Tag(lex.morph())
                    }
                    ContentToken::CloseOpen => {
                        tokens.push((Token::CloseTagOpen, span));
                        Mode::Tag(lex.morph())
                    }
                    ContentToken::Text(text) => {
                        tokens.push((Token::Text(text), span));
                        Mode::Content(lex)
                    }
                    ContentToken::Comment | ContentToken::Doctype => Mode::Content(lex),
                }
            }
            Mode::Tag(mut lex) => {
                let Some(result) = lex.next() else { break };
                let span = lex.span();
                let token = result.map_err(|_| ParseError::LexerError { span: span.clone().into() })?;

                match token {
                    TagToken::End => {
                        tokens.push((Token::TagEnd, span));
                        Mode::Content(lex.morph())
                    }
                    TagToken::SelfClose => {
                        tokens.push((Token::SelfClose, span));
                        Mode::Content(lex.morph())
                    }
                    TagToken::Equals => {
                        tokens.push((Token::Equals, span));
                        Mode::Tag(lex)
                    }
                    TagToken::Name(name) => {
                        tokens.push((Token::Name(name), span));
                        Mode::Tag(lex)
                    }
                    TagToken::Value(value) => {
                        tokens.push((Token::Value(value), span));
                        Mode::Tag(lex)
                    }
                }
            }
        };
    }

    Ok(tokens)
}
