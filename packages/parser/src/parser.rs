use crate::ast::{is_skeleton_tag, is_void_tag, Element};
use crate::entities;
use crate::error::{ParseError, ParseResult, TokenSpan};
use crate::id_generator::IDGenerator;
use crate::lexer::{tokenize, Token};
use std::collections::HashMap;
use std::ops::Range;

/// Recursive-descent parser over the token stream
pub struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    source_len: usize,
    /// Explicit ids seen so far, with where they were declared
    explicit_ids: HashMap<String, TokenSpan>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        Ok(Self {
            tokens: tokenize(source)?,
            pos: 0,
            source_len: source.len(),
            explicit_ids: HashMap::new(),
        })
    }

    /// Parse a complete document and return its `html` root
    pub fn parse_document(&mut self) -> ParseResult<Element> {
        let mut html = None;

        while !self.is_at_end() {
            match self.peek() {
                Some((Token::Text(_), _)) => {
                    self.advance();
                }
                Some((Token::OpenTag, _)) => {
                    let element = self.parse_element()?;
                    if html.is_none() && element.tag == "html" {
                        html = Some(element);
                    } else if let Some(found) = element.find_tag("html") {
                        html.get_or_insert_with(|| found.clone());
                    }
                }
                _ => return Err(self.unexpected("an element")),
            }
        }

        let mut root =
            html.ok_or_else(|| ParseError::invalid_structure("document must have an <html> root"))?;

        self.assign_missing_ids(&mut root);
        validate_skeleton(&root)?;
        Ok(root)
    }

    fn parse_element(&mut self) -> ParseResult<Element> {
        self.expect(Token::OpenTag, "'<'")?;
        let tag = self.expect_name("a tag name")?.to_ascii_lowercase();

        let mut id = String::new();
        let self_closed = loop {
            match self.peek() {
                Some((Token::TagEnd, _)) => {
                    self.advance();
                    break false;
                }
                Some((Token::SelfClose, _)) => {
                    self.advance();
                    break true;
                }
                Some((Token::Name(_), _)) => {
                    let (name, value, span) = self.parse_attribute()?;
                    if name.eq_ignore_ascii_case("id") {
                        id = self.declare_id(value, span)?;
                    }
                }
                _ => return Err(self.unexpected("an attribute or '>'")),
            }
        };

        let mut element = Element::new(tag, id);
        if self_closed {
            return Ok(element);
        }
        if is_void_tag(&element.tag) {
            self.skip_stray_close(&element.tag);
            return Ok(element);
        }

        let mut text_chunks: Vec<String> = Vec::new();
        loop {
            match self.peek() {
                Some((Token::Text(text), _)) => {
                    let chunk = normalize_whitespace(&entities::decode(text));
                    if !chunk.is_empty() {
                        text_chunks.push(chunk);
                    }
                    self.advance();
                }
                Some((Token::OpenTag, _)) => {
                    let child = self.parse_element()?;
                    element.children.push(child);
                }
                Some((Token::CloseTagOpen, _)) => {
                    self.advance();
                    let span = self.peek_span();
                    let name = self.expect_name(&format!("</{}>", element.tag))?;
                    if !name.eq_ignore_ascii_case(&element.tag) {
                        return Err(ParseError::unexpected_token(
                            span,
                            format!("</{}>", element.tag),
                            format!("</{}>", name),
                        ));
                    }
                    self.expect(Token::TagEnd, "'>'")?;
                    break;
                }
                None => return Err(ParseError::unexpected_eof(format!("</{}>", element.tag))),
                Some(_) => return Err(self.unexpected("text, an element or a closing tag")),
            }
        }

        if !text_chunks.is_empty() {
            element.text = Some(text_chunks.join(" "));
        }
        Ok(element)
    }

    /// `name`, `name=value` or `name="value"`
    fn parse_attribute(&mut self) -> ParseResult<(&'src str, String, TokenSpan)> {
        let name = self.expect_name("an attribute name")?;
        if !matches!(self.peek(), Some((Token::Equals, _))) {
            return Ok((name, String::new(), self.peek_span()));
        }
        self.advance();

        let span = self.peek_span();
        match self.peek() {
            Some((Token::Value(value), _)) | Some((Token::Name(value), _)) => {
                let value = entities::decode(value).into_owned();
                self.advance();
                Ok((name, value, span))
            }
            _ => Err(self.unexpected("an attribute value")),
        }
    }

    /// Accept `<br></br>` by consuming a close tag right after a void element
    fn skip_stray_close(&mut self, tag: &str) {
        let matches = matches!(
            (
                self.tokens.get(self.pos).map(|(t, _)| t),
                self.tokens.get(self.pos + 1).map(|(t, _)| t),
                self.tokens.get(self.pos + 2).map(|(t, _)| t),
            ),
            (Some(Token::CloseTagOpen), Some(Token::Name(name)), Some(Token::TagEnd))
                if name.eq_ignore_ascii_case(tag)
        );
        if matches {
            self.pos += 3;
        }
    }

    fn declare_id(&mut self, id: String, span: TokenSpan) -> ParseResult<String> {
        if id.is_empty() {
            return Ok(id);
        }
        if self.explicit_ids.contains_key(&id) {
            return Err(ParseError::DuplicateId { span, id });
        }
        self.explicit_ids.insert(id.clone(), span);
        Ok(id)
    }

    /// Skeleton elements default to their tag name, everything else gets a
    /// generated `<tag>-<n>` id.
    fn assign_missing_ids(&self, root: &mut Element) {
        let mut generator = IDGenerator::with_reserved(self.explicit_ids.keys().cloned());
        assign_ids(root, &mut generator);
    }

    // Token stream helpers

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&(Token<'src>, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn peek_span(&self) -> TokenSpan {
        self.peek()
            .map(|(_, span)| span.clone().into())
            .unwrap_or(TokenSpan::new(self.source_len, self.source_len))
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expect(&mut self, token: Token<'src>, expected: &str) -> ParseResult<()> {
        match self.peek() {
            Some((found, _)) if *found == token => {
                self.advance();
                Ok(())
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn expect_name(&mut self, expected: &str) -> ParseResult<&'src str> {
        match self.peek() {
            Some((Token::Name(name), _)) => {
                let name = *name;
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some((found, span)) => ParseError::unexpected_token(span.clone(), expected, found.describe()),
            None => ParseError::unexpected_eof(expected),
        }
    }
}

fn assign_ids(element: &mut Element, generator: &mut IDGenerator) {
    if element.id.is_empty() {
        element.id = if is_skeleton_tag(&element.tag) && generator.reserve(&element.tag) {
            element.tag.clone()
        } else {
            generator.new_id(&element.tag)
        };
    }
    for child in &mut element.children {
        assign_ids(child, generator);
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `html` must contain `head` (holding a `title`) and `body`.
fn validate_skeleton(root: &Element) -> ParseResult<()> {
    if root.tag != "html" {
        return Err(ParseError::invalid_structure("document must have an <html> root"));
    }
    let head = root
        .child("head")
        .ok_or_else(|| ParseError::invalid_structure("<html> must contain <head>"))?;
    if root.child("body").is_none() {
        return Err(ParseError::invalid_structure("<html> must contain <body>"));
    }
    if head.child("title").is_none() {
        return Err(ParseError::invalid_structure("<head> must contain <title>"));
    }
    Ok(())
}

/// Parse markup source into its `html` element tree
pub fn parse(source: &str) -> ParseResult<Element> {
    Parser::new(source)?.parse_document()
}
