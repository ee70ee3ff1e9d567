//! # htmled parser
//!
//! Converts between markup text and the owned [`Element`] tree the editor
//! loads from and saves to.
//!
//! ```text
//! source ──lexer──▶ tokens ──parser──▶ Element ──serializer──▶ source
//! ```

pub mod ast;
pub mod entities;
pub mod error;
pub mod id_generator;
pub mod lexer;
pub mod parser;
pub mod serializer;


pub use ast::{is_skeleton_tag, is_valid_tag_name, is_void_tag, Element, SKELETON_TAGS};
pub use error::{ParseError, ParseResult, TokenSpan};
pub use lexer::{tokenize, Token};
pub use parser::{parse, Parser};
pub use serializer::{serialize, serialize_with_indent, Serializer};

#[cfg(feature = "pretty-errors")]
pub use error::format_error;
