//! Error types for the markup parser

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<std::ops::Range<usize>> for TokenSpan {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {}: expected {expected}, found {found}", .span.start)]
    UnexpectedToken {
        span: TokenSpan,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Lexer error at {}", .span.start)]
    LexerError { span: TokenSpan },

    #[error("Duplicate id '{id}' at {}", .span.start)]
    DuplicateId { span: TokenSpan, id: String },

    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),
}

impl ParseError {
    pub fn unexpected_token(
        span: impl Into<TokenSpan>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            span: span.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }

    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure(message.into())
    }

    pub fn span(&self) -> Option<TokenSpan> {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::LexerError { span }
            | ParseError::DuplicateId { span, .. } => Some(*span),
            ParseError::UnexpectedEof { .. } | ParseError::InvalidStructure(_) => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. } | ParseError::UnexpectedEof { expected } => {
                format!("expected {}", expected)
            }
            ParseError::LexerError { .. } => "unrecognized input".to_string(),
            ParseError::DuplicateId { id, .. } => format!("'{}' is already used", id),
            ParseError::InvalidStructure(message) => message.clone(),
        }
    }
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let span = error.span().unwrap_or(TokenSpan {
        start: source.len().saturating_sub(1),
        end: source.len(),
    });

    let report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, span.start..span.end))
                .with_color(Color::Red)
                .with_message(error.label()),
        )
        .finish();

    let mut output = Vec::new();
    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_of_structural_error_is_none() {
        let err = ParseError::invalid_structure("missing body");
        assert_eq!(err.span(), None);
        assert_eq!(err.to_string(), "Invalid document structure: missing body");
    }

    #[cfg(feature = "pretty-errors")]
    #[test]
    fn test_format_error_mentions_message() {
        let source = "<html><body></div></html>";
        let err = ParseError::unexpected_token(12..18, "</body>", "</div>");
        let rendered = format_error(source, "page.html", &err);
        assert!(rendered.contains("expected </body>"));
    }
}
