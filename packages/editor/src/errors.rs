//! Error types for the editor

use crate::history::HistoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] htmled_parser::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("{0}")]
    EmptyHistory(String),

    #[error("Document is not open: {0}")]
    UnknownDocument(String),

    #[error("Document is already open: {0}")]
    DocumentAlreadyOpen(String),

    #[error("No active document")]
    NoActiveDocument,

    #[error("Session error: {0}")]
    Session(#[from] serde_json::Error),
}

impl From<HistoryError> for EditorError {
    fn from(e: HistoryError) -> Self {
        match e {
            HistoryError::EmptyHistory(_) => EditorError::EmptyHistory(e.to_string()),
            HistoryError::Mutation(inner) => EditorError::Mutation(inner),
        }
    }
}
