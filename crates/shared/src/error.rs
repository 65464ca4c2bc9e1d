use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Parse,
}

/// Rejection of a single entry at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandLogError {
    #[error("entry {index}: id must not be empty")]
    EmptyId { index: usize },
    #[error("entry {index}: duplicate id '{id}' (first seen at entry {first_index})")]
    DuplicateId {
        index: usize,
        first_index: usize,
        id: String,
    },
    #[error("entry {index}: unrecognized kind '{value}'")]
    UnrecognizedKind { index: usize, value: String },
    #[error("entry {index}: unrecognized outcome '{value}'")]
    UnrecognizedOutcome { index: usize, value: String },
}

impl CommandLogError {
    pub fn index(&self) -> usize {
        match self {
            Self::EmptyId { index }
            | Self::DuplicateId { index, .. }
            | Self::UnrecognizedKind { index, .. }
            | Self::UnrecognizedOutcome { index, .. } => *index,
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed command feed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid command entry: {source}")]
    Entry {
        #[from]
        source: CommandLogError,
    },
}

impl FeedError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(_) => ErrorCode::Parse,
            Self::Entry { .. } => ErrorCode::Validation,
        }
    }
}
