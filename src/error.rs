// src/error.rs
use std::io;
use thiserror::Error;

use crate::types::VariableType;

#[derive(Error, Debug)]
pub enum NexError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid NEX signature: expected NEX1, found {found}")]
    InvalidMagic { found: String },

    #[error("Truncated {what} at offset {offset}")]
    Truncated { what: &'static str, offset: u64 },

    #[error("Invalid variable type: {0}")]
    InvalidVariableType(i32),

    #[error("Invalid NEX file: {0}")]
    InvalidFormat(String),

    #[error("No {kind} variable named '{name}'")]
    NotFound { kind: String, name: String },

    #[error("Index {index} out of range for {len} variables")]
    IndexOutOfRange { index: usize, len: usize },
}

impl NexError {
    /// True for every error that means the bytes are not a well-formed NEX file.
    pub fn is_invalid_format(&self) -> bool {
        matches!(
            self,
            NexError::InvalidMagic { .. }
                | NexError::Truncated { .. }
                | NexError::InvalidVariableType(_)
                | NexError::InvalidFormat(_)
        )
    }

    pub(crate) fn not_found(kind: Option<VariableType>, name: impl Into<String>) -> Self {
        NexError::NotFound {
            kind: kind.map_or_else(|| "any".to_string(), |k| k.to_string()),
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NexError>;
