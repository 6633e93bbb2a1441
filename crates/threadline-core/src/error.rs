//! Block document error types

use thiserror::Error;

/// Errors raised while reading a block document.
///
/// Individual malformed blocks are never errors; they become
/// [`Block::Unknown`](crate::Block::Unknown). Only a document whose outer
/// shape is wrong fails.
#[derive(Debug, Error)]
pub enum BlockError {
    /// Input is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value is neither a block array nor an object with `blocks`
    #[error("Invalid block document: {0}")]
    InvalidDocument(String),
}

/// Specialized Result type for block operations
pub type BlockResult<T> = Result<T, BlockError>;

impl BlockError {
    /// Create an invalid document error
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }
}
