//! Error types for the scratch engine

use thiserror::Error;

/// Engine error type
///
/// Every variant is fatal for the round that raised it: evaluation either
/// yields a complete [`RoundResult`](crate::RoundResult) or one of these.
#[derive(Error, Debug)]
pub enum ScratchError {
    /// Malformed or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A grid cell names a symbol missing from the symbol table
    #[error("Invalid symbol '{symbol}' at {row}:{column}")]
    InvalidSymbol {
        symbol: String,
        row: usize,
        column: usize,
    },

    /// Bad bet amount or supplied grid
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ScratchError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias
pub type ScratchResult<T> = Result<T, ScratchError>;
