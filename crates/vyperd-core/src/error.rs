//! Error types for vyperd-core.

use thiserror::Error;

/// Result type for vyperd-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A compile failure classified by the toolchain, with source position.
///
/// The three kinds mirror the Vyper frontend's exception taxonomy: version
/// pragma mismatches, language-level errors, and malformed source rejected
/// before analysis. Version failures never report a column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileFailure {
    /// Source requires an incompatible compiler version.
    #[error("{message}")]
    Version { message: String, line: usize },

    /// Language-level error reported by the toolchain.
    #[error("{message}")]
    Semantic {
        message: String,
        line: usize,
        column: usize,
    },

    /// Malformed source rejected before semantic analysis.
    #[error("{message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
}

/// Errors that can occur in vyperd-core.
#[derive(Debug, Error)]
pub enum Error {
    /// The toolchain rejected the submitted source.
    #[error(transparent)]
    Failure(#[from] CompileFailure),

    /// The vyper executable is missing or unusable.
    #[error("toolchain error: {0}")]
    Toolchain(String),

    /// The toolchain produced output the service could not interpret.
    #[error("unexpected compiler output for {artifact}: {message}")]
    Output {
        artifact: &'static str,
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
