/// Convenience result type used across the loader.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Top-level error taxonomy used by loader APIs.
#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    /// Malformed or unrecognizable document / slot payload.
    #[error("parse error: {0}")]
    Parse(String),

    /// Out-of-range caller arguments (e.g. a segment with `begin > end`).
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Errors while compiling or evaluating property expressions.
    #[error("expression error: {0}")]
    Expression(String),

    /// File system errors while opening a document from disk.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoaderError {
    /// Build a [`LoaderError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`LoaderError::InvalidArguments`] value.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Build a [`LoaderError::Expression`] value.
    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
