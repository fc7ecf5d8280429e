use std::fmt;

use crate::foundation::error::LoaderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExprError {
    pub(crate) offset: usize,
    pub(crate) message: String,
}

impl ExprError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    /// Runtime errors carry no source position.
    pub(crate) fn eval(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expr error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for ExprError {}

impl From<ExprError> for LoaderError {
    fn from(e: ExprError) -> Self {
        LoaderError::expression(e.to_string())
    }
}
