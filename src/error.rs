use crate::authority::AuthorityError;
use thiserror::Error;

/// Failures surfaced by store and panel operations. Validation errors are
/// detected locally and never reach the authority; remote errors carry the
/// authority's message verbatim so the notification layer can show it
/// unmodified.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Remote(#[from] AuthorityError),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True when no request was issued for this failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
