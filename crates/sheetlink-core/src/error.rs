use thiserror::Error;

/// Errors raised while parsing A1 references and column letters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum A1Error {
    /// The reference or range string does not match any recognized shape
    #[error("invalid A1 reference: {0:?}")]
    InvalidReference(String),
    /// Column letters were empty, non-alphabetic, or too long to index
    #[error("invalid column letters: {0:?}")]
    InvalidColumnLetters(String),
}
