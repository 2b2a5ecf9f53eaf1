//! Error types for folio-chrome.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid counter target: {0:?}")]
    InvalidCounterTarget(String),

    #[error("Typewriter needs at least one non-empty phrase")]
    NoPhrases,
}
