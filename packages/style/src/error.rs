//! Error types for style normalisation

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("Malformed shorthand '{value}': expected 1 or 4 values, got {tokens}")]
    MalformedShorthand { value: String, tokens: usize },
}
