//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration (including exclusion zones that leave no room to place debris),
//! dataset gaps, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no position outside the exclusion zone found after {attempts} attempts")]
    ExclusionExhausted { attempts: usize },

    #[error("no density known for material '{name}'")]
    UnknownMaterial { name: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns true for errors caused by the caller's configuration rather than the dataset.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfig(_) | Error::ExclusionExhausted { .. }
        )
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
