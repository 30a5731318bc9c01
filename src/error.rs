//! Centralized error type for the rattle umbrella crate.
//!
//! Wraps the core taxonomy so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] rattle_core::Error),

    #[error("Engine has been shut down")]
    ShutDown,
}

impl Error {
    /// The core error, if this is one.
    pub fn core(&self) -> Option<&rattle_core::Error> {
        match self {
            Self::Core(e) => Some(e),
            Self::ShutDown => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
