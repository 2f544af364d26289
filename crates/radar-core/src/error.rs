//! Error types for `radar-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown archetype label: {0:?}")]
  UnknownArchetype(String),

  #[error("unknown gender label: {0:?}")]
  UnknownGender(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
