//! Error type for `radar-engine`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An error surfaced by the underlying table store.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("http client error: {0}")]
  Http(#[from] reqwest::Error),
}

impl Error {
  /// Box a backend-specific store error.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
