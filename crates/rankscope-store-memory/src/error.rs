//! Error type for `rankscope-store-memory`.
//!
//! Store operations reject with [`rankscope_core::Error`]; this type covers
//! loading the seed data the stores start from.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rankscope_core::Error),

  #[error("failed to read seed file {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// Two seed records of the same kind share an id.
  #[error("duplicate seed id: {0}")]
  DuplicateSeedId(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
