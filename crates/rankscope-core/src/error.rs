//! Error types for `rankscope-core`.

use thiserror::Error;

/// The record kind an id lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
  Keyword,
  Competitor,
}

/// Every failure a store operation can reject with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A required input was missing or malformed.
  #[error("validation failed: {0}")]
  Validation(String),

  /// The normalized competitor domain is already tracked.
  #[error("domain already tracked: {0}")]
  Duplicate(String),

  #[error("{entity} not found: {id}")]
  NotFound { entity: Entity, id: u32 },
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn keyword_not_found(id: u32) -> Self {
    Self::NotFound { entity: Entity::Keyword, id }
  }

  pub fn competitor_not_found(id: u32) -> Self {
    Self::NotFound { entity: Entity::Competitor, id }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
