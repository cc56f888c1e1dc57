//! The three store traits the dashboard composes.
//!
//! Each store is an independent resource. Backends (e.g.
//! `rankscope-store-memory`) implement them; front-ends depend only on this
//! abstraction. Every async method resolves after the backend's simulated
//! round-trip and either returns a value or rejects with [`Error`](crate::Error);
//! nothing is retried or cancelled.
//!
//! All methods return `Send` futures so the traits can be driven from a
//! multi-threaded tokio runtime.

use std::future::Future;

use crate::{
  Result,
  competitor::{Competitor, CompetitorPatch},
  keyword::{DeleteOutcome, Keyword, NewKeyword},
  metrics::MetricsSnapshot,
};

// ─── Keywords ────────────────────────────────────────────────────────────────

pub trait KeywordStore: Send + Sync {
  /// Snapshot of every keyword in insertion order. Never fails.
  fn list(&self) -> impl Future<Output = Vec<Keyword>> + Send + '_;

  /// Validate `input`, then store a keyword with a fresh id, a random
  /// position and volume, no previous position, and today's date.
  fn create(
    &self,
    input: NewKeyword,
  ) -> impl Future<Output = Result<Keyword>> + Send + '_;

  /// Remove the keyword with `id`. An absent id is not an error.
  fn delete(&self, id: u32) -> impl Future<Output = DeleteOutcome> + Send + '_;
}

// ─── Competitors ─────────────────────────────────────────────────────────────

pub trait CompetitorStore: Send + Sync {
  /// Snapshot of every competitor in insertion order.
  fn list(&self) -> impl Future<Output = Vec<Competitor>> + Send + '_;

  /// Rejects with `NotFound` when no competitor has `id`.
  fn get(&self, id: u32) -> impl Future<Output = Result<Competitor>> + Send + '_;

  /// Normalize `domain`, reject duplicates, and store it with random
  /// overlap and visibility figures.
  fn create(
    &self,
    domain: String,
  ) -> impl Future<Output = Result<Competitor>> + Send + '_;

  /// Merge `patch` into the competitor with `id` and return the result.
  fn update(
    &self,
    id: u32,
    patch: CompetitorPatch,
  ) -> impl Future<Output = Result<Competitor>> + Send + '_;

  /// Remove and return the competitor with `id`; `NotFound` if absent.
  fn delete(&self, id: u32) -> impl Future<Output = Result<Competitor>> + Send + '_;
}

// ─── Domain metrics ──────────────────────────────────────────────────────────

pub trait DomainMetricsProvider: Send + Sync {
  /// Select `domain` as the current domain (last writer wins) and echo it.
  fn set_current_domain(
    &self,
    domain: String,
  ) -> impl Future<Output = Result<String>> + Send + '_;

  /// The current selection, read without delay.
  fn current_domain(&self) -> Option<String>;

  /// Clear the current selection.
  fn remove_domain(&self) -> impl Future<Output = ()> + Send + '_;

  /// Recompute the snapshot for the current selection.
  fn metrics(&self) -> impl Future<Output = MetricsSnapshot> + Send + '_;
}
