//! In-memory backend for the Rankscope stores.
//!
//! State lives in process memory only and is discarded on exit. Every
//! operation first waits out its simulated round-trip (see [`latency`]) and
//! then applies its effect under a short-lived lock, so overlapping calls
//! take effect in the order their delays elapse.

mod competitors;
mod domain;
mod keywords;

pub mod error;
pub mod latency;
pub mod random;
pub mod seed;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use competitors::MemoryCompetitorStore;
pub use domain::MemoryDomainProvider;
pub use error::{Error, Result};
pub use keywords::MemoryKeywordStore;
pub use latency::{LatencyConfig, SimulatedLatency};
pub use random::RngSource;
pub use seed::SeedData;

// Locks are never held across an await, and a panic mid-mutation leaves the
// collections structurally valid, so poisoning is ignored.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
  lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Next sequential id: one past the largest in use, or 1 when empty.
fn next_id(ids: impl Iterator<Item = u32>) -> rankscope_core::Result<u32> {
  match ids.max() {
    None => Ok(1),
    Some(max) => max.checked_add(1).ok_or_else(|| {
      rankscope_core::Error::validation(format!("no id left after {max}"))
    }),
  }
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
  lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests;
