//! [`RandomSource`] over any `rand_core` generator.

use std::sync::{Mutex, PoisonError};

use rand_core::{OsRng, RngCore};
use rankscope_core::effects::RandomSource;

/// Draws demo values from a wrapped generator.
///
/// Values come from `next_u32` reduced modulo the span; the slight bias is
/// irrelevant for synthesised dashboard figures.
#[derive(Debug)]
pub struct RngSource<R> {
  rng: Mutex<R>,
}

impl<R: RngCore> RngSource<R> {
  pub fn new(rng: R) -> Self { Self { rng: Mutex::new(rng) } }
}

impl RngSource<OsRng> {
  /// Backed by the operating system's generator.
  pub fn os() -> Self { Self::new(OsRng) }
}

impl<R: RngCore + Send> RandomSource for RngSource<R> {
  fn int_in_range(&self, low: u32, high: u32) -> u32 {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let span = u64::from(high - low) + 1;
    let raw = self
      .rng
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .next_u32();
    // `span` is at most 2^32, so the remainder fits in a u32.
    low + (u64::from(raw) % span) as u32
  }
}
