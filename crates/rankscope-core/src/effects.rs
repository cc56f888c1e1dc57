//! Effect seams: simulated latency, randomness, and the calendar clock.
//!
//! Stores take these as constructor arguments so tests can run with zero
//! delay, scripted random values, and a pinned date.

use std::{
  future::Future,
  sync::atomic::{AtomicUsize, Ordering},
  time::Duration,
};

use chrono::{NaiveDate, Utc};
use strum::{EnumIter, IntoStaticStr};

// ─── Operations ──────────────────────────────────────────────────────────────

/// Every asynchronous store operation, keyed for latency lookup and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
  KeywordList,
  KeywordCreate,
  KeywordDelete,
  CompetitorList,
  CompetitorGet,
  CompetitorCreate,
  CompetitorUpdate,
  CompetitorDelete,
  DomainSet,
  DomainRemove,
  DomainMetrics,
}

impl Operation {
  /// The simulated round-trip time each operation is contracted to take.
  pub fn default_delay(self) -> Duration {
    let ms = match self {
      Self::KeywordList => 400,
      Self::KeywordCreate => 500,
      Self::KeywordDelete => 300,
      Self::CompetitorList => 500,
      Self::CompetitorGet => 300,
      Self::CompetitorCreate => 800,
      Self::CompetitorUpdate => 600,
      Self::CompetitorDelete => 400,
      Self::DomainSet | Self::DomainRemove => 100,
      Self::DomainMetrics => 300,
    };
    Duration::from_millis(ms)
  }

  pub fn name(self) -> &'static str { self.into() }
}

// ─── Latency ─────────────────────────────────────────────────────────────────

/// Delays an operation before its effect is applied.
///
/// Every store operation awaits [`Latency::pause`] first and only then reads
/// or mutates state, so concurrent operations take effect in the order their
/// delays elapse.
pub trait Latency: Send + Sync {
  fn pause(&self, op: Operation) -> impl Future<Output = ()> + Send + '_;
}

/// Completes every pause immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

impl Latency for NoLatency {
  async fn pause(&self, _op: Operation) {}
}

// ─── Randomness ──────────────────────────────────────────────────────────────

/// Source of the demo values stores synthesise for new records.
pub trait RandomSource: Send + Sync {
  /// A uniformly chosen integer in `low..=high`.
  fn int_in_range(&self, low: u32, high: u32) -> u32;
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each value is clamped into the requested range, so a script of `[1, 500]`
/// yields exactly `1` and `500` for the keyword position and volume draws.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
  values: Vec<u32>,
  cursor: AtomicUsize,
}

impl ScriptedRandom {
  pub fn new(values: impl Into<Vec<u32>>) -> Self {
    Self { values: values.into(), cursor: AtomicUsize::new(0) }
  }
}

impl RandomSource for ScriptedRandom {
  fn int_in_range(&self, low: u32, high: u32) -> u32 {
    if self.values.is_empty() {
      return low;
    }
    let i = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
    self.values[i].clamp(low, high)
  }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Supplies the calendar date stamped on new records.
pub trait Clock: Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// The current UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Utc::now().date_naive() }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}
