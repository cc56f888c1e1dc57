//! [`MemoryKeywordStore`]: the in-memory implementation of [`KeywordStore`].

use std::sync::{Arc, RwLock};

use rankscope_core::{
  Result,
  effects::{Clock, Latency, Operation, RandomSource, SystemClock},
  keyword::{
    DeleteOutcome, Keyword, NewKeyword, POSITION_RANGE, SEARCH_VOLUME_RANGE,
  },
  store::KeywordStore,
};

use crate::{SimulatedLatency, next_id, random::RngSource, read, write};

/// Tracked keywords held in insertion order.
pub struct MemoryKeywordStore<L = SimulatedLatency> {
  keywords: RwLock<Vec<Keyword>>,
  latency:  L,
  random:   Arc<dyn RandomSource>,
  clock:    Arc<dyn Clock>,
}

impl<L: Latency> MemoryKeywordStore<L> {
  /// Start from `seed`, drawing random figures from the OS generator and
  /// stamping records with the system date.
  pub fn new(seed: Vec<Keyword>, latency: L) -> Self {
    Self {
      keywords: RwLock::new(seed),
      latency,
      random: Arc::new(RngSource::os()),
      clock: Arc::new(SystemClock),
    }
  }

  pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
    self.random = Arc::new(random);
    self
  }

  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.clock = Arc::new(clock);
    self
  }
}

impl<L: Latency> KeywordStore for MemoryKeywordStore<L> {
  async fn list(&self) -> Vec<Keyword> {
    self.latency.pause(Operation::KeywordList).await;
    let keywords = read(&self.keywords).clone();
    tracing::debug!(count = keywords.len(), "keywords listed");
    keywords
  }

  async fn create(&self, input: NewKeyword) -> Result<Keyword> {
    self.latency.pause(Operation::KeywordCreate).await;

    let input = input.validate().inspect_err(|e| {
      tracing::warn!(error = %e, "keyword create rejected");
    })?;

    let (low, high) = POSITION_RANGE;
    let current_position = self.random.int_in_range(low, high);
    let (low, high) = SEARCH_VOLUME_RANGE;
    let search_volume = self.random.int_in_range(low, high);

    let mut keywords = write(&self.keywords);
    let id = next_id(keywords.iter().map(|k| k.id)).inspect_err(|e| {
      tracing::warn!(error = %e, "keyword create rejected");
    })?;
    let keyword = Keyword {
      id,
      phrase: input.phrase,
      url: input.url,
      current_position,
      previous_position: None,
      search_volume,
      last_updated: self.clock.today(),
    };
    keywords.push(keyword.clone());

    tracing::debug!(id = keyword.id, phrase = %keyword.phrase, "keyword created");
    Ok(keyword)
  }

  async fn delete(&self, id: u32) -> DeleteOutcome {
    self.latency.pause(Operation::KeywordDelete).await;

    let mut keywords = write(&self.keywords);
    let before = keywords.len();
    keywords.retain(|k| k.id != id);

    tracing::debug!(id, removed = before != keywords.len(), "keyword delete");
    DeleteOutcome { success: true }
  }
}
