//! [`MemoryCompetitorStore`]: the in-memory implementation of
//! [`CompetitorStore`].

use std::sync::{Arc, RwLock};

use rankscope_core::{
  Error, Result,
  competitor::{
    COMMON_KEYWORDS_RANGE, Competitor, CompetitorPatch, VISIBILITY_RANGE,
  },
  domain::normalize_domain,
  effects::{Latency, Operation, RandomSource},
  store::CompetitorStore,
};

use crate::{SimulatedLatency, next_id, random::RngSource, read, write};

/// Competitor domains held in insertion order, unique by normalized domain.
pub struct MemoryCompetitorStore<L = SimulatedLatency> {
  competitors: RwLock<Vec<Competitor>>,
  latency:     L,
  random:      Arc<dyn RandomSource>,
}

impl<L: Latency> MemoryCompetitorStore<L> {
  /// Start from `seed`, which is trusted to be normalized and unique; use
  /// [`crate::seed`] to load untrusted collections.
  pub fn new(seed: Vec<Competitor>, latency: L) -> Self {
    Self {
      competitors: RwLock::new(seed),
      latency,
      random: Arc::new(RngSource::os()),
    }
  }

  pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
    self.random = Arc::new(random);
    self
  }
}

impl<L> MemoryCompetitorStore<L> {
  fn insert(&self, domain: String) -> Result<Competitor> {
    let mut competitors = write(&self.competitors);
    if is_taken(&competitors, &domain, None) {
      return Err(Error::Duplicate(domain));
    }

    let (low, high) = COMMON_KEYWORDS_RANGE;
    let common_keywords = self.random.int_in_range(low, high);
    let (low, high) = VISIBILITY_RANGE;
    // The range tops out at 99, well inside `u8`.
    let visibility_score =
      u8::try_from(self.random.int_in_range(low, high)).unwrap_or(100);

    let competitor = Competitor {
      id: next_id(competitors.iter().map(|c| c.id))?,
      domain,
      common_keywords,
      visibility_score,
    };
    competitors.push(competitor.clone());
    Ok(competitor)
  }

  fn merge(&self, id: u32, patch: CompetitorPatch) -> Result<Competitor> {
    let mut competitors = write(&self.competitors);
    let index = position(&competitors, id)?;
    let patch = patch.validate()?;
    if let Some(domain) = patch.domain.as_deref()
      && is_taken(&competitors, domain, Some(id))
    {
      return Err(Error::Duplicate(domain.to_owned()));
    }
    patch.apply_to(&mut competitors[index]);
    Ok(competitors[index].clone())
  }
}

fn position(competitors: &[Competitor], id: u32) -> Result<usize> {
  competitors
    .iter()
    .position(|c| c.id == id)
    .ok_or(Error::competitor_not_found(id))
}

/// Whether any competitor other than `except` already tracks `domain`.
fn is_taken(competitors: &[Competitor], domain: &str, except: Option<u32>) -> bool {
  competitors
    .iter()
    .any(|c| Some(c.id) != except && c.domain.eq_ignore_ascii_case(domain))
}

fn rejected<T>(op: Operation, result: Result<T>) -> Result<T> {
  if let Err(e) = &result {
    tracing::warn!(op = op.name(), error = %e, "competitor operation rejected");
  }
  result
}

impl<L: Latency> CompetitorStore for MemoryCompetitorStore<L> {
  async fn list(&self) -> Vec<Competitor> {
    self.latency.pause(Operation::CompetitorList).await;
    let competitors = read(&self.competitors).clone();
    tracing::debug!(count = competitors.len(), "competitors listed");
    competitors
  }

  async fn get(&self, id: u32) -> Result<Competitor> {
    self.latency.pause(Operation::CompetitorGet).await;

    let result = {
      let competitors = read(&self.competitors);
      position(&competitors, id).map(|i| competitors[i].clone())
    };
    if result.is_ok() {
      tracing::debug!(id, "competitor fetched");
    }
    rejected(Operation::CompetitorGet, result)
  }

  async fn create(&self, domain: String) -> Result<Competitor> {
    self.latency.pause(Operation::CompetitorCreate).await;

    let result = normalize_domain(&domain).and_then(|domain| self.insert(domain));
    if let Ok(c) = &result {
      tracing::debug!(id = c.id, domain = %c.domain, "competitor created");
    }
    rejected(Operation::CompetitorCreate, result)
  }

  async fn update(&self, id: u32, patch: CompetitorPatch) -> Result<Competitor> {
    self.latency.pause(Operation::CompetitorUpdate).await;

    let result = self.merge(id, patch);
    if result.is_ok() {
      tracing::debug!(id, "competitor updated");
    }
    rejected(Operation::CompetitorUpdate, result)
  }

  async fn delete(&self, id: u32) -> Result<Competitor> {
    self.latency.pause(Operation::CompetitorDelete).await;

    let result = {
      let mut competitors = write(&self.competitors);
      position(&competitors, id).map(|i| competitors.remove(i))
    };

    if let Ok(c) = &result {
      tracing::debug!(id, domain = %c.domain, "competitor deleted");
    }
    rejected(Operation::CompetitorDelete, result)
  }
}
