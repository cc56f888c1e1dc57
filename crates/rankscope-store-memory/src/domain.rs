//! [`MemoryDomainProvider`]: the in-memory implementation of
//! [`DomainMetricsProvider`].

use std::sync::RwLock;

use rankscope_core::{
  Error, Result,
  effects::{Latency, Operation},
  metrics::MetricsSnapshot,
  store::DomainMetricsProvider,
};

use crate::{SimulatedLatency, read, write};

/// Holds the current-domain selection and derives metrics from a fixed
/// baseline. Nothing but the selected string is kept between calls.
pub struct MemoryDomainProvider<L = SimulatedLatency> {
  current:  RwLock<Option<String>>,
  baseline: MetricsSnapshot,
  latency:  L,
}

impl<L: Latency> MemoryDomainProvider<L> {
  /// Start with no domain selected.
  pub fn new(baseline: MetricsSnapshot, latency: L) -> Self {
    Self { current: RwLock::new(None), baseline, latency }
  }

  /// Start with `domain` already selected.
  pub fn with_current(self, domain: impl Into<String>) -> Self {
    *write(&self.current) = Some(domain.into());
    self
  }

  pub fn baseline(&self) -> &MetricsSnapshot { &self.baseline }
}

impl<L: Latency> DomainMetricsProvider for MemoryDomainProvider<L> {
  async fn set_current_domain(&self, domain: String) -> Result<String> {
    self.latency.pause(Operation::DomainSet).await;

    if domain.trim().is_empty() {
      let e = Error::validation("domain is required");
      tracing::warn!(error = %e, "domain selection rejected");
      return Err(e);
    }
    *write(&self.current) = Some(domain.clone());
    tracing::debug!(domain = %domain, "current domain set");
    Ok(domain)
  }

  fn current_domain(&self) -> Option<String> { read(&self.current).clone() }

  async fn remove_domain(&self) {
    self.latency.pause(Operation::DomainRemove).await;
    let previous = write(&self.current).take();
    tracing::debug!(previous = ?previous, "current domain cleared");
  }

  async fn metrics(&self) -> MetricsSnapshot {
    self.latency.pause(Operation::DomainMetrics).await;
    let current = read(&self.current).clone();
    let metrics = MetricsSnapshot::derive(&self.baseline, current.as_deref());
    tracing::debug!(
      domain = ?metrics.domain,
      visibility = metrics.visibility_score,
      "metrics derived"
    );
    metrics
  }
}
