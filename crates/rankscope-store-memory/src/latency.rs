//! Timer-backed simulated latency.

use std::{collections::HashMap, time::Duration};

use rankscope_core::effects::{Latency, Operation};
use serde::Deserialize;
use strum::IntoEnumIterator;

/// Per-operation round-trip times in milliseconds.
///
/// Missing fields fall back to the contracted defaults; `enabled = false`
/// makes every operation complete immediately.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
  pub enabled:              bool,
  pub keyword_list_ms:      u64,
  pub keyword_create_ms:    u64,
  pub keyword_delete_ms:    u64,
  pub competitor_list_ms:   u64,
  pub competitor_get_ms:    u64,
  pub competitor_create_ms: u64,
  pub competitor_update_ms: u64,
  pub competitor_delete_ms: u64,
  pub domain_set_ms:        u64,
  pub domain_remove_ms:     u64,
  pub domain_metrics_ms:    u64,
}

fn default_ms(op: Operation) -> u64 {
  u64::try_from(op.default_delay().as_millis()).unwrap_or(u64::MAX)
}

impl Default for LatencyConfig {
  fn default() -> Self {
    Self {
      enabled:              true,
      keyword_list_ms:      default_ms(Operation::KeywordList),
      keyword_create_ms:    default_ms(Operation::KeywordCreate),
      keyword_delete_ms:    default_ms(Operation::KeywordDelete),
      competitor_list_ms:   default_ms(Operation::CompetitorList),
      competitor_get_ms:    default_ms(Operation::CompetitorGet),
      competitor_create_ms: default_ms(Operation::CompetitorCreate),
      competitor_update_ms: default_ms(Operation::CompetitorUpdate),
      competitor_delete_ms: default_ms(Operation::CompetitorDelete),
      domain_set_ms:        default_ms(Operation::DomainSet),
      domain_remove_ms:     default_ms(Operation::DomainRemove),
      domain_metrics_ms:    default_ms(Operation::DomainMetrics),
    }
  }
}

impl LatencyConfig {
  fn millis(&self, op: Operation) -> u64 {
    match op {
      Operation::KeywordList => self.keyword_list_ms,
      Operation::KeywordCreate => self.keyword_create_ms,
      Operation::KeywordDelete => self.keyword_delete_ms,
      Operation::CompetitorList => self.competitor_list_ms,
      Operation::CompetitorGet => self.competitor_get_ms,
      Operation::CompetitorCreate => self.competitor_create_ms,
      Operation::CompetitorUpdate => self.competitor_update_ms,
      Operation::CompetitorDelete => self.competitor_delete_ms,
      Operation::DomainSet => self.domain_set_ms,
      Operation::DomainRemove => self.domain_remove_ms,
      Operation::DomainMetrics => self.domain_metrics_ms,
    }
  }
}

/// Sleeps on the tokio timer for each operation's configured duration.
#[derive(Debug, Clone)]
pub struct SimulatedLatency {
  delays: HashMap<Operation, Duration>,
}

impl SimulatedLatency {
  pub fn from_config(config: &LatencyConfig) -> Self {
    let delays = Operation::iter()
      .map(|op| {
        let ms = if config.enabled { config.millis(op) } else { 0 };
        (op, Duration::from_millis(ms))
      })
      .collect();
    Self { delays }
  }

  /// Every operation completes without waiting.
  pub fn disabled() -> Self {
    Self::from_config(&LatencyConfig { enabled: false, ..Default::default() })
  }

  pub fn delay(&self, op: Operation) -> Duration {
    self.delays.get(&op).copied().unwrap_or_default()
  }
}

impl Default for SimulatedLatency {
  fn default() -> Self { Self::from_config(&LatencyConfig::default()) }
}

impl Latency for SimulatedLatency {
  async fn pause(&self, op: Operation) {
    let delay = self.delay(op);
    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }
  }
}
