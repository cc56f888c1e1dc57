//! Domain metrics snapshots, derived on every fetch, never stored.
//!
//! A snapshot starts from a fixed baseline. When a domain is selected, three
//! headline figures are shifted by that domain's [`variation`], so the same
//! domain always yields the same numbers.

use serde::{Deserialize, Serialize};

use crate::domain::variation;

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// The dashboard's headline figures with their previous-period counterparts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
  pub visibility_score:             u32,
  pub previous_visibility_score:    u32,
  pub total_keywords:               u32,
  pub previous_total_keywords:      u32,
  pub top_ten_keywords:             u32,
  pub previous_top_ten_keywords:    u32,
  pub average_position:             f64,
  pub previous_average_position:    f64,
  pub total_search_volume:          u64,
  pub previous_total_search_volume: u64,
  /// The selected domain; absent on the unmodified baseline.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub domain:                       Option<String>,
}

impl Default for MetricsSnapshot {
  fn default() -> Self {
    Self {
      visibility_score:             72,
      previous_visibility_score:    68,
      total_keywords:               247,
      previous_total_keywords:      231,
      top_ten_keywords:             38,
      previous_top_ten_keywords:    34,
      average_position:             18.4,
      previous_average_position:    21.2,
      total_search_volume:          125_400,
      previous_total_search_volume: 118_200,
      domain:                       None,
    }
  }
}

fn to_u32(value: i64) -> u32 { u32::try_from(value).unwrap_or(u32::MAX) }

impl MetricsSnapshot {
  /// Derive the snapshot for `domain` from `baseline`.
  ///
  /// With no domain the baseline is returned untouched. Otherwise:
  /// visibility is clamped to `10..=100`, total keywords floored at 50, and
  /// top-ten keywords floored at 5; other fields pass through.
  pub fn derive(baseline: &Self, domain: Option<&str>) -> Self {
    let Some(domain) = domain else {
      return Self { domain: None, ..baseline.clone() };
    };
    let v = variation(domain);

    Self {
      visibility_score: to_u32(
        (i64::from(baseline.visibility_score) + v).clamp(10, 100),
      ),
      total_keywords: to_u32(
        (i64::from(baseline.total_keywords) + 2 * v).max(50),
      ),
      top_ten_keywords: to_u32(
        (i64::from(baseline.top_ten_keywords) + v.div_euclid(3)).max(5),
      ),
      domain: Some(domain.to_owned()),
      ..baseline.clone()
    }
  }

  /// The four trend badges shown beside the headline figures.
  pub fn trends(&self) -> DashboardTrends {
    DashboardTrends {
      visibility:       Trend::between(
        f64::from(self.visibility_score),
        f64::from(self.previous_visibility_score),
      ),
      total_keywords:   Trend::between(
        f64::from(self.total_keywords),
        f64::from(self.previous_total_keywords),
      ),
      // Lower is better, so the comparison is inverted.
      average_position: Trend::between(
        self.previous_average_position,
        self.average_position,
      ),
      top_ten:          Trend::between(
        f64::from(self.top_ten_keywords),
        f64::from(self.previous_top_ten_keywords),
      ),
    }
  }
}

// ─── Trends ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeType {
  Positive,
  Negative,
  Neutral,
}

/// Direction and rounded percentage of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
  pub change_type:    ChangeType,
  pub change_percent: i64,
}

impl Trend {
  /// Neutral with 0% when there is no previous value to compare against.
  pub fn between(current: f64, previous: f64) -> Self {
    if previous == 0.0 {
      return Self { change_type: ChangeType::Neutral, change_percent: 0 };
    }
    let change_type = if current > previous {
      ChangeType::Positive
    } else if current < previous {
      ChangeType::Negative
    } else {
      ChangeType::Neutral
    };
    // Half-way cases round up, not away from zero.
    let percent = ((current - previous) / previous * 100.0 + 0.5).floor();
    Self { change_type, change_percent: percent as i64 }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTrends {
  pub visibility:       Trend,
  pub total_keywords:   Trend,
  pub average_position: Trend,
  pub top_ten:          Trend,
}
