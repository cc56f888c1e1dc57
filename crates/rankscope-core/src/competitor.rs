//! Competitor domains and their derived competition level.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, domain::normalize_domain};

/// Inclusive range the store draws a new competitor's keyword overlap from.
pub const COMMON_KEYWORDS_RANGE: (u32, u32) = (10, 89);
/// Inclusive range the store draws a new competitor's visibility from.
pub const VISIBILITY_RANGE: (u32, u32) = (60, 99);

/// A rival domain ranking for the same search terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
  pub id:               u32,
  /// Normalized and unique (case-insensitive) within a store.
  pub domain:           String,
  /// Keyword overlap with the tracked domain.
  pub common_keywords:  u32,
  /// Always within `0..=100`.
  pub visibility_score: u8,
}

impl Competitor {
  pub fn competition_level(&self) -> CompetitionLevel {
    CompetitionLevel::for_overlap(self.common_keywords)
  }
}

/// How strongly a competitor contends for the tracked domain's keywords.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CompetitionLevel {
  Low,
  Medium,
  High,
}

impl CompetitionLevel {
  /// More than 50 shared keywords is high, more than 20 is medium.
  pub fn for_overlap(common_keywords: u32) -> Self {
    if common_keywords > 50 {
      Self::High
    } else if common_keywords > 20 {
      Self::Medium
    } else {
      Self::Low
    }
  }
}

/// Fields to overwrite on an existing competitor. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorPatch {
  pub domain:           Option<String>,
  pub common_keywords:  Option<u32>,
  pub visibility_score: Option<u8>,
}

impl CompetitorPatch {
  /// Normalize a patched domain and range-check a patched score.
  pub fn validate(self) -> Result<Self> {
    if let Some(score) = self.visibility_score
      && score > 100
    {
      return Err(Error::validation(format!(
        "visibility score {score} is outside 0..=100"
      )));
    }
    let domain = self.domain.as_deref().map(normalize_domain).transpose()?;
    Ok(Self { domain, ..self })
  }

  /// Shallow-merge the set fields into `target`.
  pub fn apply_to(self, target: &mut Competitor) {
    if let Some(domain) = self.domain {
      target.domain = domain;
    }
    if let Some(n) = self.common_keywords {
      target.common_keywords = n;
    }
    if let Some(score) = self.visibility_score {
      target.visibility_score = score;
    }
  }

  pub fn is_empty(&self) -> bool {
    self.domain.is_none()
      && self.common_keywords.is_none()
      && self.visibility_score.is_none()
  }
}

/// Competitors ordered by descending visibility; ties keep input order.
pub fn rank_by_visibility(mut competitors: Vec<Competitor>) -> Vec<Competitor> {
  competitors.sort_by(|a, b| b.visibility_score.cmp(&a.visibility_score));
  competitors
}

/// Competitors ordered by descending keyword overlap; ties keep input order.
pub fn rank_by_overlap(mut competitors: Vec<Competitor>) -> Vec<Competitor> {
  competitors.sort_by(|a, b| b.common_keywords.cmp(&a.common_keywords));
  competitors
}
