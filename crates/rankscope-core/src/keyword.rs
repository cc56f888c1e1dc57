//! Tracked keyword records and the list-view query over them.
//!
//! Keywords are never updated in place: a rank change arrives as new data.
//! The store assigns `id`, `current_position`, `search_volume`, and
//! `last_updated`; callers only supply the phrase and target URL.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Inclusive range the store draws a new keyword's position from.
pub const POSITION_RANGE: (u32, u32) = (1, 50);
/// Inclusive range the store draws a new keyword's monthly volume from.
pub const SEARCH_VOLUME_RANGE: (u32, u32) = (500, 10_499);

// ─── Records ─────────────────────────────────────────────────────────────────

/// A search term tracked against one page of the user's domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
  pub id:                u32,
  pub phrase:            String,
  pub url:               String,
  /// Search-rank position; 1 is the top result.
  pub current_position:  u32,
  /// `None` when no earlier measurement exists.
  #[serde(default)]
  pub previous_position: Option<u32>,
  pub search_volume:     u32,
  pub last_updated:      NaiveDate,
}

impl Keyword {
  /// How many places the keyword climbed since the previous measurement.
  /// Negative when it dropped.
  pub fn position_change(&self) -> Option<i64> {
    self
      .previous_position
      .map(|prev| i64::from(prev) - i64::from(self.current_position))
  }

  pub fn is_top_ten(&self) -> bool { self.current_position <= 10 }
}

/// Number of keywords ranking on the first results page.
pub fn count_top_ten(keywords: &[Keyword]) -> usize {
  keywords.iter().filter(|k| k.is_top_ten()).count()
}

/// Caller-supplied input for creating a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKeyword {
  pub phrase: String,
  pub url:    String,
}

impl NewKeyword {
  pub fn new(phrase: impl Into<String>, url: impl Into<String>) -> Self {
    Self { phrase: phrase.into(), url: url.into() }
  }

  /// Trim both fields, rejecting either one if nothing is left.
  pub fn validate(self) -> Result<Self> {
    let phrase = self.phrase.trim();
    if phrase.is_empty() {
      return Err(Error::validation("keyword phrase is required"));
    }
    let url = self.url.trim();
    if url.is_empty() {
      return Err(Error::validation("target url is required"));
    }
    Ok(Self { phrase: phrase.to_owned(), url: url.to_owned() })
  }
}

/// Response to a keyword delete; deletion of an absent id still succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
  pub success: bool,
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Column a keyword list can be ordered by.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
  Phrase,
  CurrentPosition,
  SearchVolume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  #[default]
  Asc,
  Desc,
}

/// Filter and ordering applied to a keyword list snapshot.
#[derive(Debug, Clone, Default)]
pub struct KeywordQuery {
  /// Case-insensitive substring matched against phrase or URL.
  pub text: Option<String>,
  /// `None` keeps store order.
  pub sort: Option<(SortKey, Direction)>,
}

impl KeywordQuery {
  pub fn matches(&self, keyword: &Keyword) -> bool {
    let Some(text) = self.text.as_deref().map(str::trim) else {
      return true;
    };
    if text.is_empty() {
      return true;
    }
    let needle = text.to_lowercase();
    keyword.phrase.to_lowercase().contains(&needle)
      || keyword.url.to_lowercase().contains(&needle)
  }

  pub fn apply(&self, keywords: Vec<Keyword>) -> Vec<Keyword> {
    let mut out: Vec<Keyword> =
      keywords.into_iter().filter(|k| self.matches(k)).collect();
    if let Some((key, direction)) = self.sort {
      out.sort_by(|a, b| {
        let ord = compare_by(key, a, b);
        match direction {
          Direction::Asc => ord,
          Direction::Desc => ord.reverse(),
        }
      });
    }
    out
  }
}

fn compare_by(key: SortKey, a: &Keyword, b: &Keyword) -> Ordering {
  match key {
    // Case-insensitive, with byte order only to break ties.
    SortKey::Phrase => a
      .phrase
      .to_lowercase()
      .cmp(&b.phrase.to_lowercase())
      .then_with(|| a.phrase.cmp(&b.phrase)),
    SortKey::CurrentPosition => a.current_position.cmp(&b.current_position),
    SortKey::SearchVolume => a.search_volume.cmp(&b.search_volume),
  }
}
