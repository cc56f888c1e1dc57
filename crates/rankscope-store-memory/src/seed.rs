//! Initial store contents.
//!
//! Seed collections are plain JSON using the same camelCase field names the
//! records serialise with. A demo set is compiled into the crate; front-ends
//! may substitute their own files.

use std::{collections::HashSet, path::Path};

use rankscope_core::{
  Error as CoreError, competitor::Competitor, domain::normalize_domain,
  keyword::Keyword, metrics::MetricsSnapshot,
};

use crate::{Error, Result};

const BUNDLED_KEYWORDS: &str = include_str!("../seed/keywords.json");
const BUNDLED_COMPETITORS: &str = include_str!("../seed/competitors.json");
const BUNDLED_METRICS: &str = include_str!("../seed/domain_metrics.json");

/// Everything the three stores start from.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
  pub keywords:    Vec<Keyword>,
  pub competitors: Vec<Competitor>,
  pub baseline:    MetricsSnapshot,
}

impl SeedData {
  /// The demo data set shipped with the crate.
  pub fn bundled() -> Result<Self> {
    Ok(Self {
      keywords:    parse_keywords(BUNDLED_KEYWORDS)?,
      competitors: parse_competitors(BUNDLED_COMPETITORS)?,
      baseline:    parse_baseline(BUNDLED_METRICS)?,
    })
  }
}

fn read(path: &Path) -> Result<String> {
  std::fs::read_to_string(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })
}

/// Parse a keyword array, rejecting repeated ids.
pub fn parse_keywords(json: &str) -> Result<Vec<Keyword>> {
  let keywords: Vec<Keyword> = serde_json::from_str(json)?;
  let mut seen = HashSet::new();
  for k in &keywords {
    if !seen.insert(k.id) {
      return Err(Error::DuplicateSeedId(k.id));
    }
  }
  Ok(keywords)
}

/// Parse a competitor array, normalizing every domain and rejecting
/// repeated ids or domains.
pub fn parse_competitors(json: &str) -> Result<Vec<Competitor>> {
  let raw: Vec<Competitor> = serde_json::from_str(json)?;
  let mut ids = HashSet::new();
  let mut domains = HashSet::new();
  let mut out = Vec::with_capacity(raw.len());
  for mut c in raw {
    if !ids.insert(c.id) {
      return Err(Error::DuplicateSeedId(c.id));
    }
    c.domain = normalize_domain(&c.domain)?;
    if c.visibility_score > 100 {
      return Err(CoreError::validation(format!(
        "seed competitor {} has visibility {}",
        c.id, c.visibility_score
      ))
      .into());
    }
    if !domains.insert(c.domain.clone()) {
      return Err(CoreError::Duplicate(c.domain).into());
    }
    out.push(c);
  }
  Ok(out)
}

pub fn parse_baseline(json: &str) -> Result<MetricsSnapshot> {
  Ok(serde_json::from_str(json)?)
}

pub fn load_keywords(path: &Path) -> Result<Vec<Keyword>> {
  parse_keywords(&read(path)?)
}

pub fn load_competitors(path: &Path) -> Result<Vec<Competitor>> {
  parse_competitors(&read(path)?)
}

pub fn load_baseline(path: &Path) -> Result<MetricsSnapshot> {
  parse_baseline(&read(path)?)
}
