//! Layered runtime settings: built-in defaults, then an optional TOML file,
//! then `RANKSCOPE__*` environment variables.
//!
//! ```toml
//! [latency]
//! enabled = true
//! competitor_create_ms = 800
//!
//! [seed]
//! keywords = "data/keywords.json"
//! current_domain = "example.com"
//!
//! [baseline]
//! visibility_score = 50
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rankscope_core::metrics::MetricsSnapshot;
use rankscope_store_memory::{LatencyConfig, SeedData, seed};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub latency:  LatencyConfig,
  pub seed:     SeedConfig,
  pub baseline: BaselineOverride,
}

/// Where the stores' initial contents come from. Unset paths fall back to
/// the bundled demo data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
  pub keywords:       Option<PathBuf>,
  pub competitors:    Option<PathBuf>,
  pub domain_metrics: Option<PathBuf>,
  pub current_domain: Option<String>,
}

/// Individual baseline figures to replace; unset fields keep the seeded value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BaselineOverride {
  pub visibility_score:             Option<u32>,
  pub previous_visibility_score:    Option<u32>,
  pub total_keywords:               Option<u32>,
  pub previous_total_keywords:      Option<u32>,
  pub top_ten_keywords:             Option<u32>,
  pub previous_top_ten_keywords:    Option<u32>,
  pub average_position:             Option<f64>,
  pub previous_average_position:    Option<f64>,
  pub total_search_volume:          Option<u64>,
  pub previous_total_search_volume: Option<u64>,
}

impl BaselineOverride {
  pub fn apply_to(&self, m: &mut MetricsSnapshot) {
    fn set<T: Copy>(field: &mut T, value: Option<T>) {
      if let Some(v) = value {
        *field = v;
      }
    }
    set(&mut m.visibility_score, self.visibility_score);
    set(&mut m.previous_visibility_score, self.previous_visibility_score);
    set(&mut m.total_keywords, self.total_keywords);
    set(&mut m.previous_total_keywords, self.previous_total_keywords);
    set(&mut m.top_ten_keywords, self.top_ten_keywords);
    set(&mut m.previous_top_ten_keywords, self.previous_top_ten_keywords);
    set(&mut m.average_position, self.average_position);
    set(&mut m.previous_average_position, self.previous_average_position);
    set(&mut m.total_search_volume, self.total_search_volume);
    set(
      &mut m.previous_total_search_volume,
      self.previous_total_search_volume,
    );
  }
}

impl Settings {
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(
        config::Environment::with_prefix("RANKSCOPE")
          .prefix_separator("__")
          .separator("__"),
      )
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// Bundled demo data with any configured files substituted in, then the
  /// `[baseline]` overrides applied.
  pub fn seed_data(&self) -> Result<SeedData> {
    let mut data = SeedData::bundled().context("bundled seed data is invalid")?;
    if let Some(path) = &self.seed.keywords {
      data.keywords = seed::load_keywords(path)
        .with_context(|| format!("failed to load keywords from {}", path.display()))?;
    }
    if let Some(path) = &self.seed.competitors {
      data.competitors = seed::load_competitors(path).with_context(|| {
        format!("failed to load competitors from {}", path.display())
      })?;
    }
    if let Some(path) = &self.seed.domain_metrics {
      data.baseline = seed::load_baseline(path).with_context(|| {
        format!("failed to load domain metrics from {}", path.display())
      })?;
    }
    self.baseline.apply_to(&mut data.baseline);
    Ok(data)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/rankscope.toml")).unwrap();
    assert!(settings.latency.enabled);
    assert_eq!(settings.latency.competitor_create_ms, 800);
    assert!(settings.seed.current_domain.is_none());

    let data = settings.seed_data().unwrap();
    assert_eq!(data.keywords.len(), 5);
  }

  #[test]
  fn baseline_table_overrides_seeded_figures() {
    let path = std::env::temp_dir()
      .join(format!("rankscope-baseline-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "[baseline]\nvisibility_score = 50\naverage_position = 9.5\n",
    )
    .unwrap();
    let settings = Settings::load(&path);
    std::fs::remove_file(&path).unwrap();

    let baseline = settings.unwrap().seed_data().unwrap().baseline;
    assert_eq!(baseline.visibility_score, 50);
    assert_eq!(baseline.average_position, 9.5);
    assert_eq!(
      baseline.total_keywords,
      MetricsSnapshot::default().total_keywords
    );
  }

  #[test]
  fn unreadable_seed_path_is_an_error() {
    let settings = Settings {
      seed: SeedConfig {
        competitors: Some("/nonexistent/competitors.json".into()),
        ..Default::default()
      },
      ..Default::default()
    };
    let err = settings.seed_data().unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/competitors.json"));
  }
}
