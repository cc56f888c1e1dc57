//! Plain-text rendering for terminal output.

use std::fmt::Write as _;

use rankscope_core::{
  competitor::Competitor,
  keyword::Keyword,
  metrics::{ChangeType, MetricsSnapshot, Trend},
};

fn arrow(trend: Trend) -> &'static str {
  match trend.change_type {
    ChangeType::Positive => "▲",
    ChangeType::Negative => "▼",
    ChangeType::Neutral => "•",
  }
}

fn trend_cell(trend: Trend) -> String {
  format!("{} {}%", arrow(trend), trend.change_percent.abs())
}

/// Headline dashboard figures plus a one-line keyword/competitor summary.
pub fn dashboard(
  metrics: &MetricsSnapshot,
  tracked_keywords: usize,
  top_ten: usize,
  competitors: usize,
) -> String {
  let title = match &metrics.domain {
    Some(domain) => format!("{domain} Overview"),
    None => "Domain Overview (no domain selected)".to_owned(),
  };
  let trends = metrics.trends();

  let mut out = String::new();
  let _ = writeln!(out, "{title}");
  let _ = writeln!(out, "{}", "─".repeat(title.chars().count()));
  let rows = [
    ("Visibility Score", format!("{}%", metrics.visibility_score), trends.visibility),
    ("Total Keywords", metrics.total_keywords.to_string(), trends.total_keywords),
    (
      "Average Position",
      format!("{:.1}", metrics.average_position),
      trends.average_position,
    ),
    ("Top 10 Rankings", metrics.top_ten_keywords.to_string(), trends.top_ten),
  ];
  for (label, value, trend) in rows {
    let _ = writeln!(out, "{label:<18} {value:>8}  {}", trend_cell(trend));
  }
  let _ = writeln!(
    out,
    "{:<18} {:>8}",
    "Search Volume",
    metrics.total_search_volume
  );
  let _ = writeln!(
    out,
    "\n{tracked_keywords} tracked keywords, {top_ten} in the top 10, {competitors} competitors"
  );
  out
}

pub fn keyword_table(keywords: &[Keyword]) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:>4}  {:<28} {:>4} {:>6} {:>8}  {:<10}  URL",
    "ID", "KEYWORD", "POS", "CHANGE", "VOLUME", "UPDATED"
  );
  for k in keywords {
    let change = match k.position_change() {
      Some(0) | None => "-".to_owned(),
      Some(n) if n > 0 => format!("+{n}"),
      Some(n) => n.to_string(),
    };
    let _ = writeln!(
      out,
      "{:>4}  {:<28} {:>4} {:>6} {:>8}  {:<10}  {}",
      k.id, k.phrase, k.current_position, change, k.search_volume, k.last_updated, k.url
    );
  }
  out
}

pub fn competitor_table(competitors: &[Competitor]) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:>4}  {:<28} {:>7} {:>10}  LEVEL",
    "ID", "DOMAIN", "COMMON", "VISIBILITY"
  );
  for c in competitors {
    let _ = writeln!(
      out,
      "{:>4}  {:<28} {:>7} {:>9}%  {}",
      c.id,
      c.domain,
      c.common_keywords,
      c.visibility_score,
      c.competition_level()
    );
  }
  out
}

pub fn competitor(c: &Competitor) -> String {
  format!(
    "#{} {}\n  common keywords: {}\n  visibility:      {}%\n  competition:     {}\n",
    c.id,
    c.domain,
    c.common_keywords,
    c.visibility_score,
    c.competition_level()
  )
}
