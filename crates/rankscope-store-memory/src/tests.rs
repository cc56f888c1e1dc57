//! Integration tests for the in-memory stores.

use std::{
  io,
  sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use rankscope_core::{
  Error,
  competitor::{Competitor, CompetitorPatch},
  effects::{FixedClock, NoLatency, ScriptedRandom},
  error::Entity,
  keyword::{DeleteOutcome, Keyword, NewKeyword},
  metrics::MetricsSnapshot,
  store::{CompetitorStore, DomainMetricsProvider, KeywordStore},
};
use tokio::time::{Duration, Instant};

use crate::{
  MemoryCompetitorStore, MemoryDomainProvider, MemoryKeywordStore,
  SimulatedLatency, seed,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn keyword(id: u32, phrase: &str) -> Keyword {
  Keyword {
    id,
    phrase: phrase.into(),
    url: format!("https://example.com/{id}"),
    current_position: 10,
    previous_position: Some(12),
    search_volume: 1_000,
    last_updated: date(2024, 1, 1),
  }
}

fn competitor(id: u32, domain: &str) -> Competitor {
  Competitor {
    id,
    domain: domain.into(),
    common_keywords: 30,
    visibility_score: 70,
  }
}

fn keywords(seed: Vec<Keyword>) -> MemoryKeywordStore<NoLatency> {
  MemoryKeywordStore::new(seed, NoLatency)
    .with_random(ScriptedRandom::new([17, 2_500]))
    .with_clock(FixedClock(date(2024, 6, 1)))
}

fn competitors(seed: Vec<Competitor>) -> MemoryCompetitorStore<NoLatency> {
  MemoryCompetitorStore::new(seed, NoLatency)
    .with_random(ScriptedRandom::new([42, 77]))
}

fn domains() -> MemoryDomainProvider<NoLatency> {
  MemoryDomainProvider::new(MetricsSnapshot::default(), NoLatency)
}

// ─── Keywords ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_into_empty_store_then_list() {
  let s = keywords(vec![]);

  let created = s
    .create(NewKeyword::new("seo tips", "https://x.com/a"))
    .await
    .unwrap();
  assert_eq!(created.id, 1);

  let all = s.list().await;
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].phrase, "seo tips");
  assert_eq!(all[0].previous_position, None);
  assert_eq!(all[0].id, 1);
}

#[tokio::test]
async fn create_assigns_max_id_plus_one() {
  let s = keywords(vec![keyword(3, "a"), keyword(7, "b"), keyword(5, "c")]);

  let first = s.create(NewKeyword::new("d", "u")).await.unwrap();
  assert_eq!(first.id, 8);
  let second = s.create(NewKeyword::new("e", "u")).await.unwrap();
  assert_eq!(second.id, 9);

  s.delete(9).await;
  let third = s.create(NewKeyword::new("f", "u")).await.unwrap();
  assert_eq!(third.id, 9);
}

#[tokio::test]
async fn create_uses_injected_random_and_clock() {
  let s = keywords(vec![]);
  let k = s
    .create(NewKeyword::new("  rank tracker ", "https://x.com/t"))
    .await
    .unwrap();

  assert_eq!(k.phrase, "rank tracker");
  assert_eq!(k.current_position, 17);
  assert_eq!(k.search_volume, 2_500);
  assert_eq!(k.last_updated, date(2024, 6, 1));
}

#[tokio::test]
async fn generated_keyword_figures_stay_in_range() {
  let s = MemoryKeywordStore::new(vec![], NoLatency);
  for i in 0..25 {
    let k = s.create(NewKeyword::new(format!("kw {i}"), "u")).await.unwrap();
    assert!((1..=50).contains(&k.current_position));
    assert!((500..=10_499).contains(&k.search_volume));
  }
}

#[tokio::test]
async fn blank_keyword_input_is_rejected() {
  let s = keywords(vec![keyword(1, "a")]);

  let err = s.create(NewKeyword::new(" ", "https://x.com")).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  let err = s.create(NewKeyword::new("seo", "")).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));

  assert_eq!(s.list().await.len(), 1);
}

#[tokio::test]
async fn exhausted_keyword_ids_are_rejected() {
  let s = keywords(vec![keyword(u32::MAX, "edge")]);

  let err = s.create(NewKeyword::new("next", "u")).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert_eq!(s.list().await.len(), 1);
}

#[tokio::test]
async fn keyword_delete_is_lenient() {
  let s = keywords(vec![keyword(1, "a"), keyword(2, "b")]);

  assert_eq!(s.delete(99).await, DeleteOutcome { success: true });
  assert_eq!(s.list().await.len(), 2);

  assert_eq!(s.delete(1).await, DeleteOutcome { success: true });
  let ids: Vec<u32> = s.list().await.iter().map(|k| k.id).collect();
  assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn keyword_list_is_a_snapshot() {
  let s = keywords(vec![keyword(1, "a")]);

  let mut snapshot = s.list().await;
  snapshot[0].phrase = "changed".into();
  snapshot.clear();

  assert_eq!(s.list().await[0].phrase, "a");
}

// ─── Competitors ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn competitor_domain_is_normalized_and_unique() {
  let s = competitors(vec![]);

  let c = s.create("https://Example.com/".into()).await.unwrap();
  assert_eq!(c.domain, "example.com");
  assert_eq!(c.id, 1);
  assert_eq!(c.common_keywords, 42);
  assert_eq!(c.visibility_score, 77);

  let err = s.create("EXAMPLE.COM".into()).await.unwrap_err();
  assert_eq!(err, Error::Duplicate("example.com".into()));
  assert_eq!(s.list().await.len(), 1);
}

#[tokio::test]
async fn competitor_figures_are_clamped_to_their_ranges() {
  let s = MemoryCompetitorStore::new(vec![], NoLatency)
    .with_random(ScriptedRandom::new([5, 120]));
  let c = s.create("rival.io".into()).await.unwrap();
  assert_eq!(c.common_keywords, 10);
  assert_eq!(c.visibility_score, 99);
}

#[tokio::test]
async fn empty_competitor_domain_is_rejected() {
  let s = competitors(vec![]);
  assert!(matches!(s.create(String::new()).await, Err(Error::Validation(_))));
  assert!(matches!(s.create("http://".into()).await, Err(Error::Validation(_))));
}

#[tokio::test]
async fn competitor_create_follows_max_id() {
  let s = competitors(vec![competitor(4, "a.com"), competitor(2, "b.com")]);
  let c = s.create("c.com".into()).await.unwrap();
  assert_eq!(c.id, 5);
  let ids: Vec<u32> = s.list().await.iter().map(|c| c.id).collect();
  assert_eq!(ids, vec![4, 2, 5]);
}

#[tokio::test]
async fn exhausted_competitor_ids_are_rejected() {
  let s = competitors(vec![competitor(u32::MAX, "a.com")]);

  let err = s.create("b.com".into()).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert_eq!(s.list().await, vec![competitor(u32::MAX, "a.com")]);
}

#[tokio::test]
async fn missing_competitor_is_not_found() {
  let s = competitors(vec![competitor(1, "a.com")]);
  let not_found = Error::NotFound { entity: Entity::Competitor, id: 9 };

  assert_eq!(s.get(9).await.unwrap_err(), not_found);
  assert_eq!(s.delete(9).await.unwrap_err(), not_found);
  assert_eq!(
    s.update(9, CompetitorPatch::default()).await.unwrap_err(),
    not_found
  );
  assert_eq!(s.list().await.len(), 1);
}

#[tokio::test]
async fn get_and_delete_competitor() {
  let s = competitors(vec![competitor(1, "a.com"), competitor(2, "b.com")]);

  assert_eq!(s.get(2).await.unwrap().domain, "b.com");

  let removed = s.delete(1).await.unwrap();
  assert_eq!(removed, competitor(1, "a.com"));
  assert_eq!(s.list().await, vec![competitor(2, "b.com")]);
  assert!(s.get(1).await.is_err());
}

#[tokio::test]
async fn update_merges_given_fields() {
  let s = competitors(vec![competitor(1, "a.com")]);

  let updated = s
    .update(1, CompetitorPatch {
      common_keywords: Some(64),
      visibility_score: Some(91),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.domain, "a.com");
  assert_eq!(updated.common_keywords, 64);
  assert_eq!(updated.visibility_score, 91);
  assert_eq!(s.get(1).await.unwrap(), updated);
}

#[tokio::test]
async fn update_keeps_domain_invariants() {
  let s = competitors(vec![competitor(1, "a.com"), competitor(2, "b.com")]);

  let renamed = s
    .update(1, CompetitorPatch {
      domain: Some("https://A.com/".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(renamed.domain, "a.com");

  let err = s
    .update(1, CompetitorPatch { domain: Some("B.COM".into()), ..Default::default() })
    .await
    .unwrap_err();
  assert_eq!(err, Error::Duplicate("b.com".into()));

  let err = s
    .update(2, CompetitorPatch { visibility_score: Some(150), ..Default::default() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert_eq!(s.get(2).await.unwrap(), competitor(2, "b.com"));
}

// ─── Domain metrics ──────────────────────────────────────────────────────────

#[tokio::test]
async fn metrics_without_domain_are_the_baseline() {
  let d = domains();
  assert_eq!(d.current_domain(), None);

  let m = d.metrics().await;
  assert_eq!(m, MetricsSnapshot::default());
  assert_eq!(m.domain, None);
}

#[tokio::test]
async fn metrics_are_repeatable_per_domain() {
  let d = domains();
  assert_eq!(d.set_current_domain("seo.dev".into()).await.unwrap(), "seo.dev");
  assert_eq!(d.current_domain().as_deref(), Some("seo.dev"));

  let first = d.metrics().await;
  let second = d.metrics().await;
  assert_eq!(first, second);
  assert_eq!(first.domain.as_deref(), Some("seo.dev"));
}

#[tokio::test]
async fn different_domains_yield_different_visibility() {
  let d = domains();

  d.set_current_domain("foo.com".into()).await.unwrap();
  let foo = d.metrics().await;
  d.set_current_domain("bar.com".into()).await.unwrap();
  let bar = d.metrics().await;

  // variation("foo.com") == -7, variation("bar.com") == -8
  assert_ne!(foo.visibility_score, bar.visibility_score);
  for m in [&foo, &bar] {
    assert!((10..=100).contains(&m.visibility_score));
  }
  assert_eq!(bar.domain.as_deref(), Some("bar.com"));
}

#[tokio::test]
async fn remove_domain_restores_baseline() {
  let d = domains().with_current("example.com");
  assert_eq!(d.metrics().await.visibility_score, 81);

  d.remove_domain().await;
  assert_eq!(d.current_domain(), None);
  assert_eq!(d.metrics().await, MetricsSnapshot::default());
}

#[tokio::test]
async fn blank_domain_selection_is_rejected() {
  let d = domains().with_current("keep.com");
  let err = d.set_current_domain("  ".into()).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert_eq!(d.current_domain().as_deref(), Some("keep.com"));
}

// ─── Simulated latency ───────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn operations_wait_out_their_delay() {
  let s = MemoryKeywordStore::new(vec![], SimulatedLatency::default());

  let start = Instant::now();
  s.create(NewKeyword::new("a", "b")).await.unwrap();
  assert!(start.elapsed() >= Duration::from_millis(500));

  let d = MemoryDomainProvider::new(MetricsSnapshot::default(), SimulatedLatency::default());
  let start = Instant::now();
  assert_eq!(d.current_domain(), None);
  assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn effects_apply_in_completion_order() {
  let s = MemoryKeywordStore::new(vec![keyword(1, "a")], SimulatedLatency::default());

  // list (400ms) resolves before create (500ms) applies.
  let (listed, created) =
    tokio::join!(s.list(), s.create(NewKeyword::new("b", "u")));
  assert_eq!(listed.len(), 1);
  assert_eq!(created.unwrap().id, 2);

  // delete (300ms) runs before create (500ms) assigns its id.
  let (created, _) = tokio::join!(s.create(NewKeyword::new("c", "u")), s.delete(2));
  assert_eq!(created.unwrap().id, 2);
}

#[tokio::test(start_paused = true)]
async fn metrics_see_a_selection_that_lands_first() {
  let d = MemoryDomainProvider::new(MetricsSnapshot::default(), SimulatedLatency::default());

  // set (100ms) lands before metrics (300ms) reads the selection.
  let (metrics, set) =
    tokio::join!(d.metrics(), d.set_current_domain("example.com".into()));
  set.unwrap();
  assert_eq!(metrics.domain.as_deref(), Some("example.com"));
}

#[tokio::test(start_paused = true)]
async fn disabled_latency_completes_immediately() {
  let s = MemoryCompetitorStore::new(vec![], SimulatedLatency::disabled());
  let start = Instant::now();
  s.create("a.com".into()).await.unwrap();
  assert_eq!(start.elapsed(), Duration::ZERO);
}

// ─── Logging ─────────────────────────────────────────────────────────────────

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl Captured {
  fn text(&self) -> String {
    String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
  }
}

#[tokio::test]
async fn reads_emit_debug_events() {
  let captured = Captured::default();
  let writer = captured.clone();
  let subscriber = tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_ansi(false)
    .with_writer(move || writer.clone())
    .finish();
  let _guard = tracing::subscriber::set_default(subscriber);

  keywords(vec![keyword(1, "a")]).list().await;
  let c = competitors(vec![competitor(1, "a.com")]);
  c.list().await;
  c.get(1).await.unwrap();
  domains().with_current("foo.com").metrics().await;

  let text = captured.text();
  assert!(text.contains("keywords listed"), "{text}");
  assert!(text.contains("competitors listed"), "{text}");
  assert!(text.contains("competitor fetched"), "{text}");
  assert!(text.contains("metrics derived"), "{text}");
}

// ─── Seed data ───────────────────────────────────────────────────────────────

#[test]
fn bundled_seed_loads() {
  let data = crate::SeedData::bundled().unwrap();
  assert_eq!(data.keywords.len(), 5);
  assert_eq!(data.competitors.len(), 4);
  assert_eq!(data.baseline, MetricsSnapshot::default());
  assert_eq!(data.keywords[3].previous_position, None);
}

#[test]
fn seed_competitors_are_normalized_and_checked() {
  let parsed = seed::parse_competitors(
    r#"[{"id":1,"domain":"HTTPS://Rival.com/","commonKeywords":30,"visibilityScore":70}]"#,
  )
  .unwrap();
  assert_eq!(parsed[0].domain, "rival.com");

  let dup = seed::parse_competitors(
    r#"[
      {"id":1,"domain":"rival.com","commonKeywords":30,"visibilityScore":70},
      {"id":2,"domain":"Rival.com","commonKeywords":30,"visibilityScore":70}
    ]"#,
  );
  assert!(matches!(dup, Err(crate::Error::Core(Error::Duplicate(_)))));
}

#[test]
fn seed_keywords_reject_repeated_ids() {
  let k = serde_json::to_string(&vec![keyword(1, "a"), keyword(1, "b")]).unwrap();
  assert!(matches!(
    seed::parse_keywords(&k),
    Err(crate::Error::DuplicateSeedId(1))
  ));
}

#[test]
fn missing_seed_file_reports_path() {
  let err = seed::load_keywords(std::path::Path::new("/nonexistent/keywords.json"))
    .unwrap_err();
  assert!(err.to_string().contains("/nonexistent/keywords.json"));
}
