//! `rankscope`: terminal front-end for the Rankscope SEO dashboard.
//!
//! Builds the in-memory stores from config and seed data, runs one command,
//! and exits. Nothing is persisted between invocations.
//!
//! # Usage
//!
//! ```
//! rankscope dashboard --domain example.com
//! rankscope keywords list --search seo --sort current_position
//! rankscope competitors add https://rival.io/
//! ```

mod render;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rankscope_core::{
  competitor::{CompetitorPatch, rank_by_overlap, rank_by_visibility},
  domain::looks_like_domain,
  keyword::{Direction, KeywordQuery, NewKeyword, SortKey, count_top_ten},
  store::{CompetitorStore, DomainMetricsProvider, KeywordStore},
};
use rankscope_store_memory::{
  MemoryCompetitorStore, MemoryDomainProvider, MemoryKeywordStore,
  SimulatedLatency,
};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rankscope", version, about = "SEO visibility dashboard")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rankscope.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show headline metrics for the selected domain.
  Dashboard {
    /// Select this domain before fetching metrics.
    #[arg(long)]
    domain: Option<String>,
  },
  /// Manage tracked keywords.
  #[command(subcommand)]
  Keywords(KeywordCommand),
  /// Manage competitor domains.
  #[command(subcommand)]
  Competitors(CompetitorCommand),
}

#[derive(Subcommand, Debug)]
enum KeywordCommand {
  List {
    /// Only keywords whose phrase or URL contains this text.
    #[arg(long)]
    search: Option<String>,
    /// phrase, current_position, or search_volume.
    #[arg(long)]
    sort:   Option<SortKey>,
    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    desc:   bool,
  },
  Add {
    phrase: String,
    url:    String,
  },
  Delete {
    id: u32,
  },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Ranking {
  #[default]
  Insertion,
  Visibility,
  Overlap,
}

#[derive(Subcommand, Debug)]
enum CompetitorCommand {
  List {
    #[arg(long, value_enum, default_value_t)]
    by: Ranking,
  },
  Show {
    id: u32,
  },
  Add {
    domain: String,
  },
  Update {
    id:              u32,
    #[arg(long)]
    domain:          Option<String>,
    #[arg(long)]
    common_keywords: Option<u32>,
    #[arg(long)]
    visibility:      Option<u8>,
  },
  Delete {
    id: u32,
  },
}

// ─── Stores ───────────────────────────────────────────────────────────────────

struct Stores {
  keywords:    MemoryKeywordStore,
  competitors: MemoryCompetitorStore,
  domain:      MemoryDomainProvider,
}

impl Stores {
  fn from_settings(settings: &Settings) -> Result<Self> {
    let seed = settings.seed_data()?;
    let latency = SimulatedLatency::from_config(&settings.latency);

    let mut domain = MemoryDomainProvider::new(seed.baseline, latency.clone());
    if let Some(current) = &settings.seed.current_domain {
      domain = domain.with_current(current.clone());
    }

    Ok(Self {
      keywords: MemoryKeywordStore::new(seed.keywords, latency.clone()),
      competitors: MemoryCompetitorStore::new(seed.competitors, latency),
      domain,
    })
  }
}

fn require_domain_shape(domain: &str) -> Result<()> {
  if !looks_like_domain(domain) {
    bail!("{domain:?} is not a valid domain (e.g. example.com)");
  }
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  let stores = Stores::from_settings(&settings)?;

  match cli.command {
    Command::Dashboard { domain } => dashboard(&stores, domain).await,
    Command::Keywords(cmd) => keywords(&stores.keywords, cmd).await,
    Command::Competitors(cmd) => competitors(&stores.competitors, cmd).await,
  }
}

async fn dashboard(stores: &Stores, domain: Option<String>) -> Result<()> {
  if let Some(domain) = domain {
    require_domain_shape(&domain)?;
    let selected = stores
      .domain
      .set_current_domain(domain)
      .await
      .context("failed to select domain")?;
    tracing::info!("Tracking {selected}");
  }

  // The dashboard page issues all three fetches at once.
  let (metrics, keywords, competitors) = tokio::join!(
    stores.domain.metrics(),
    stores.keywords.list(),
    stores.competitors.list(),
  );
  print!(
    "{}",
    render::dashboard(
      &metrics,
      keywords.len(),
      count_top_ten(&keywords),
      competitors.len()
    )
  );
  Ok(())
}

async fn keywords<S: KeywordStore>(store: &S, cmd: KeywordCommand) -> Result<()> {
  match cmd {
    KeywordCommand::List { search, sort, desc } => {
      let direction = if desc { Direction::Desc } else { Direction::Asc };
      let query = KeywordQuery {
        text: search,
        sort: sort.map(|key| (key, direction)),
      };
      let listed = query.apply(store.list().await);
      if listed.is_empty() {
        println!("No keywords found.");
      } else {
        print!("{}", render::keyword_table(&listed));
      }
    }
    KeywordCommand::Add { phrase, url } => {
      let created = store
        .create(NewKeyword::new(phrase, url))
        .await
        .context("failed to add keyword")?;
      print!("{}", render::keyword_table(std::slice::from_ref(&created)));
    }
    KeywordCommand::Delete { id } => {
      store.delete(id).await;
      println!("Keyword {id} deleted.");
    }
  }
  Ok(())
}

async fn competitors<S: CompetitorStore>(
  store: &S,
  cmd: CompetitorCommand,
) -> Result<()> {
  match cmd {
    CompetitorCommand::List { by } => {
      let listed = store.list().await;
      let listed = match by {
        Ranking::Insertion => listed,
        Ranking::Visibility => rank_by_visibility(listed),
        Ranking::Overlap => rank_by_overlap(listed),
      };
      print!("{}", render::competitor_table(&listed));
    }
    CompetitorCommand::Show { id } => {
      let found = store.get(id).await.context("failed to load competitor")?;
      print!("{}", render::competitor(&found));
    }
    CompetitorCommand::Add { domain } => {
      require_domain_shape(&domain)?;
      let created = store
        .create(domain)
        .await
        .context("failed to add competitor")?;
      println!("Added {} as competitor.", created.domain);
      print!("{}", render::competitor(&created));
    }
    CompetitorCommand::Update { id, domain, common_keywords, visibility } => {
      let patch = CompetitorPatch {
        domain,
        common_keywords,
        visibility_score: visibility,
      };
      if patch.is_empty() {
        bail!("nothing to update; pass --domain, --common-keywords, or --visibility");
      }
      let updated = store
        .update(id, patch)
        .await
        .context("failed to update competitor")?;
      print!("{}", render::competitor(&updated));
    }
    CompetitorCommand::Delete { id } => {
      let removed = store
        .delete(id)
        .await
        .context("failed to delete competitor")?;
      println!("Removed {}.", removed.domain);
    }
  }
  Ok(())
}
