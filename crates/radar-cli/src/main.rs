//! `radar` — command-line driver for the social-radar core.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! table store, and exposes the two halves of the system:
//!
//! ```text
//! radar etl                      # rebuild the table store from raw sources
//! radar scan -t Kacamata -t Buku # score traits, print one recommendation
//! radar traits                   # list the selectable trait descriptors
//! radar classify "tas branded"   # keyword-classify a free-text description
//! ```

use std::{io::ErrorKind, path::PathBuf, str::FromStr as _};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use radar_core::{
  archetype,
  recommend::{Recommendation, TimeContext, WeatherReport},
  store::{TableBatch, TableStore as _},
};
use radar_engine::{Engine, WeatherClient};
use radar_store_sqlite::SqliteStore;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Social-radar decision support")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Rebuild the table store from the raw source files.
  Etl,

  /// Score traits and print the single best recommendation.
  Scan {
    /// A trait descriptor to match; repeat for several.
    #[arg(short = 't', long = "trait", value_name = "TRAIT", required = true)]
    traits: Vec<String>,

    /// Skip time-of-day narrowing even when a rule window is active.
    #[arg(long)]
    no_time_filter: bool,

    /// Print the full scan result as JSON.
    #[arg(long)]
    json: bool,
  },

  /// List the distinct trait descriptors available in the survey.
  Traits,

  /// Keyword-classify a free-text trait description into an archetype.
  Classify {
    text: String,
  },
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` layered under
/// `RADAR_`-prefixed environment variables. Every field has a default, so a
/// missing file is fine.
#[derive(Deserialize, Clone)]
struct RadarConfig {
  #[serde(default = "defaults::survey_path")]
  survey_path:     PathBuf,
  #[serde(default = "defaults::rules_path")]
  rules_path:      PathBuf,
  #[serde(default = "defaults::geo_path")]
  geo_path:        PathBuf,
  #[serde(default = "defaults::store_path")]
  store_path:      PathBuf,
  #[serde(default)]
  weather_api_key: String,
  #[serde(default = "defaults::weather_city")]
  weather_city:    String,
  /// IANA time zone the rule table is written against.
  #[serde(default = "defaults::timezone")]
  timezone:        String,
  #[serde(default = "defaults::city_center_lat")]
  city_center_lat: f64,
  #[serde(default = "defaults::city_center_lon")]
  city_center_lon: f64,
}

mod defaults {
  use std::path::PathBuf;

  pub fn survey_path() -> PathBuf { "hasil_survey.csv".into() }
  pub fn rules_path() -> PathBuf { "social_time_rules.csv".into() }
  pub fn geo_path() -> PathBuf { "lokasi_bjm.json".into() }
  pub fn store_path() -> PathBuf { "radar.db".into() }
  pub fn weather_city() -> String { "Banjarmasin".into() }
  pub fn timezone() -> String { "Asia/Makassar".into() }
  pub fn city_center_lat() -> f64 { -3.3194 }
  pub fn city_center_lon() -> f64 { 114.5928 }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("RADAR"))
    .build()
    .context("failed to read config file")?;
  let cfg: RadarConfig = settings
    .try_deserialize()
    .context("failed to deserialise RadarConfig")?;

  match cli.command {
    Command::Etl => run_etl(&cfg).await,
    Command::Scan { traits, no_time_filter, json } => {
      run_scan(&cfg, traits, no_time_filter, json).await
    }
    Command::Traits => run_traits(&cfg).await,
    Command::Classify { text } => {
      match archetype::classify(&text) {
        Some(a) => println!("{a}"),
        None => println!("no archetype keyword matched"),
      }
      Ok(())
    }
  }
}

// ─── etl ──────────────────────────────────────────────────────────────────────

/// Full batch rebuild. Missing survey or rule sources are fatal; a missing
/// geo source degrades to an empty geo dimension.
async fn run_etl(cfg: &RadarConfig) -> anyhow::Result<()> {
  let survey_raw = std::fs::read_to_string(&cfg.survey_path)
    .with_context(|| format!("missing survey source {:?}", cfg.survey_path))?;
  let rules_raw = std::fs::read_to_string(&cfg.rules_path)
    .with_context(|| format!("missing rule source {:?}", cfg.rules_path))?;

  let survey = radar_ingest::survey_from_source(&survey_raw)
    .context("survey source failed to parse")?;
  let rules = radar_ingest::rules_from_source(&rules_raw)
    .context("rule source failed to parse")?;

  let points = match std::fs::read_to_string(&cfg.geo_path) {
    Ok(raw) => radar_ingest::parse_geo(&raw)
      .context("geo source failed to parse")?,
    Err(err) if err.kind() == ErrorKind::NotFound => {
      tracing::warn!(
        path = ?cfg.geo_path,
        "geo source missing, continuing with an empty geo dimension"
      );
      Vec::new()
    }
    Err(err) => {
      return Err(err)
        .with_context(|| format!("failed to read {:?}", cfg.geo_path));
    }
  };

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  let snapshot = store
    .rebuild(TableBatch { survey, rules, points })
    .await
    .context("rebuild failed")?;

  tracing::info!(
    snapshot_id = %snapshot.snapshot_id,
    survey_rows = snapshot.survey_rows,
    rule_rows = snapshot.rule_rows,
    geo_rows = snapshot.geo_rows,
    "table store rebuilt"
  );
  Ok(())
}

// ─── scan ─────────────────────────────────────────────────────────────────────

/// Everything one interaction produces, for `--json` consumers.
#[derive(Serialize)]
struct ScanOutput {
  recommendation: Option<Recommendation>,
  time_context:   Option<TimeContext>,
  weather:        WeatherReport,
}

async fn run_scan(
  cfg: &RadarConfig,
  traits: Vec<String>,
  no_time_filter: bool,
  json: bool,
) -> anyhow::Result<()> {
  let engine = open_engine(cfg).await?;

  let ctx = if no_time_filter {
    None
  } else {
    engine.time_context().await.context("time-context lookup failed")?
  };

  let weather = WeatherClient::new(&cfg.weather_api_key, &cfg.weather_city)
    .context("failed to build weather client")?
    .current()
    .await;

  let recommendation = engine.scan_or_empty(&traits, ctx.as_ref()).await;

  if json {
    let output = ScanOutput { recommendation, time_context: ctx, weather };
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  println!("Weather : {:.1}°C ({})", weather.temp_c, weather.description);
  match &ctx {
    Some(ctx) => println!(
      "Window  : {} {} ({}–{}) [{}]",
      ctx.day,
      ctx.rule.phase_name,
      ctx.rule.start_hour,
      ctx.rule.end_hour,
      ctx.rule.social_status,
    ),
    None => println!("Window  : no active rule window"),
  }

  match recommendation {
    Some(rec) => {
      println!("Target  : {} (score {})", rec.archetype, rec.score);
      println!("Location: {}", rec.title);
      if rec.detail != rec.title {
        println!("Place   : {}", rec.detail);
      }
      println!("Coords  : {:.4}, {:.4}", rec.lat, rec.lon);
    }
    None => println!("No archetype matched the selected traits."),
  }
  Ok(())
}

// ─── traits ───────────────────────────────────────────────────────────────────

async fn run_traits(cfg: &RadarConfig) -> anyhow::Result<()> {
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  for token in store.distinct_traits().await? {
    println!("{token}");
  }
  Ok(())
}

// ─── helpers ──────────────────────────────────────────────────────────────────

async fn open_engine(cfg: &RadarConfig) -> anyhow::Result<Engine<SqliteStore>> {
  let tz = chrono_tz::Tz::from_str(&cfg.timezone)
    .map_err(|e| anyhow::anyhow!("invalid timezone {:?}: {e}", cfg.timezone))?;
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  Ok(Engine::new(
    store,
    tz,
    (cfg.city_center_lat, cfg.city_center_lon),
  ))
}
