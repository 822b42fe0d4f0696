use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use sn_core::{keys, load_state, save_state, AdvisoryHistory, Article, Result, Severity, StateStore};
use sn_engine::{build_advisory, export_feed, AdvisorConfig, AdvisoryManager, ExportConfig};
use sn_feeds::{article_id, default_feeds, FeedConfig, FeedManager, FeedSpec};
use sn_storage::{create_store, StoreConfig};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn security news feeds into actionable advisories", long_about = None)]
pub struct Cli {
    /// Where pipeline state lives: json (files under --root) or memory
    #[arg(long, default_value = "json", global = true)]
    storage: String,
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct FeedArgs {
    /// Feed to fetch as SOURCE=URL; repeat for several. Defaults to the built-in list.
    #[arg(long = "feed")]
    feeds: Vec<FeedSpec>,
}

impl FeedArgs {
    fn specs(&self) -> Vec<FeedSpec> {
        if self.feeds.is_empty() {
            default_feeds()
        } else {
            self.feeds.clone()
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ExportArgs {
    /// Lowest severity published in the feed
    #[arg(long, default_value = "medium")]
    severity: Severity,
    /// Only publish advisories from the last N days
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i64).range(0..=36500))]
    days: i64,
    #[arg(long, default_value_t = 2)]
    max_recommendations: usize,
}

impl From<&ExportArgs> for ExportConfig {
    fn from(args: &ExportArgs) -> Self {
        Self {
            severity_threshold: args.severity,
            recency_window_days: args.days,
            max_recommendations: args.max_recommendations,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch feeds into the news document
    Fetch {
        #[command(flatten)]
        feeds: FeedArgs,
    },
    /// Build advisories for articles not processed yet
    Advise,
    /// Publish the trimmed recommendations feed
    Export {
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Fetch, advise and export in one pass
    Run {
        #[command(flatten)]
        feeds: FeedArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Print the advisory for a single ad-hoc article
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        summary: String,
        #[arg(long, default_value = "")]
        url: String,
    },
    /// List the feeds that would be fetched
    Feeds {
        #[command(flatten)]
        feeds: FeedArgs,
    },
}

async fn fetch(store: Arc<dyn StateStore>, args: &FeedArgs, now: DateTime<Utc>) -> Result<()> {
    let manager = FeedManager::with_specs(store, FeedConfig::default(), args.specs())?;
    let report = manager.update(now).await?;
    if !report.failed_sources.is_empty() {
        info!("⚠️ Failed sources: {}", report.failed_sources.join(", "));
    }
    Ok(())
}

async fn advise(store: Arc<dyn StateStore>, now: DateTime<Utc>) -> Result<()> {
    let manager = AdvisoryManager::new(store, AdvisorConfig::default());
    let report = manager.process(now).await?;
    info!("📋 {} new advisories, {} in history", report.added, report.total);
    Ok(())
}

async fn export(store: Arc<dyn StateStore>, args: &ExportArgs, now: DateTime<Utc>) -> Result<()> {
    let history: Option<AdvisoryHistory> = load_state(store.as_ref(), keys::ADVISORIES).await?;
    let Some(history) = history else {
        info!("📭 No recommendations yet, nothing to export");
        return Ok(());
    };

    let feed = export_feed(&history, &ExportConfig::from(args), now);
    save_state(store.as_ref(), keys::FEED, &feed).await?;
    info!("📤 Exported {} items to {}", feed.items.len(), keys::FEED);
    Ok(())
}

fn classify(title: String, summary: String, url: String, now: DateTime<Utc>) -> Result<()> {
    let article = Article {
        id: article_id(&title, &url),
        date: now.format("%Y-%m-%d").to_string(),
        title,
        summary,
        url,
        source: "cli".to_string(),
        tags: Default::default(),
    };
    println!("{}", serde_json::to_string_pretty(&build_advisory(&article))?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let now = Utc::now();
    let store_config = StoreConfig {
        backend: cli.storage.clone(),
        root: cli.root.clone(),
    };

    match cli.command {
        Commands::Fetch { feeds } => fetch(create_store(&store_config)?, &feeds, now).await?,
        Commands::Advise => advise(create_store(&store_config)?, now).await?,
        Commands::Export { export: args } => export(create_store(&store_config)?, &args, now).await?,
        Commands::Run { feeds, export: args } => {
            let store = create_store(&store_config)?;
            fetch(store.clone(), &feeds, now).await?;
            advise(store.clone(), now).await?;
            export(store, &args, now).await?;
        }
        Commands::Classify { title, summary, url } => classify(title, summary, url, now)?,
        Commands::Feeds { feeds } => {
            for spec in feeds.specs() {
                println!("{}", spec);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::try_parse_from(["sn", "export"]).unwrap();
        match cli.command {
            Commands::Export { export } => {
                let config = ExportConfig::from(&export);
                assert_eq!(config.severity_threshold, Severity::Medium);
                assert_eq!(config.recency_window_days, 3);
                assert_eq!(config.max_recommendations, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_custom_feeds() {
        let cli = Cli::try_parse_from([
            "sn",
            "--storage",
            "memory",
            "fetch",
            "--feed",
            "Krebs=https://krebsonsecurity.com/feed/",
        ])
        .unwrap();
        assert_eq!(cli.storage, "memory");
        match cli.command {
            Commands::Fetch { feeds } => assert_eq!(feeds.specs(), vec![FeedSpec::new("Krebs", "https://krebsonsecurity.com/feed/")]),
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["sn", "fetch", "--feed", "no-equals-sign"]).is_err());
    }

    #[test]
    fn test_export_days_is_bounded() {
        assert!(Cli::try_parse_from(["sn", "export", "--days", "36500"]).is_ok());
        assert!(Cli::try_parse_from(["sn", "export", "--days", "100000000"]).is_err());
        assert!(Cli::try_parse_from(["sn", "export", "--days", "-5"]).is_err());
    }

    #[tokio::test]
    async fn test_export_without_history_writes_nothing() {
        let store = create_store(&StoreConfig { backend: "memory".to_string(), root: PathBuf::from(".") }).unwrap();
        let args = ExportArgs { severity: Severity::Medium, days: 3, max_recommendations: 2 };
        export(store.clone(), &args, Utc::now()).await.unwrap();
        assert!(store.load(keys::FEED).await.unwrap().is_none());
    }
}
