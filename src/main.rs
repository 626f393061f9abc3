use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hubcap::config::{AppConfig, CliConfig, FileConfig};
use hubcap::notifications::{
    ArchiveStore, CacheEvent, NotificationCache, NotificationRecord, NotificationViewModel,
};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH"));

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[clap(version = VERSION)]
struct CliArgs {
    /// Directory where the notification archive is stored.
    #[clap(long, value_parser = parse_path)]
    pub cache_dir: Option<PathBuf>,

    /// Render width in text columns.
    #[clap(long, default_value_t = 80)]
    pub width: usize,

    /// Optional TOML config file; its values override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the cache with a record batch from a JSON export and render it.
    Refresh {
        /// Path to a JSON array of notification records.
        #[clap(value_parser = parse_path)]
        records: PathBuf,
    },
    /// Render the archived notifications without fetching anything.
    Show {
        /// Only rows that are still unread.
        #[clap(long)]
        unread: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        cache_dir: cli_args.cache_dir.clone(),
        width: cli_args.width,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!(version = VERSION, cache_dir = ?config.cache_dir, "hubcap starting");

    let store = ArchiveStore::new(&config.cache_dir);
    let mut cache = NotificationCache::new(store);

    match cli_args.command {
        Command::Refresh { records } => refresh(&mut cache, &config, &records).await,
        Command::Show { unread } => show(&mut cache, &config, unread),
    }
}

async fn refresh(
    cache: &mut NotificationCache,
    config: &AppConfig,
    records_path: &Path,
) -> Result<()> {
    let warmed = cache.warm(config.width)?;
    if warmed > 0 {
        info!(rows = warmed, "warm start from archive");
    }

    let content = std::fs::read_to_string(records_path)
        .with_context(|| format!("Failed to read records file: {:?}", records_path))?;
    let records: Vec<NotificationRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records file: {:?}", records_path))?;

    cache.submit_update(config.width, records)?;
    match cache.next_event().await {
        Some(CacheEvent::Replaced {
            total,
            persist_error,
            ..
        }) => {
            if let Some(err) = persist_error {
                warn!(%err, "failed to persist notification archive");
            }
            info!(total, "cache refreshed");
        }
        other => warn!(?other, "unexpected cache event"),
    }

    print_rows(cache, cache.all().iter());
    Ok(())
}

fn show(cache: &mut NotificationCache, config: &AppConfig, unread_only: bool) -> Result<()> {
    let warmed = cache.warm(config.width)?;
    if warmed == 0 {
        println!("no archived notifications");
        return Ok(());
    }

    if unread_only {
        print_rows(cache, cache.unread().into_iter());
    } else {
        print_rows(cache, cache.all().iter());
    }
    Ok(())
}

fn print_rows<'a>(
    cache: &NotificationCache,
    rows: impl Iterator<Item = &'a NotificationViewModel>,
) {
    for view_model in rows {
        let marker = if cache.is_read(view_model) { ' ' } else { '*' };
        for (i, line) in view_model.layout.title_lines.iter().enumerate() {
            if i == 0 {
                println!("{} {}", marker, line);
            } else {
                println!("  {}", line);
            }
        }
        println!(
            "  {} | {} | {}",
            view_model.repo,
            view_model.subject.as_str(),
            view_model.date_line
        );
    }
}
