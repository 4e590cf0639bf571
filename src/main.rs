use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use url::Url;

use feed_cache::ArcPath;
use feed_cache::api::feed::RemoteFeedLoader;
use feed_cache::cache::{FeedStore, LocalFeedLoader, complete};
use feed_cache::config::{Config, PathOpt, USizeOpt};
use feed_cache::feed::FeedImage;
use feed_cache::fs::Fs;
use feed_cache::log::Log;
use feed_cache::net::Net;
use feed_cache::refresh::refresh;

const SCOPE: &str = "main";

#[derive(Parser)]
#[command(name = "feed-cache")]
#[command(about = "Keeps a local, time-boxed copy of a remote image feed")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, env = "FEED_CACHE_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the remote feed and replace the cached one with it
    Refresh {
        /// Feed endpoint, overrides `feed_url` from the configuration
        #[arg(long)]
        url: Option<Url>,
    },
    /// Print the cached feed, nothing if it expired
    Show,
    /// Delete the cached feed if it expired or cannot be read
    Validate,
    /// Delete the cached feed
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let fs = Fs::spawn();

    let config_path = ArcPath::from(cli.config.unwrap_or_else(default_config_path));
    let config = Config::spawn(fs.clone(), config_path);
    if config.load().await.is_err() {
        config.save().await?;
    }

    let log = Log::spawn(
        fs.clone(),
        config.log_level().await,
        config.usize(USizeOpt::LogMaxAge).await,
        config.path(PathOpt::LogDir).await,
    )
    .await?;
    log.collect_garbage().await;

    let store = FeedStore::spawn(fs, config.clone(), log.clone()).await;
    let loader = LocalFeedLoader::new(store.clone(), Arc::new(Utc::now), log.clone());

    log.info(SCOPE, "Starting feed-cache CLI");

    let res = match cli.command {
        Commands::Refresh { url } => handle_refresh_command(&loader, &config, &log, url).await,
        Commands::Show => handle_show_command(&loader).await,
        Commands::Validate => handle_validate_command(&loader).await,
        Commands::Clear => store
            .delete()
            .await
            .map(|()| println!("Cache cleared"))
            .context("Failed to clear the cache"),
    };

    if let Err(e) = log.flush().await {
        eprintln!("Failed to flush the log: {e}");
    }
    res
}

/// `$HOME/.config/feed-cache/config.toml`, or a file under `/tmp` when there is no home.
fn default_config_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".config")
        .join("feed-cache")
        .join("config.toml")
}

async fn handle_refresh_command(
    loader: &Arc<LocalFeedLoader>,
    config: &Config,
    log: &Log,
    url: Option<Url>,
) -> anyhow::Result<()> {
    let url = match url {
        Some(url) => url,
        None => {
            let Some(url) = config.feed_url().await else {
                anyhow::bail!("No feed url: pass --url or set feed_url in the configuration");
            };
            Url::parse(&url).with_context(|| format!("Invalid feed url in configuration: {url}"))?
        }
    };

    println!("Fetching feed from {url}...");

    let net = Net::spawn(config.clone(), log.clone()).await;
    let remote = RemoteFeedLoader::spawn(net, url, log.clone());
    let count = refresh(&remote, loader).await?;

    println!("Cached {count} images");
    Ok(())
}

async fn handle_show_command(loader: &Arc<LocalFeedLoader>) -> anyhow::Result<()> {
    let feed = complete(|done| loader.load(done))
        .await
        .context("Cache operation ended without completing")?
        .context("Failed to load the cached feed")?;

    if feed.is_empty() {
        println!("The cache is empty or expired");
        return Ok(());
    }

    for (i, image) in feed.iter().enumerate() {
        print_image(i + 1, image);
    }
    Ok(())
}

async fn handle_validate_command(loader: &Arc<LocalFeedLoader>) -> anyhow::Result<()> {
    complete(|done| loader.validate_cache(done))
        .await
        .context("Cache operation ended without completing")?
        .context("Failed to validate the cache")?;

    println!("Cache validated");
    Ok(())
}

fn print_image(index: usize, image: &FeedImage) {
    println!("{index}. {}", image.url);
    if let Some(description) = &image.description {
        println!("   {description}");
    }
    if let Some(location) = &image.location {
        println!("   Location: {location}");
    }
    println!("   Id: {}", image.id);
    println!();
}
