// src/main.rs
use catwalk::{
    deliver, render_pages, AppError, CachedWikiClient, CategoryTraverser, CommandLineInput,
    DeliveryTarget, MediaWikiHttpClient, TraversalConfig, TraversalEvent, WikiRepository,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr so a page list printed to stdout stays clean.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("catwalk.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the wiki client, wrapped in the disk cache unless caching is off.
async fn connect(config: &TraversalConfig) -> Result<Arc<dyn WikiRepository>, AppError> {
    let http = MediaWikiHttpClient::new(config.api_url.clone(), &config.user_agent)?
        .with_batch_size(config.batch_size);
    if config.no_cache {
        return Ok(Arc::new(http));
    }

    let cached = match &config.cache_dir {
        Some(dir) => CachedWikiClient::with_dir(http, dir.clone(), config.cache_ttl).await?,
        None => CachedWikiClient::new(http, config.cache_ttl).await?,
    };
    Ok(Arc::new(cached))
}

/// Descends from the configured root and delivers the collected pages.
async fn run(config: TraversalConfig) -> Result<(), AppError> {
    log::info!(
        "Descending into {} on {}",
        config.root,
        config.api_url.host()
    );

    let repo = connect(&config).await?;
    let mut traverser = CategoryTraverser::new(repo);
    traverser.add_callback(TraversalEvent::CategoryVisited, |category, parent| {
        log::info!("Entering {} (from {})", category, parent);
        Ok(())
    });
    traverser.add_callback(TraversalEvent::PageVisited, |page, parent| {
        log::debug!("Collected {} (in {})", page, parent);
        Ok(())
    });

    let pages = traverser.descend(&config.root).await?;
    log::info!("Collected {} pages under {}", pages.len(), config.root);

    let rendered = render_pages(&config.root, &pages, config.format)?;
    let report = deliver(DeliveryTarget::for_destination(
        config.output_file.clone(),
        rendered,
    ))?;

    if let Some(path) = &report.path {
        eprintln!("✓ {} pages saved to {}", pages.len(), path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = match TraversalConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(config).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
