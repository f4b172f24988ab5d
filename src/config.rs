// src/config.rs
use crate::constants::{MAX_MEMBER_BATCH_SIZE, MIN_MEMBER_BATCH_SIZE};
use crate::error::AppError;
use crate::output::OutputFormat;
use crate::types::{ApiUrl, Page, UserAgent, ValidationError};
use clap::Parser;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Category to descend into, with or without the "Category:" prefix
    pub category: String,

    /// The wiki's api.php endpoint, or its site URL (e.g. "https://en.wikipedia.org")
    #[arg(long, env = "WIKI_API_URL")]
    pub api_url: Option<String>,

    /// User-Agent sent with every request; should name you and a contact
    #[arg(long, env = "WIKI_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Output file for the page list (stdout when omitted)
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Output format for the page list
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable response caching (always query the wiki)
    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    /// Cache TTL in seconds (default: 3600 = 1 hour)
    #[arg(long, default_value_t = 3600)]
    pub cache_ttl: u64,

    /// Directory for cached responses (defaults to $XDG_CACHE_HOME/catwalk)
    #[arg(long)]
    pub cache_dir: Option<String>,

    /// Category members requested per API call (server maximum when omitted)
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Resolved configuration, validated and ready to drive a traversal.
#[derive(Debug, Clone)]
pub struct TraversalConfig {
    pub root: Page,
    pub api_url: ApiUrl,
    pub user_agent: UserAgent,
    pub output_file: Option<PathBuf>,
    pub format: OutputFormat,
    pub verbose: bool,
    pub no_cache: bool,
    pub cache_ttl: u64,
    pub cache_dir: Option<PathBuf>,
    pub batch_size: Option<u32>,
}

impl TraversalConfig {
    /// Resolves a complete configuration from CLI input (clap has already
    /// folded in the environment variables).
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_url = cli.api_url.ok_or_else(|| {
            AppError::MissingConfiguration(
                "no API endpoint: pass --api-url or set WIKI_API_URL".to_string(),
            )
        })?;

        let user_agent = match cli.user_agent {
            Some(agent) => UserAgent::new(agent)?,
            None => UserAgent::default(),
        };

        let batch_size = cli.limit.map(validate_batch_size).transpose()?;

        Ok(TraversalConfig {
            root: Page::category(&cli.category)?,
            api_url: ApiUrl::parse(&api_url)?,
            user_agent,
            output_file: cli.output_file.map(PathBuf::from),
            format: cli.format,
            verbose: cli.verbose,
            no_cache: cli.no_cache,
            cache_ttl: cli.cache_ttl,
            cache_dir: cli.cache_dir.map(PathBuf::from),
            batch_size,
        })
    }
}

fn validate_batch_size(value: u32) -> Result<u32, ValidationError> {
    if (MIN_MEMBER_BATCH_SIZE..=MAX_MEMBER_BATCH_SIZE).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfBounds {
            value,
            min: MIN_MEMBER_BATCH_SIZE,
            max: MAX_MEMBER_BATCH_SIZE,
        })
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            root: Page::category("Contents").expect("Default root category should be valid"),
            api_url: ApiUrl::parse("https://en.wikipedia.org/w/api.php")
                .expect("Default API URL should be valid"),
            user_agent: UserAgent::default(),
            output_file: None,
            format: OutputFormat::Text,
            verbose: false,
            no_cache: false,
            cache_ttl: 3600,
            cache_dir: None,
            batch_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::parse_from(std::iter::once("catwalk").chain(args.iter().copied()))
    }

    #[test]
    fn test_resolve_from_flags() {
        let cli = parse(&[
            "Physics",
            "--api-url",
            "https://en.wikipedia.org",
            "--user-agent",
            "physbot/0.1 (ops@example.org)",
            "--format",
            "json",
            "--no-cache",
        ]);
        let config = TraversalConfig::resolve(cli).unwrap();

        assert_eq!(config.root.title().as_str(), "Category:Physics");
        assert_eq!(config.api_url.as_str(), "https://en.wikipedia.org/w/api.php");
        assert_eq!(config.user_agent.as_str(), "physbot/0.1 (ops@example.org)");
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.no_cache);
        assert_eq!(config.cache_ttl, 3600);
    }

    #[test]
    fn test_invalid_category_is_rejected() {
        let cli = parse(&["Bad|Name", "--api-url", "https://wiki.example.org"]);
        assert!(matches!(
            TraversalConfig::resolve(cli),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_limit_bounds() {
        let cli = parse(&["A", "--api-url", "https://wiki.example.org", "--limit", "50"]);
        assert_eq!(TraversalConfig::resolve(cli).unwrap().batch_size, Some(50));

        let cli = parse(&["A", "--api-url", "https://wiki.example.org", "--limit", "0"]);
        let err = TraversalConfig::resolve(cli).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value out of bounds: 0, expected 1..=5000"
        );
    }

    #[test]
    fn test_default_config() {
        let config = TraversalConfig::default();
        assert_eq!(config.root.title().as_str(), "Category:Contents");
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.output_file.is_none());
    }
}
