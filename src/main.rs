//! Command-line driver for the URL shortener core.
//!
//! Builds an in-memory store, feeds it the given URLs and runs one
//! operation against it. Everything lives for the duration of the process.
//!
//! # Usage
//!
//! ```bash
//! # Shorten URLs given as arguments
//! url-shortener shorten https://example.com https://www.youtube.com/watch?v=1
//!
//! # Domain metrics for a file of URLs, one per line
//! url-shortener metrics --input urls.txt --limit 5
//!
//! # Shorten from stdin, count two visits and print the record
//! cat urls.txt | url-shortener resolve 5dudJe1 --input - --visits 2
//! ```
//!
//! # Environment Variables
//!
//! See [`url_shortener_core::config`]. A `.env` file is loaded when present.
//!
//! Logs go to stderr; command output goes to stdout.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use url_shortener_core::config::{self, Config};
use url_shortener_core::domain::entities::{MAX_LONG_URL_LENGTH, UrlRecord};
use url_shortener_core::infrastructure::persistence::InMemoryUrlRepository;
use url_shortener_core::ShortenerService;

type Service = ShortenerService<InMemoryUrlRepository>;

/// Hash-based URL shortener.
#[derive(Parser)]
#[command(name = "url-shortener")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the URLs to load come from.
#[derive(Args)]
struct InputArgs {
    /// URLs to shorten
    urls: Vec<String>,

    /// File with one URL per line (`-` for stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten URLs and print their codes
    Shorten {
        #[command(flatten)]
        inputs: InputArgs,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Shorten URLs and print the most shortened domains
    Metrics {
        #[command(flatten)]
        inputs: InputArgs,

        /// Number of domains to show (default: TOP_DOMAINS_LIMIT)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the ranking as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Shorten URLs, then look up a code
    Resolve {
        /// Short code to look up
        code: String,

        #[command(flatten)]
        inputs: InputArgs,

        /// Number of accesses to record before the lookup
        #[arg(long, default_value_t = 0)]
        visits: u64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    let repository = match config.store_max_records {
        Some(limit) => InMemoryUrlRepository::with_capacity_limit(limit),
        None => InMemoryUrlRepository::new(),
    };
    let service = ShortenerService::from_config(Arc::new(repository), &config);

    match cli.command {
        Commands::Shorten { inputs, json } => {
            let records = load_urls(&service, &inputs).await?;
            print_records(&service, &records, json);
        }
        Commands::Metrics {
            inputs,
            limit,
            json,
        } => {
            load_urls(&service, &inputs).await?;
            print_metrics(&service, limit, json).await?;
        }
        Commands::Resolve {
            code,
            inputs,
            visits,
        } => {
            load_urls(&service, &inputs).await?;
            return resolve_code(&service, &code, visits).await;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Installs the global subscriber, writing to stderr in text or JSON.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Collects URLs from arguments and the optional input file, then shortens them in order.
///
/// URLs longer than [`MAX_LONG_URL_LENGTH`] are skipped with a warning.
async fn load_urls(service: &Service, inputs: &InputArgs) -> Result<Vec<UrlRecord>> {
    let mut urls = inputs.urls.clone();

    if let Some(path) = &inputs.input {
        let contents = read_input(path).await?;
        urls.extend(parse_url_lines(&contents));
    }

    let mut records = Vec::with_capacity(urls.len());

    for url in urls {
        if url.len() > MAX_LONG_URL_LENGTH {
            tracing::warn!(
                length = url.len(),
                max = MAX_LONG_URL_LENGTH,
                "Skipping URL over length limit"
            );
            continue;
        }

        let record = service
            .shorten(&url)
            .await
            .with_context(|| format!("Failed to shorten '{url}'"))?;
        records.push(record);
    }

    tracing::info!(
        loaded = records.len(),
        stored = service.record_count().await?,
        "Input processed"
    );

    Ok(records)
}

async fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut contents = String::new();
        tokio::io::stdin()
            .read_to_string(&mut contents)
            .await
            .context("Failed to read URLs from stdin")?;
        return Ok(contents);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Splits input into URLs, skipping blank lines and `#` comments.
fn parse_url_lines(contents: &str) -> impl Iterator<Item = String> + '_ {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

fn print_records(service: &Service, records: &[UrlRecord], json: bool) {
    if json {
        for record in records {
            let line = serde_json::json!({
                "code": record.short_code,
                "shortUrl": service.short_url(&record.short_code),
                "longUrl": record.long_url,
            });
            println!("{line}");
        }
        return;
    }

    if records.is_empty() {
        println!("{}", "No URLs given".yellow());
        return;
    }

    for record in records {
        println!(
            "{}  {}  {}",
            record.short_code.bright_yellow().bold(),
            service.short_url(&record.short_code).cyan(),
            record.long_url.bright_black()
        );
    }
}

async fn print_metrics(service: &Service, limit: Option<usize>, json: bool) -> Result<()> {
    let ranked = match limit {
        Some(limit) => service.top_domains(limit).await?,
        None => service.top_domains_default().await?,
    };

    if json {
        println!("{}", serde_json::to_string(&ranked)?);
        return Ok(());
    }

    println!("{}", "Top domains".bright_blue().bold());
    println!();

    if ranked.is_empty() {
        println!("{}", "  No domains recorded".yellow());
        return Ok(());
    }

    for (rank, entry) in ranked.iter().enumerate() {
        println!(
            "  {:>2}. {:<40} {}",
            (rank + 1).to_string().bright_black(),
            entry.domain.cyan(),
            entry.count.to_string().bright_white().bold()
        );
    }

    Ok(())
}

async fn resolve_code(service: &Service, code: &str, visits: u64) -> Result<ExitCode> {
    for _ in 0..visits {
        service.record_access(code).await?;
    }

    let Some(record) = service.resolve(code).await? else {
        eprintln!("{} {}", "Short code not found:".red(), code.bright_white());
        return Ok(ExitCode::FAILURE);
    };

    println!("  Code:     {}", record.short_code.bright_yellow().bold());
    println!("  Short:    {}", service.short_url(&record.short_code).cyan());
    println!("  Long URL: {}", record.long_url);
    println!(
        "  Created:  {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Accesses: {}",
        record.access_count.to_string().bright_white().bold()
    );

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_lines_skips_blanks_and_comments() {
        let input = "https://a.com\n\n# comment\n  https://b.com  \n\t\n";

        let urls: Vec<String> = parse_url_lines(input).collect();

        assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_cli_parses_resolve_with_inputs() {
        let cli = Cli::try_parse_from([
            "url-shortener",
            "resolve",
            "5dudJe1",
            "https://example.com",
            "--visits",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve {
                code,
                inputs,
                visits,
            } => {
                assert_eq!(code, "5dudJe1");
                assert_eq!(inputs.urls, vec!["https://example.com"]);
                assert_eq!(visits, 3);
            }
            _ => panic!("expected resolve command"),
        }
    }

    #[test]
    fn test_cli_metrics_limit_is_optional() {
        let cli = Cli::try_parse_from(["url-shortener", "metrics", "--input", "-"]).unwrap();

        match cli.command {
            Commands::Metrics { inputs, limit, json } => {
                assert!(inputs.urls.is_empty());
                assert_eq!(inputs.input, Some(PathBuf::from("-")));
                assert!(limit.is_none());
                assert!(!json);
            }
            _ => panic!("expected metrics command"),
        }
    }

    #[tokio::test]
    async fn test_load_urls_skips_overlong_urls() {
        let service = ShortenerService::new(
            Arc::new(InMemoryUrlRepository::new()),
            Default::default(),
        );
        let inputs = InputArgs {
            urls: vec![
                "https://example.com".to_string(),
                format!("https://example.com/{}", "a".repeat(MAX_LONG_URL_LENGTH)),
            ],
            input: None,
        };

        let records = load_urls(&service, &inputs).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].short_code, "5dudJe1");
    }
}
