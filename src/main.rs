use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use proxy_sweep::proxy::{report, ProxyCategory, ProxyChecker, ProxyLoader, SourceRegistry};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// A proxy list downloader and checker with concurrent verification
#[derive(Parser)]
#[command(name = "proxy-sweep")]
#[command(about = "A proxy list downloader and checker with concurrent verification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download, deduplicate and check proxies for a category
    Check {
        /// Proxy category (http, https, socks4, socks5)
        #[arg(short = 't', long, default_value = "http")]
        category: String,
        /// Maximum number of candidates to check after deduplication
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output file for working proxies (prints to console when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the configured source URLs for a category
    Sources {
        /// Proxy category (http, https, socks4, socks5)
        #[arg(short = 't', long, default_value = "http")]
        category: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            category,
            limit,
            output,
        } => {
            let category = parse_category(&category)?;

            println!("Loading {} proxies...", category);
            let loader = ProxyLoader::new()?;
            let mut candidates = loader.load(category).await;

            if candidates.is_empty() {
                println!("No proxies loaded from sources.");
                return Ok(());
            }

            if let Some(limit) = limit {
                candidates.truncate(limit);
            }
            println!("Loaded {} proxies", candidates.len());

            println!("Checking {} proxies...", category);
            let checker = ProxyChecker::new();
            let working = checker.check_all_working(candidates, category).await;

            println!("Found {} working proxies", working.len());

            match output {
                Some(path) => {
                    report::save_to_file(&working, &path)?;
                    println!("Saved results to {:?}", path);
                }
                None => report::print_to_console(&working),
            }
        }
        Commands::Sources { category } => {
            let category = parse_category(&category)?;
            for url in SourceRegistry::default().urls(category) {
                println!("{}", url);
            }
        }
    }

    Ok(())
}

fn parse_category(s: &str) -> Result<ProxyCategory> {
    match s.to_lowercase().as_str() {
        "http" => Ok(ProxyCategory::Http),
        "https" => Ok(ProxyCategory::Https),
        "socks4" => Ok(ProxyCategory::Socks4),
        "socks5" => Ok(ProxyCategory::Socks5),
        _ => Err(anyhow!(
            "Invalid proxy category: {}. Use: http, https, socks4, socks5",
            s
        )),
    }
}
