//! Linkscout command line: find internal linking opportunities for a URL.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use dataforseo_client::DataForSeoClient;
use gemini_client::GeminiClient;
use linkscout::{
    Credentials, DataForSeoSearcher, FindReport, FinderConfig, FinderObserver,
    GeminiAnchorExtractor, HttpFetcher, LinkFinder, RetryPolicy, SearcherExt, SharedRateLimiter,
    Stage,
};

#[derive(Parser)]
#[command(name = "linkscout", version, about = "Suggest internal links for a web page")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show detailed progress information
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Find internal linking opportunities for a URL
    Find {
        /// The page to analyze
        url: String,

        /// Anchor-text candidates to request from the model
        #[arg(short = 'k', long)]
        max_keywords: Option<usize>,

        /// Search depth per keyword
        #[arg(short, long)]
        depth: Option<u32>,
    },

    /// Show DataForSEO account balance and limits
    Balance,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Find {
            url,
            max_keywords,
            depth,
        } => run_find(&url, max_keywords, depth).await,
        Command::Balance => run_balance().await,
    }
}

async fn run_find(url: &str, max_keywords: Option<usize>, depth: Option<u32>) -> Result<()> {
    let credentials = Credentials::from_env()
        .context("credentials missing; set them in the environment or a .env file")?;

    let mut config = FinderConfig::from_env();
    if let Some(max) = max_keywords {
        config = config.with_max_keywords(max);
    }
    if let Some(depth) = depth {
        config = config.with_search_depth(depth);
    }

    let client = DataForSeoClient::new(
        credentials.dataforseo_login.expose(),
        credentials.dataforseo_password.expose(),
    )?;
    let gemini = GeminiClient::new(credentials.gemini_api_key.expose())?;

    let limiter = SharedRateLimiter::per_minute(config.rate_limit_per_minute);
    let searcher = DataForSeoSearcher::from_config(client, &config)
        .retrying(RetryPolicy::from_config(&config))
        .rate_limited(limiter);

    let fetcher = HttpFetcher::new().with_timeout(config.fetch_timeout);
    let extractor = GeminiAnchorExtractor::new(gemini);

    println!();
    println!("{} {}", "Analyzing:".bold(), url.cyan());
    println!();

    let finder = LinkFinder::new(fetcher, extractor, searcher)
        .with_config(config)
        .with_observer(Arc::new(ConsoleObserver));

    let report = finder.find_opportunities(url).await?;
    print_report(&report);

    Ok(())
}

async fn run_balance() -> Result<()> {
    let credentials = Credentials::from_env()
        .context("credentials missing; set them in the environment or a .env file")?;

    let client = DataForSeoClient::new(
        credentials.dataforseo_login.expose(),
        credentials.dataforseo_password.expose(),
    )?;

    let data = client.user_data().await?;

    if let Some(account) = data.pointer("/tasks/0/result/0") {
        if let Some(login) = account.pointer("/login").and_then(|v| v.as_str()) {
            println!("{} {}", "Account:".bold(), login);
        }
        if let Some(balance) = account.pointer("/money/balance").and_then(|v| v.as_f64()) {
            println!("{} ${:.2}", "Balance:".bold(), balance);
        }
        if let Some(limit) = account
            .pointer("/rates/minute/limit")
            .and_then(|v| v.as_u64())
        {
            println!("{} {}/minute", "Rate limit:".bold(), limit);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }

    Ok(())
}

/// Observer that narrates progress on stderr.
struct ConsoleObserver;

impl FinderObserver for ConsoleObserver {
    fn on_status(&self, stage: Stage) {
        eprintln!("{}", stage.message().dimmed());
    }

    fn on_keyword(&self, current: usize, total: usize, anchor_text: &str) {
        eprintln!(
            "  {} {}",
            format!("[{current}/{total}]").dimmed(),
            anchor_text
        );
    }
}

fn print_report(report: &FindReport) {
    println!();

    if report.suggestions.is_empty() {
        println!("{}", "No suggestions found.".yellow());
    }

    for suggestion in &report.suggestions {
        println!(
            "{} {}",
            suggestion.anchor_text.green().bold(),
            format!("(relevance {:.2})", suggestion.relevance_score).dimmed()
        );
        if !suggestion.reasoning.is_empty() {
            println!("  {}", suggestion.reasoning.dimmed());
        }

        if suggestion.target_urls.is_empty() {
            println!("  {}", "no target pages found".yellow());
        }
        for target in &suggestion.target_urls {
            println!("  {} {} ({})", "->".blue(), target.url, target.title);
        }
        println!();
    }

    println!(
        "{} {} suggestions, {} target URLs",
        "Done:".bold(),
        report.suggestions.len(),
        report.target_count()
    );

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Warnings:".yellow().bold());
        for error in &report.errors {
            println!("  {} {}", "!".yellow(), error);
        }
    }
}
