//! CLI commands implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{self, Settings};
use crate::extraction::{self, RuleSet};
use crate::models::{LineItem, ParseResult, PriceRequest, PricingSource};
use crate::pricing;
use crate::questions;
use crate::server;

#[derive(Parser)]
#[command(name = "estimark")]
#[command(about = "Repair estimating engine: scope extraction, pricing, and cost math")]
#[command(version)]
pub struct Cli {
    /// Trade rules file (TOML); defaults to the built-in rule table
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the estimating HTTP service
    Serve {
        /// Bind address: port, host, or host:port
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Extract candidate repair tasks from a parsed document
    Extract {
        /// Text file with one document page per line
        file: PathBuf,
    },

    /// Resolve a unit price for an item key
    Price {
        /// Item key to price
        #[arg(long)]
        item_key: String,
        /// Project ZIP code
        #[arg(long)]
        zip: Option<String>,
        /// Unit of measure
        #[arg(long)]
        unit: Option<String>,
        /// Pricing source as NAME=URL (repeatable; defaults to PRICING_SOURCE_URLS)
        #[arg(long = "source")]
        sources: Vec<String>,
        /// Skip the seed rate card and go straight to scraping
        #[arg(long)]
        no_seed: bool,
    },
}

/// Parse CLI arguments and dispatch.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing::debug!("verbose output enabled");
    }
    let settings = Settings::from_env();
    let rules = config::load_rules(cli.rules.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => cmd_serve(settings, rules, &bind).await,
        Commands::Extract { file } => cmd_extract(&file, &rules),
        Commands::Price {
            item_key,
            zip,
            unit,
            sources,
            no_seed,
        } => cmd_price(&settings, &item_key, zip, unit, &sources, no_seed).await,
    }
}

/// Start the web server.
async fn cmd_serve(settings: Settings, rules: RuleSet, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind, settings.port)?;

    println!(
        "{} Starting estimark server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    server::serve(settings, rules, &host, port).await
}

/// Extract tasks from a page-per-line text file and print the results.
fn cmd_extract(file: &Path, rules: &RuleSet) -> anyhow::Result<()> {
    if rules.is_empty() {
        println!("{} Rule table is empty, nothing can match", style("!").yellow());
    }

    let raw = std::fs::read_to_string(file)?;
    let parsed = ParseResult::from_pages(raw.lines().map(str::to_string));

    let tasks = extraction::extract_tasks(&parsed.parsed_text, &parsed.page_map, rules);

    // Fresh extraction has no recorded answers yet; totals stay null until
    // quantities and prices come back.
    let answers = HashMap::new();
    let mut line_items = Vec::new();
    for task in &tasks {
        let item = LineItem::from_task(task);
        let mut value = serde_json::to_value(&item)?;
        value["total_cost"] = serde_json::to_value(item.total())?;
        line_items.push(value);
    }

    let mut question_list = questions::global_questions();
    for task in &tasks {
        question_list.extend(questions::build_questions(&task.missing_fields));
    }
    question_list.retain(|question| questions::is_visible(question, &answers));

    println!(
        "{} Extracted {} tasks across {} pages",
        style("✓").green(),
        tasks.len(),
        parsed.pages.len()
    );
    let report = serde_json::json!({
        "tasks": tasks,
        "line_items": line_items,
        "questions": question_list,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Resolve a price: seed rate card first, scraped sources second.
async fn cmd_price(
    settings: &Settings,
    item_key: &str,
    zip: Option<String>,
    unit: Option<String>,
    source_args: &[String],
    no_seed: bool,
) -> anyhow::Result<()> {
    if !no_seed {
        if let Some(result) = pricing::seed_price(item_key) {
            println!("{} Priced from seed rate card", style("✓").green());
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }
    }

    let sources: Vec<PricingSource> = source_args.iter().map(|arg| parse_source_arg(arg)).collect();
    let request = PriceRequest {
        item_key: Some(item_key.to_string()),
        location_zip: zip,
        unit,
        sources: if sources.is_empty() {
            None
        } else {
            Some(sources)
        },
    };

    let client = pricing::build_client(settings);
    let result = pricing::resolve_price(&request, &settings.pricing_sources, &client).await;

    if result.is_error() {
        println!("{} No price resolved", style("✗").red());
    } else {
        println!("{} Price resolved", style("✓").green());
    }
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Parse a `NAME=URL` source argument; a bare URL becomes an unnamed source.
fn parse_source_arg(arg: &str) -> PricingSource {
    match arg.split_once('=') {
        Some((name, url)) if !name.contains("://") => PricingSource {
            source_name: Some(name.to_string()),
            source_url: Some(url.to_string()),
        },
        _ => PricingSource {
            source_name: None,
            source_url: Some(arg.to_string()),
        },
    }
}

/// Parse a bind address that can be:
/// - Just a port: "8787" -> 127.0.0.1:8787
/// - Just a host: "0.0.0.0" -> 0.0.0.0:<default>
/// - Host and port: "0.0.0.0:8787" -> 0.0.0.0:8787
fn parse_bind_address(bind: &str, default_port: u16) -> anyhow::Result<(String, u16)> {
    // Try parsing as just a port number
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    // Try parsing as host:port
    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    // Must be just a host, use the configured port
    Ok((bind.to_string(), default_port))
}
