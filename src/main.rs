//! cbexpensive - detect expensive Carbon Black EDR watchlists.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cbexpensive::report;
use cbexpensive::{scan, Config, CostIndicators, ScanOptions, WatchlistClient};

const BANNER: &str = r"
  ______  ______   _______                                    _
 / _____)(____  \ (_______)                                  (_)
| /       ____)  ) _____    _   _  ____    ____  ____    ___  _  _   _  ____
| |      |  __  ( |  ___)  ( \ / )|  _ \  / _  )|  _ \  /___)| || | | |/ _  )
| \_____ | |__)  )| |_____  ) X ( | | | |( (/ / | | | ||___ || | \ V /( (/ /
 \______)|______/ |_______)(_/ \_)| ||_/  \____)|_| |_|(___/ |_|  \_/  \____)
                                  |_|
";

/// Find the watchlists that burn the most backend time.
#[derive(Parser, Debug)]
#[command(
    name = "cbexpensive",
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    scan: ScanArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch every watchlist and write the CSV report (default)
    Scan(ScanArgs),
    /// Score a single query offline and print its indicators
    Classify {
        /// Query text, as it would appear in the watchlist
        query: String,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
struct ScanArgs {
    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report path (default: <output_dir>/<prefix><timestamp>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only report enabled watchlists
    #[arg(long)]
    enabled_only: bool,

    /// Do not print the banner
    #[arg(long)]
    no_banner: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Classify { query }) => {
            classify(&query);
            Ok(())
        }
        Some(Commands::Scan(args)) => run_scan(&args),
        None => run_scan(&cli.scan),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn classify(query: &str) {
    let cost = CostIndicators::classify(query);
    println!("query:                {query}");
    println!("wildcards:            {}", cost.wildcard_count);
    println!("filemod wildcard:     {}", cost.has_filemod_wildcard);
    println!("modload wildcard:     {}", cost.has_modload_wildcard);
    println!("equal operator:       {}", cost.has_equality_operator);
    println!("OR operators:         {}", cost.or_operator_count);
}

fn run_scan(args: &ScanArgs) -> Result<()> {
    if !args.no_banner {
        println!("{BANNER}");
    }

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let client = WatchlistClient::new(&config.api).context("Failed to build HTTP client")?;

    let path = match &args.output {
        Some(path) => path.clone(),
        None => report::default_report_path(
            &config.output_dir(),
            &config.report.filename_prefix,
            &chrono::Local::now(),
        ),
    };
    let options = ScanOptions {
        enabled_only: args.enabled_only,
    };

    let summary = scan::run(&client, options, || report::create_report_file(&path))
        .with_context(|| {
            format!(
                "Scan of {} into {} failed",
                client.endpoint(),
                path.display()
            )
        })?;

    tracing::info!(
        "Scanned {} watchlists, reported {}, {} with cost indicators",
        summary.fetched,
        summary.reported,
        summary.flagged
    );
    tracing::info!("Report written to {}", path.display());

    Ok(())
}
