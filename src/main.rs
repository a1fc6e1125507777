use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use stockstats::analysis::{analyze, analyze_file};
use stockstats::report::{render_json, OutputFormat, TextReport};
use stockstats::synthetic::{MarketScenario, SyntheticSeries};
use stockstats::{DailyRecord, ScanBoundary, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stockstats", version)]
#[command(about = "Price range, volume dispersion and best/worst periods for daily stock data")]
struct Cli {
    /// Config file (./stockstats.toml is picked up when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Window boundary convention
    #[arg(long, global = true, value_enum)]
    boundary: Option<ScanBoundary>,

    /// Short window length in days
    #[arg(long, global = true)]
    short: Option<usize>,

    /// Long window length in days
    #[arg(long, global = true)]
    long: Option<usize>,

    /// Print numbers without thousands separators
    #[arg(long, global = true)]
    no_grouping: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV file with Date,Open,High,Low,Close,Volume columns
    Analyze {
        file: PathBuf,

        /// Reject rows with inconsistent OHLC values instead of warning
        #[arg(long)]
        strict: bool,
    },
    /// Analyze a seeded synthetic series
    Demo {
        #[arg(long, value_enum, default_value = "uptrend")]
        scenario: MarketScenario,

        #[arg(long, default_value_t = 252)]
        days: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli)?;

    let analysis = match &cli.command {
        Commands::Analyze { file, strict } => {
            settings.ingest.strict_ohlc |= *strict;
            analyze_file(file, &settings)
                .with_context(|| format!("Failed to analyze {}", file.display()))?
        }
        Commands::Demo {
            scenario,
            days,
            seed,
        } => {
            let symbol = format!("SYNTH-{:?}", scenario);
            let records = demo_series(*scenario, *days, *seed)?;
            analyze(symbol, &records, &settings)
                .context("Failed to compute statistics for the demo series")?
        }
    };
    let (symbol, stats) = (analysis.symbol, analysis.stats);

    match settings.report.format {
        OutputFormat::Text => {
            let report = TextReport {
                symbol: &symbol,
                stats: &stats,
                short_length: settings.windows.short,
                long_length: settings.windows.long,
                group_thousands: settings.report.group_thousands,
            };
            print!("{}", report);
        }
        OutputFormat::Json => {
            println!("{}", render_json(&symbol, &stats)?);
        }
    }

    Ok(())
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stockstats=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Files and environment first, then command-line flags on top
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(format) = cli.format {
        settings.report.format = format;
    }
    if let Some(boundary) = cli.boundary {
        settings.windows.boundary = boundary;
    }
    if let Some(short) = cli.short {
        settings.windows.short = short;
    }
    if let Some(long) = cli.long {
        settings.windows.long = long;
    }
    if cli.no_grouping {
        settings.report.group_thousands = false;
    }

    settings.validate()?;
    tracing::debug!("Settings: {:?}", settings);
    Ok(settings)
}

fn demo_series(
    scenario: MarketScenario,
    days: usize,
    seed: u64,
) -> anyhow::Result<Vec<DailyRecord>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).context("invalid demo start date")?;
    Ok(SyntheticSeries::new(seed).generate(scenario, days, start))
}
