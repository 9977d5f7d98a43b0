use analytics::AnalyticsEngine;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{init_logging, load_config, Config, StrategyOverrides};
use portfolio_backtester::{load_inputs, PortfolioBacktester};
use std::path::{Path, PathBuf};

mod presentation;

/// The main entry point for the prediction backtester.
fn main() -> Result<()> {
    // Optional .env file for RUST_LOG and MOM_* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Inspect(args) => handle_inspect(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Backtests a threshold long/short strategy built from model predictions
/// against a benchmark index.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the strategy and compare its cumulative return with the benchmark.
    Run(RunArgs),
    /// Load and trim the input files and print their shapes.
    Inspect(InspectArgs),
}

#[derive(Parser)]
struct RunArgs {
    /// Path to the configuration file.
    #[arg(long, short, default_value = "config.toml")]
    config: PathBuf,

    #[command(flatten)]
    overrides: StrategyOverrides,

    /// Write the full cumulative curves to this CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the performance report to this JSON file.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Parser)]
struct InspectArgs {
    /// Path to the configuration file.
    #[arg(long, short, default_value = "config.toml")]
    config: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_run(args: RunArgs) -> Result<()> {
    let mut config = load(&args.config)?;
    config
        .apply_overrides(&args.overrides)
        .context("Invalid strategy override")?;
    let _guard = init_logging(&config.logging)?;
    tracing::debug!(path = %args.config.display(), "Configuration loaded");

    let inputs = load_inputs(&config.data).context("Failed to load input data")?;
    let backtester = PortfolioBacktester::new(&config.strategy)?;

    tracing::info!(
        long_threshold = config.strategy.long_threshold,
        short_threshold = config.strategy.short_threshold,
        periods = inputs.returns.n_periods(),
        "Running backtest"
    );
    let result = backtester.run(&inputs)?;

    let strategy_curve = result.cumulative_strategy();
    let benchmark_curve = result.cumulative_benchmark();
    let report = AnalyticsEngine::new().calculate(
        &result.strategy_returns,
        &result.benchmark_returns,
        result.diagnostics,
    )?;

    let label = &config.report.benchmark_label;
    println!(
        "{}",
        presentation::curve_table(
            &inputs.dates,
            &strategy_curve,
            &benchmark_curve,
            config.report.n_ticks,
            label
        )
    );
    println!("{}", presentation::summary_table(&report, label));

    if let Some(path) = &args.csv {
        presentation::write_curves_csv(path, &inputs.dates, &strategy_curve, &benchmark_curve)?;
        tracing::info!(path = %path.display(), "Cumulative curves written");
    }
    if let Some(path) = &args.json {
        presentation::write_report_json(path, &report)?;
        tracing::info!(path = %path.display(), "Performance report written");
    }

    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<()> {
    let config = load(&args.config)?;
    let _guard = init_logging(&config.logging)?;
    tracing::debug!(path = %args.config.display(), "Configuration loaded");

    let inputs = load_inputs(&config.data).context("Failed to load input data")?;

    println!("Trim offset:  {}", config.data.trim_offset);
    println!(
        "Predictions:  {} assets x {} periods x 2 signals",
        inputs.predictions.n_assets(),
        inputs.predictions.n_periods()
    );
    println!(
        "Returns:      {} periods x {} assets",
        inputs.returns.n_periods(),
        inputs.returns.n_assets()
    );
    println!("Benchmark:    {} periods", inputs.benchmark.n_periods());
    println!(
        "Dates:        {} labels ({} .. {})",
        inputs.dates.len(),
        inputs.dates.first().unwrap_or("-"),
        inputs.dates.last().unwrap_or("-")
    );

    Ok(())
}

fn load(path: &Path) -> Result<Config> {
    load_config(path).with_context(|| format!("Failed to load configuration from {}", path.display()))
}
