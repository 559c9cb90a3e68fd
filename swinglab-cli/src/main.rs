//! SwingLab CLI — run a backtest from a CSV bar file.
//!
//! Commands:
//! - `run` — execute one backtest from a TOML config or a named strategy
//!   with default parameters, print a summary, optionally export the trade
//!   tape.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use swinglab_runner::{
    run_backtest_from_csv, write_trades_csv, write_trades_json, BacktestConfig, BacktestResult,
};

#[derive(Parser)]
#[command(
    name = "swinglab",
    about = "SwingLab CLI — daily-bar strategy backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest over a CSV file of daily bars.
    Run {
        /// CSV bar file (header: date,open,high,low,close).
        #[arg(long)]
        data: PathBuf,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Named strategy with default parameters: breakout, trend_following.
        #[arg(long)]
        strategy: Option<String>,

        /// Initial capital (only with --strategy; configs carry their own).
        #[arg(long, default_value_t = 100_000.0)]
        initial_capital: f64,

        /// Directory to write trades.csv and trades.json into.
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            strategy,
            initial_capital,
            export,
        } => run_cmd(data, config, strategy, initial_capital, export),
    }
}

fn run_cmd(
    data: PathBuf,
    config_path: Option<PathBuf>,
    strategy: Option<String>,
    initial_capital: f64,
    export: Option<PathBuf>,
) -> Result<()> {
    if config_path.is_some() && strategy.is_some() {
        bail!("--config and --strategy are mutually exclusive");
    }

    let config = if let Some(path) = config_path {
        BacktestConfig::from_file(&path)?
    } else if let Some(name) = strategy {
        BacktestConfig::with_defaults(&name, initial_capital)?
    } else {
        bail!("one of --config or --strategy is required");
    };

    let result = run_backtest_from_csv(&config, &data)?;
    print_summary(&result);

    if let Some(dir) = export {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create export dir {}", dir.display()))?;
        write_trades_csv(&dir.join("trades.csv"), &result.output.trades)?;
        write_trades_json(&dir.join("trades.json"), &result.output.trades)?;
        println!("Trade tape saved to: {}", dir.display());
    }

    Ok(())
}

fn print_summary(result: &BacktestResult) {
    let out = &result.output;
    let m = &result.metrics;
    println!();
    println!("=== Backtest Result ===");
    println!("Run ID:         {}", &result.run_id[..16]);
    println!("Strategy:       {}", result.strategy.name());
    println!(
        "Bars:           {} ({} warmup)",
        out.historical_data_count, out.warmup_bars
    );
    println!("Trades:         {} closed", m.closing_trades);
    if let Some(pos) = &out.open_position {
        println!(
            "Open position:  {:?} {:.6} @ {:.2} since {}",
            pos.direction, pos.size, pos.entry_price, pos.entry_date
        );
    }
    println!();
    println!("--- Performance ---");
    println!("Total Return:   {:.2}%", m.total_return * 100.0);
    println!("Net Profit:     {:.2}", m.net_profit);
    println!("Max Drawdown:   {:.2}%", m.max_drawdown * 100.0);
    println!("Win Rate:       {:.1}%", m.win_rate * 100.0);
    if m.profit_factor.is_finite() {
        println!("Profit Factor:  {:.2}", m.profit_factor);
    } else {
        println!("Profit Factor:  inf (no losing trades)");
    }
    println!("Winners/Losers: {}/{}", m.winning_trades, m.losing_trades);
    println!("Long/Short:     {}/{}", m.long_trades, m.short_trades);
    println!("Avg Win:        {:.2}", m.average_winner);
    println!("Avg Loss:       {:.2}", m.average_loser);
    println!("Final Equity:   {:.2}", m.final_equity);
    println!("Peak Equity:    {:.2}", m.peak_equity);
    for warning in &out.data_quality_warnings {
        println!("WARNING: {warning}");
    }
    println!();
}
