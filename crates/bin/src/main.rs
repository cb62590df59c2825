//! Broome CLI binary.
//!
//! Runs the QVM ranking pipeline and the rebalance diff from CSV inputs on
//! behalf of a host scheduler.

mod input;

use std::path::PathBuf;
use std::process;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;

use broome::{Pipeline, PipelineConfig};
use broome_output::export::{ExportFormat, export_instructions};
use broome_output::{DailyRecord, RebalanceSummary};

use input::{positions_from_csv, snapshot_from_csv};

#[derive(Parser)]
#[command(name = "broome")]
#[command(about = "Broome: QVM equity ranking and rebalancing engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen and rank a snapshot
    Rank {
        /// Snapshot CSV path
        snapshot: PathBuf,

        /// Number of names in the long selection
        #[arg(long, default_value_t = 10)]
        top_n: usize,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Diff the long selection against the current positions book
    Rebalance {
        /// Snapshot CSV path
        snapshot: PathBuf,

        /// Positions CSV path (symbol, weight, optional tradable flag)
        positions: PathBuf,

        /// Rebalance date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Number of names in the long selection
        #[arg(long, default_value_t = 10)]
        top_n: usize,

        /// Target weight per selected name
        #[arg(long, default_value_t = 0.1)]
        weight: f64,

        /// Write instructions to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Instruction export format (csv, json or pretty-json)
        #[arg(long, default_value = "csv")]
        format: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            snapshot,
            top_n,
            format,
        } => {
            let frame = snapshot_from_csv(&snapshot)?;
            let pipeline = Pipeline::new(PipelineConfig {
                top_n,
                ..PipelineConfig::default()
            });
            let output = pipeline.run(&frame)?;

            match format.as_str() {
                "json" => {
                    let payload = json!({
                        "universe_size": output.mask.len(),
                        "ranks": output.ranks,
                        "longs": output.longs,
                        "quantiles": output.quantiles,
                    });
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                }
                _ => print_rank_table(&output),
            }
        }

        Commands::Rebalance {
            snapshot,
            positions,
            date,
            top_n,
            weight,
            output,
            format,
        } => {
            let frame = snapshot_from_csv(&snapshot)?;
            let book = positions_from_csv(&positions)?;
            let date = date.unwrap_or_else(|| Utc::now().date_naive());

            let pipeline = Pipeline::new(PipelineConfig {
                top_n,
                weight_per_name: weight,
                ..PipelineConfig::default()
            });
            let result = pipeline.run(&frame)?;
            let outcome = pipeline.rebalance(&result.longs, &book.positions, |s| {
                book.tradable(s)
            });

            let summary = RebalanceSummary::new(date, weight, &outcome);
            println!("{}", summary.to_ascii_table());

            let held = outcome.num_opens()
                + outcome.report.already_held.len()
                + outcome.report.held_untradeable.len();
            println!("{}", DailyRecord::new(date, held));

            if let Some(path) = output {
                let format = parse_export_format(&format)?;
                export_instructions(&outcome.instructions, &path, format)?;
                println!("Wrote {} instructions to {}", outcome.instructions.len(), path.display());
            }
        }
    }

    Ok(())
}

fn parse_export_format(format: &str) -> Result<ExportFormat, String> {
    match format {
        "csv" => Ok(ExportFormat::Csv),
        "json" => Ok(ExportFormat::Json),
        "pretty-json" => Ok(ExportFormat::PrettyJson),
        other => Err(format!(
            "unknown export format '{}' (expected csv, json or pretty-json)",
            other
        )),
    }
}

fn print_rank_table(output: &broome::PipelineOutput) {
    println!(
        "{:<10} {:>8} {:>8} {:>8} {:>8}  {}",
        "Symbol", "Quality", "Value", "Momentum", "QVM", "Long"
    );
    println!("{}", "-".repeat(56));

    // Best composite first; ascending symbol as the tie-break, matching
    // selection order.
    let mut rows: Vec<(&str, f64)> = output.ranks.composite.iter().collect();
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    for (symbol, qvm) in rows {
        let fmt_rank = |rank: Option<f64>| match rank {
            Some(r) => format!("{:.1}", r),
            None => "-".to_string(),
        };
        println!(
            "{:<10} {:>8} {:>8} {:>8} {:>8}  {}",
            symbol,
            fmt_rank(output.ranks.quality.get(symbol)),
            fmt_rank(output.ranks.value.get(symbol)),
            fmt_rank(output.ranks.momentum.get(symbol)),
            format!("{:.1}", qvm),
            if output.longs.contains(symbol) { "*" } else { "" },
        );
    }
    println!(
        "\n{} in universe, {} ranked, {} selected",
        output.mask.len(),
        output.ranks.composite.len(),
        output.longs.len()
    );
}
