//! Strand CLI: run the asynchronous 1D automaton until the colony starves
//! or overcrowds.
//!
//! Each update of any cell publishes a snapshot frame of the whole colony;
//! the printer below drains those frames to stdout until the run ends.

use anyhow::Result;
use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use strand_kernel::{SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "strand")]
#[command(version)]
#[command(about = "Asynchronous one-dimensional Game of Life")]
struct Cli {
    /// Number of cells in the colony
    #[arg(long, default_value = "10")]
    cells: usize,

    /// Probability that a cell is seeded alive
    #[arg(long = "alive-prob", default_value = "0.1")]
    alive_probability: f64,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound for the random per-cycle pause, in milliseconds
    #[arg(long, default_value = "1000")]
    max_pause_ms: u64,

    /// Suppress the live snapshot printer
    #[arg(short, long)]
    quiet: bool,

    /// Print the final run report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let config = SimConfig {
        cells: cli.cells,
        alive_probability: cli.alive_probability,
        max_pause_ms: cli.max_pause_ms,
        seed: cli.seed,
        ..Default::default()
    };

    let sim = Simulation::new(config)?;

    // Attach the printer before launching so no early frame is missed.
    let printer = if cli.quiet {
        None
    } else {
        let mut events = sim.subscribe();
        Some(tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => println!("[{:>2}] {}", event.cell, event.frame),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "printer fell behind, dropping oldest frames");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }))
    };

    let report = sim.run().await?;

    // The bus closes when the run ends, which terminates the printer.
    if let Some(printer) = printer {
        printer.await?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", report.verdict);
        println!("final: {}", report.final_frame());
        println!("updates: {}", report.total_updates);
    }

    Ok(())
}
