// src/cli.rs

use crate::error::Result;
use crate::io::histogram;
use crate::io::reporting;
use crate::simulation::config::{SimulationConfig, DEFAULT_REPLICATIONS};
use crate::simulation::engine::RunOutcome;
use crate::simulation::replication::{run_once, run_replications};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "basement-stock")]
#[command(about = "Monte Carlo simulation of a two-level periodic-review inventory")]
pub struct Cli {
    /// Master seed for reproducible runs
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Simulate one run and print its summary
    Run {
        /// Print the day-by-day log
        #[arg(long)]
        log: bool,
        /// Export the day log as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print histogram data for the run
        #[arg(long)]
        histograms: bool,
    },
    /// Run independent replications and average them
    Replicate {
        /// Number of replications
        #[arg(short, long, default_value_t = DEFAULT_REPLICATIONS)]
        count: usize,
    },
    /// Simulate one run and print only its histogram data
    Histograms,
}

impl Cli {
    pub fn into_config(self) -> (SimulationConfig, Commands) {
        let mut config = SimulationConfig {
            seed: self.seed,
            ..SimulationConfig::default()
        };
        match &self.command {
            Commands::Run {
                log,
                csv,
                histograms,
            } => {
                config.show_log = *log;
                config.log_path = csv.as_ref().map(|p| p.display().to_string());
                config.show_histograms = *histograms;
            }
            Commands::Replicate { count } => config.replications = *count,
            Commands::Histograms => config.show_histograms = true,
        }
        (config, self.command)
    }
}

/// Handle the CLI command
///
/// # Errors
/// Returns the simulation or export error that stopped the command.
pub fn handle_command(config: &SimulationConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Run { .. } => single_run(config),
        Commands::Replicate { .. } => replicate(config),
        Commands::Histograms => {
            let outcome = run_once(config.seed)?;
            print_histograms(&outcome);
            Ok(())
        }
    }
}

fn single_run(config: &SimulationConfig) -> Result<()> {
    let outcome = run_once(config.seed)?;
    debug!(
        "Totals: {} units demanded, {} lead-time days over {} orders",
        outcome.summary.total_demand, outcome.summary.total_lead_time, outcome.summary.order_count
    );

    println!("=== Summary of Results ===");
    print!("{}", outcome.summary);

    if config.show_log {
        println!("\n=== Inventory Log ===");
        print!("{}", reporting::format_log_table(&outcome.log));
    }

    if let Some(path) = &config.log_path {
        reporting::write_simulation_log(path, &outcome.log)?;
        println!("\nDay log written to {}", path);
    }

    if config.show_histograms {
        println!();
        print_histograms(&outcome);
    }
    Ok(())
}

fn replicate(config: &SimulationConfig) -> Result<()> {
    let study = run_replications(config.replications, config.seed)?;
    println!("Results from {} Simulations:", study.replications);
    print!("{}", study);
    println!(
        "Range of Average Demand: {:.2} to {:.2}",
        study.min_average_demand, study.max_average_demand
    );
    println!(
        "Range of Average Lead Time: {:.2} to {:.2} days",
        study.min_average_lead_time, study.max_average_lead_time
    );
    Ok(())
}

fn print_histograms(outcome: &RunOutcome) {
    for h in histogram::all(&outcome.log) {
        println!("{}", reporting::format_histogram(&h));
    }
    print!(
        "{}",
        reporting::format_order_frequency(&histogram::order_frequency(&outcome.log))
    );
}
