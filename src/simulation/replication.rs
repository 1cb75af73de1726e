// src/simulation/replication.rs

use crate::error::{Result, SimulationError};
use crate::io::variates::RngDraws;
use crate::simulation::engine::{InventorySimulation, RunOutcome};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Averages across a batch of independent runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSummary {
    pub replications: usize,
    pub mean_average_demand: f64,
    pub mean_average_lead_time: f64,
    pub min_average_demand: f64,
    pub max_average_demand: f64,
    pub min_average_lead_time: f64,
    pub max_average_lead_time: f64,
}

/// Random stream for replication `index`.
///
/// With a master seed every replication reads its own ChaCha stream of that key,
/// so streams never overlap and a study is reproducible. Without one each
/// replication is keyed from OS entropy.
pub fn replication_rng(seed: Option<u64>, index: u64) -> ChaCha8Rng {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    rng.set_stream(index);
    rng
}

/// Runs a single simulation on its own stream.
pub fn run_once(seed: Option<u64>) -> Result<RunOutcome> {
    run_replication(seed, 0)
}

fn run_replication(seed: Option<u64>, index: u64) -> Result<RunOutcome> {
    InventorySimulation::new(RngDraws::new(replication_rng(seed, index))).run()
}

/// Runs `replications` independent simulations and averages their demand and lead time.
///
/// # Errors
/// Returns `NoReplications` when `replications` is 0, before anything runs.
pub fn run_replications(replications: usize, seed: Option<u64>) -> Result<AggregateSummary> {
    if replications == 0 {
        return Err(SimulationError::NoReplications);
    }

    let mut demands = Vec::with_capacity(replications);
    let mut lead_times = Vec::with_capacity(replications);

    for index in 0..replications {
        let outcome = run_replication(seed, index as u64)?;
        demands.push(outcome.average_demand());
        lead_times.push(outcome.average_lead_time());
    }

    let mean = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;
    let min = |values: &[f64]| values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = |values: &[f64]| values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let summary = AggregateSummary {
        replications,
        mean_average_demand: mean(&demands),
        mean_average_lead_time: mean(&lead_times),
        min_average_demand: min(&demands),
        max_average_demand: max(&demands),
        min_average_lead_time: min(&lead_times),
        max_average_lead_time: max(&lead_times),
    };

    info!(
        "Completed {} replications: mean demand {:.2}/day, mean lead time {:.2} days",
        replications, summary.mean_average_demand, summary.mean_average_lead_time
    );
    Ok(summary)
}
