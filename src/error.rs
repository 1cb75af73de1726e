// src/error.rs

use thiserror::Error;

/// Errors raised while simulating or exporting results.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A draw fell outside every range of a distribution table.
    /// The table no longer partitions `0..=100`, which is a configuration defect.
    #[error("Draw {draw} is not covered by the {table} table")]
    DistributionGap {
        /// Name of the table that was consulted
        table: &'static str,
        /// The uncovered draw
        draw: u32,
    },

    /// A study was requested with zero replications.
    #[error("At least one replication is required")]
    NoReplications,

    /// Stock left its allowed range at the end of a day.
    #[error(
        "Stock out of bounds on cycle {cycle}, day {day}: first floor {first_floor}, basement {basement}"
    )]
    StockOutOfBounds {
        cycle: u32,
        day: u32,
        first_floor: u32,
        basement: u32,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
