// src/simulation/config.rs

/// Capacity of the first-floor consumption point.
pub const MAX_FIRST_FLOOR: u32 = 10;
/// Capacity of the basement buffer; replenishment orders top it up to this.
pub const MAX_BASEMENT: u32 = 30;
/// Days between two replenishment reviews.
pub const REVIEW_PERIOD: u32 = 6;
/// Review cycles per run.
pub const REVIEW_CYCLES: u32 = 20;
pub const INITIAL_FIRST_FLOOR: u32 = 4;
pub const INITIAL_BASEMENT: u32 = 30;

/// Total simulated days in one run.
pub const HORIZON_DAYS: u32 = REVIEW_CYCLES * REVIEW_PERIOD;

/// Replications run by a study when no count is given.
pub const DEFAULT_REPLICATIONS: usize = 30;

/// Run-level settings. The inventory policy itself is fixed by the constants above.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Master seed. `None` seeds every run from OS entropy.
    pub seed: Option<u64>,
    pub replications: usize,
    /// Where to export the last run's day log, if anywhere.
    pub log_path: Option<String>,
    pub show_log: bool,
    pub show_histograms: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            replications: DEFAULT_REPLICATIONS,
            log_path: None,
            show_log: false,
            show_histograms: false,
        }
    }
}
