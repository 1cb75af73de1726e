// src/simulation/engine.rs

use crate::error::{Result, SimulationError};
use crate::io::variates::{
    generate_demand, generate_lead_time, DrawSource, DEMAND_TABLE, LEAD_TIME_TABLE,
};
use crate::model::inventory::InventoryState;
use crate::simulation::config::{HORIZON_DAYS, REVIEW_CYCLES, REVIEW_PERIOD};
use crate::strategy::implementations::TopUpPolicy;
use crate::strategy::traits::ReplenishmentPolicy;
use log::{debug, trace, warn};
use serde::Serialize;

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLogEntry {
    pub cycle: u32,
    pub day: u32,
    pub beginning_first_floor: u32,
    pub beginning_basement: u32,
    pub demand: u32,
    pub demand_draw: u32,
    pub ending_first_floor: u32,
    pub ending_basement: u32,
    pub shortage: u32,
    /// Units delivered into the basement by a replenishment that landed this day.
    pub received_quantity: u32,
    pub order_quantity: u32,
    pub lead_time: Option<u32>,
    pub days_until_arrival: Option<u32>,
}

/// Statistics for one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub average_ending_first_floor: f64,
    pub average_ending_basement: f64,
    pub total_shortage: u32,
    pub total_demand: u32,
    pub average_demand: f64,
    pub total_lead_time: u32,
    pub order_count: u32,
    pub average_lead_time: f64,
}

/// Everything a single run hands back to its caller.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub log: Vec<DayLogEntry>,
}

impl RunOutcome {
    pub fn average_demand(&self) -> f64 {
        self.summary.average_demand
    }

    pub fn average_lead_time(&self) -> f64 {
        self.summary.average_lead_time
    }
}

pub struct InventorySimulation<S> {
    state: InventoryState,
    draws: S,
    policy: Box<dyn ReplenishmentPolicy>,

    // Running counters
    total_shortage: u32,
    total_demand: u32,
    total_lead_time: u32,
    order_count: u32,

    pub history: Vec<DayLogEntry>,
}

impl<S: DrawSource> InventorySimulation<S> {
    pub fn new(draws: S) -> Self {
        Self::with_state(draws, InventoryState::default())
    }

    pub fn with_state(draws: S, state: InventoryState) -> Self {
        Self {
            state,
            draws,
            policy: Box::new(TopUpPolicy::new()),
            total_shortage: 0,
            total_demand: 0,
            total_lead_time: 0,
            order_count: 0,
            history: Vec::with_capacity(HORIZON_DAYS as usize),
        }
    }

    /// Runs every review cycle and returns the summary with the full day log.
    ///
    /// # Errors
    /// Fails if a distribution table has a gap or stock leaves its bounds.
    pub fn run(mut self) -> Result<RunOutcome> {
        DEMAND_TABLE.validate()?;
        // A lead-time miss is survivable: the order is delivered at the review.
        if let Err(e) = LEAD_TIME_TABLE.validate() {
            warn!("{}", e);
        }

        for cycle in 1..=REVIEW_CYCLES {
            self.run_cycle(cycle)?;
        }
        let summary = self.summary();
        debug!(
            "Run complete: demand {:.2}/day, lead time {:.2} days, {} orders, {} units short",
            summary.average_demand,
            summary.average_lead_time,
            summary.order_count,
            summary.total_shortage
        );
        Ok(RunOutcome {
            summary,
            log: self.history,
        })
    }

    /// Simulates one review cycle: `REVIEW_PERIOD` days followed by the review.
    pub fn run_cycle(&mut self, cycle: u32) -> Result<()> {
        for day in 1..=REVIEW_PERIOD {
            self.step(cycle, day)?;
        }
        self.review(cycle);
        Ok(())
    }

    fn step(&mut self, cycle: u32, day: u32) -> Result<()> {
        let beginning_first_floor = self.state.first_floor;
        let beginning_basement = self.state.basement;

        let demand = generate_demand(&mut self.draws)?;
        self.total_demand += demand.value;

        let allocation = self.state.allocate(demand.value);
        self.total_shortage += allocation.shortage;

        let received_quantity = self.state.advance_pending_order();
        if received_quantity > 0 {
            debug!(
                "Cycle {} day {}: replenishment landed, {} units into the basement",
                cycle, day, received_quantity
            );
        }

        if !self.state.within_bounds() {
            return Err(SimulationError::StockOutOfBounds {
                cycle,
                day,
                first_floor: self.state.first_floor,
                basement: self.state.basement,
            });
        }

        trace!(
            "Cycle {} day {}: demand {} (draw {}), served {}, short {}, moved up {}, first floor {} -> {}, basement {} -> {}",
            cycle,
            day,
            demand.value,
            demand.draw,
            allocation.satisfied,
            allocation.shortage,
            allocation.transferred,
            beginning_first_floor,
            self.state.first_floor,
            beginning_basement,
            self.state.basement
        );

        self.history.push(DayLogEntry {
            cycle,
            day,
            beginning_first_floor,
            beginning_basement,
            demand: demand.value,
            demand_draw: demand.draw,
            ending_first_floor: self.state.first_floor,
            ending_basement: self.state.basement,
            shortage: allocation.shortage,
            received_quantity,
            order_quantity: 0,
            lead_time: None,
            days_until_arrival: self.state.days_until_arrival(),
        });
        Ok(())
    }

    /// End-of-cycle review. An order, if placed, is written onto the cycle's last day.
    fn review(&mut self, cycle: u32) {
        let quantity = self
            .policy
            .order_quantity(self.state.basement, self.state.days_until_arrival());
        if quantity == 0 {
            return;
        }

        let lead_time = generate_lead_time(&mut self.draws).map(|variate| variate.value);
        let days = lead_time.unwrap_or(0);
        self.state.pending_order_days_left = days;
        self.total_lead_time += days;
        self.order_count += 1;

        // Nothing to count down, so the top-up lands at the review itself.
        let received_now = if days == 0 {
            self.state.refill_basement()
        } else {
            0
        };

        debug!(
            "Cycle {}: ordered {} units, lead time {:?} ({:?})",
            cycle, quantity, lead_time, self.policy
        );

        if let Some(last) = self.history.last_mut() {
            last.order_quantity = quantity;
            last.lead_time = lead_time;
            last.days_until_arrival = self.state.days_until_arrival();
            last.received_quantity += received_now;
            last.ending_basement = self.state.basement;
        }
    }

    pub fn summary(&self) -> RunSummary {
        let days = self.history.len();
        let mean = |total: u32| {
            if days == 0 {
                0.0
            } else {
                total as f64 / days as f64
            }
        };

        let average_lead_time = if self.order_count > 0 {
            self.total_lead_time as f64 / self.order_count as f64
        } else {
            0.0
        };

        RunSummary {
            average_ending_first_floor: mean(self.history.iter().map(|e| e.ending_first_floor).sum()),
            average_ending_basement: mean(self.history.iter().map(|e| e.ending_basement).sum()),
            total_shortage: self.total_shortage,
            total_demand: self.total_demand,
            average_demand: self.total_demand as f64 / HORIZON_DAYS as f64,
            total_lead_time: self.total_lead_time,
            order_count: self.order_count,
            average_lead_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::variates::tests::ScriptedDraws;
    use crate::io::variates::RngDraws;
    use crate::simulation::config::{MAX_BASEMENT, MAX_FIRST_FLOOR};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded_run(seed: u64) -> RunOutcome {
        InventorySimulation::new(RngDraws::new(ChaCha8Rng::seed_from_u64(seed)))
            .run()
            .unwrap()
    }

    #[test]
    fn test_log_has_one_entry_per_day() {
        let outcome = seeded_run(1);
        assert_eq!(outcome.log.len(), 120);
        for (index, entry) in outcome.log.iter().enumerate() {
            assert_eq!(entry.cycle, index as u32 / REVIEW_PERIOD + 1);
            assert_eq!(entry.day, index as u32 % REVIEW_PERIOD + 1);
        }
    }

    #[test]
    fn test_stock_stays_within_bounds() {
        for seed in 0..50 {
            for entry in seeded_run(seed).log {
                assert!(entry.ending_first_floor <= MAX_FIRST_FLOOR);
                assert!(entry.ending_basement <= MAX_BASEMENT);
            }
        }
    }

    #[test]
    fn test_units_are_conserved_each_day() {
        for seed in 0..50 {
            for entry in seeded_run(seed).log {
                assert_eq!(
                    entry.ending_first_floor + entry.ending_basement + entry.demand,
                    entry.beginning_first_floor
                        + entry.beginning_basement
                        + entry.received_quantity
                        + entry.shortage,
                    "cycle {} day {}",
                    entry.cycle,
                    entry.day
                );
            }
        }
    }

    #[test]
    fn test_days_chain_together() {
        let outcome = seeded_run(3);
        for pair in outcome.log.windows(2) {
            assert_eq!(pair[0].ending_first_floor, pair[1].beginning_first_floor);
            assert_eq!(pair[0].ending_basement, pair[1].beginning_basement);
        }
    }

    #[test]
    fn test_unit_demand_trace_transfers_on_day_five() {
        // Draw 0 is demand 1 and also lead time 1.
        let outcome = InventorySimulation::new(ScriptedDraws::new(&[0]))
            .run()
            .unwrap();
        let first_cycle: Vec<(u32, u32)> = outcome.log[..6]
            .iter()
            .map(|e| (e.ending_first_floor, e.ending_basement))
            .collect();
        assert_eq!(
            first_cycle,
            vec![(3, 30), (2, 30), (1, 30), (0, 30), (9, 20), (8, 20)]
        );
        assert!(outcome.log[..6].iter().all(|e| e.shortage == 0));

        let review_day = &outcome.log[5];
        assert_eq!(review_day.order_quantity, 10);
        assert_eq!(review_day.lead_time, Some(1));
        assert_eq!(review_day.days_until_arrival, Some(1));

        // The order lands on the first day of the next cycle.
        let arrival_day = &outcome.log[6];
        assert_eq!(arrival_day.received_quantity, 10);
        assert_eq!(arrival_day.ending_first_floor, 7);
        assert_eq!(arrival_day.ending_basement, MAX_BASEMENT);
        assert_eq!(arrival_day.days_until_arrival, None);
    }

    #[test]
    fn test_orders_recorded_on_last_day_of_cycle() {
        for seed in 0..20 {
            let outcome = seeded_run(seed);
            let mut orders = 0;
            for entry in &outcome.log {
                if entry.order_quantity > 0 {
                    orders += 1;
                    assert_eq!(entry.day, REVIEW_PERIOD);
                    assert_eq!(entry.order_quantity, MAX_BASEMENT - entry.ending_basement);
                    assert!(entry.lead_time.is_some());
                } else {
                    assert_eq!(entry.lead_time, None);
                }
            }
            assert_eq!(orders, outcome.summary.order_count);
        }
    }

    #[test]
    fn test_new_order_replaces_unexpired_countdown() {
        // Table lead times never outlast a cycle, so start with a long one in transit.
        // Draw 100 is demand 5 and lead time 3.
        let mut state = InventoryState::new(MAX_FIRST_FLOOR, MAX_BASEMENT);
        state.pending_order_days_left = 10;
        let mut sim = InventorySimulation::with_state(ScriptedDraws::new(&[100]), state);

        sim.run_cycle(1).unwrap();

        let entry = sim.history.last().unwrap();
        assert_eq!(entry.ending_basement, 10);
        assert_eq!(entry.order_quantity, 20);
        assert_eq!(entry.lead_time, Some(3));
        assert_eq!(entry.days_until_arrival, Some(3));
        assert_eq!(sim.state.pending_order_days_left, 3);
        assert_eq!(sim.summary().order_count, 1);
        assert!(sim.history[..5].iter().all(|e| e.order_quantity == 0));
    }

    #[test]
    fn test_absent_lead_time_tops_up_at_review() {
        // Six days of demand 1, then a lead-time draw no row covers.
        let mut sim = InventorySimulation::new(ScriptedDraws::new(&[0, 0, 0, 0, 0, 0, 101]));
        sim.run_cycle(1).unwrap();

        let entry = sim.history.last().unwrap();
        assert_eq!(entry.day, REVIEW_PERIOD);
        assert_eq!(entry.order_quantity, 10);
        assert_eq!(entry.lead_time, None);
        assert_eq!(entry.days_until_arrival, None);
        assert_eq!(entry.received_quantity, 10);
        assert_eq!(entry.ending_basement, MAX_BASEMENT);
        assert_eq!(
            entry.ending_first_floor + entry.ending_basement + entry.demand,
            entry.beginning_first_floor
                + entry.beginning_basement
                + entry.received_quantity
                + entry.shortage
        );
        assert_eq!(sim.state.pending_order_days_left, 0);

        let summary = sim.summary();
        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.average_lead_time, 0.0);
    }

    #[test]
    fn test_out_of_bounds_state_fails_run() {
        let result = InventorySimulation::with_state(
            ScriptedDraws::new(&[0]),
            InventoryState::new(15, 30),
        )
        .run();
        assert!(matches!(
            result,
            Err(SimulationError::StockOutOfBounds {
                cycle: 1,
                day: 1,
                first_floor: 14,
                ..
            })
        ));
    }

    #[test]
    fn test_no_orders_reports_zero_lead_time() {
        let sim = InventorySimulation::new(ScriptedDraws::new(&[0]));
        let summary = sim.summary();
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.average_lead_time, 0.0);
    }

    #[test]
    fn test_summary_matches_log() {
        let outcome = seeded_run(11);
        let log = &outcome.log;
        let total_demand: u32 = log.iter().map(|e| e.demand).sum();
        let total_shortage: u32 = log.iter().map(|e| e.shortage).sum();
        let lead_times: Vec<u32> = log.iter().filter_map(|e| e.lead_time).collect();

        assert_eq!(outcome.summary.total_demand, total_demand);
        assert_eq!(outcome.summary.total_shortage, total_shortage);
        assert_eq!(outcome.summary.average_demand, total_demand as f64 / 120.0);
        assert_eq!(outcome.summary.order_count as usize, lead_times.len());
        assert_eq!(outcome.summary.total_lead_time, lead_times.iter().sum::<u32>());
    }

    #[test]
    fn test_gap_in_demand_table_aborts_run() {
        let result = InventorySimulation::new(ScriptedDraws::new(&[250])).run();
        assert!(matches!(
            result,
            Err(SimulationError::DistributionGap { draw: 250, .. })
        ));
    }
}
