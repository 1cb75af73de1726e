// src/model/inventory.rs

use crate::simulation::config::{
    INITIAL_BASEMENT, INITIAL_FIRST_FLOOR, MAX_BASEMENT, MAX_FIRST_FLOOR,
};

/// What happened to one day's demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Allocation {
    /// Units moved from the basement up to the first floor.
    pub transferred: u32,
    /// Units of demand that were served.
    pub satisfied: u32,
    /// Units of demand lost. Lost sales are never backordered.
    pub shortage: u32,
}

/// Stock held at both locations during a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryState {
    pub first_floor: u32,
    pub basement: u32,
    /// Days until the in-transit order lands. 0 means nothing is in transit.
    pub pending_order_days_left: u32,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self::new(INITIAL_FIRST_FLOOR, INITIAL_BASEMENT)
    }
}

impl InventoryState {
    pub fn new(first_floor: u32, basement: u32) -> Self {
        Self {
            first_floor,
            basement,
            pending_order_days_left: 0,
        }
    }

    /// Serves `demand` from the first floor, restocking it from the basement
    /// when it runs short, and finally drawing the remainder straight from the basement.
    pub fn allocate(&mut self, demand: u32) -> Allocation {
        if self.first_floor >= demand {
            self.first_floor -= demand;
            return Allocation {
                transferred: 0,
                satisfied: demand,
                shortage: 0,
            };
        }

        let transferred = MAX_FIRST_FLOOR.saturating_sub(self.first_floor).min(self.basement);
        self.first_floor += transferred;
        self.basement -= transferred;

        if self.first_floor >= demand {
            self.first_floor -= demand;
            return Allocation {
                transferred,
                satisfied: demand,
                shortage: 0,
            };
        }

        let remaining = demand - self.first_floor;
        self.first_floor = 0;

        if self.basement >= remaining {
            self.basement -= remaining;
            Allocation {
                transferred,
                satisfied: demand,
                shortage: 0,
            }
        } else {
            let shortage = remaining - self.basement;
            self.basement = 0;
            Allocation {
                transferred,
                satisfied: demand - shortage,
                shortage,
            }
        }
    }

    /// Advances the in-transit order by one day.
    ///
    /// Returns the units received if the order landed today.
    pub fn advance_pending_order(&mut self) -> u32 {
        if self.pending_order_days_left == 0 {
            return 0;
        }
        self.pending_order_days_left -= 1;
        if self.pending_order_days_left == 0 {
            self.refill_basement()
        } else {
            0
        }
    }

    /// Tops the basement up to capacity and returns the amount added.
    pub fn refill_basement(&mut self) -> u32 {
        let refill = MAX_BASEMENT.saturating_sub(self.basement);
        self.basement += refill;
        refill
    }

    /// Days left on the in-transit order, if any.
    pub fn days_until_arrival(&self) -> Option<u32> {
        (self.pending_order_days_left > 0).then_some(self.pending_order_days_left)
    }

    pub fn within_bounds(&self) -> bool {
        self.first_floor <= MAX_FIRST_FLOOR && self.basement <= MAX_BASEMENT
    }
}
