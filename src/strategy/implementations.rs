// src/strategy/implementations.rs

use crate::simulation::config::MAX_BASEMENT;
use crate::strategy::traits::ReplenishmentPolicy;

/// Order-up-to policy for the basement.
///
/// Whenever the basement is below capacity at a review, order the gap.
/// An order still in transit does not block a new one; the new order's
/// countdown replaces the old one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopUpPolicy;

impl TopUpPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ReplenishmentPolicy for TopUpPolicy {
    fn order_quantity(&mut self, basement: u32, _days_until_arrival: Option<u32>) -> u32 {
        MAX_BASEMENT.saturating_sub(basement)
    }
}
