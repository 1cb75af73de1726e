// src/strategy/traits.rs

use std::fmt::Debug;

/// Decides how much to order from the external supplier at a review point.
///
/// We require `Debug` so the simulator can print its policy in logs.
pub trait ReplenishmentPolicy: Debug {
    /// Returns the quantity to order, or 0 to skip this review.
    ///
    /// # Arguments
    /// * `basement` - Basement stock at the end of the review cycle.
    /// * `days_until_arrival` - Countdown of an order still in transit, if any.
    ///   Policies may ignore it; a new order replaces the in-transit countdown
    ///   either way.
    fn order_quantity(&mut self, basement: u32, days_until_arrival: Option<u32>) -> u32;
}
