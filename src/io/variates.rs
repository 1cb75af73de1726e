// src/io/variates.rs

use crate::error::{Result, SimulationError};
use log::warn;
use rand::Rng;
use std::ops::RangeInclusive;

/// Largest value a uniform draw can take. Draws cover `0..=DRAW_MAX`, i.e. 101 outcomes.
pub const DRAW_MAX: u32 = 100;

/// One row of a discrete distribution table.
///
/// `probability` is the nominal label only. Sampling is driven by `range`,
/// so the real mass of a row is `range width / 101`.
#[derive(Debug, Clone)]
pub struct TableEntry {
    pub value: u32,
    pub probability: f64,
    pub range: RangeInclusive<u32>,
}

/// Labelled and range-implied probabilities may differ by this much before we warn.
const MASS_TOLERANCE: f64 = 0.01;

impl TableEntry {
    /// Probability actually implied by the range.
    pub fn range_mass(&self) -> f64 {
        let width = self.range.end().saturating_sub(*self.range.start()) + 1;
        width as f64 / (DRAW_MAX + 1) as f64
    }
}

const fn entry(value: u32, probability: f64, low: u32, high: u32) -> TableEntry {
    TableEntry {
        value,
        probability,
        range: low..=high,
    }
}

/// An ordered inverse-CDF lookup table. The first row whose range holds the draw wins.
#[derive(Debug, Clone)]
pub struct DistributionTable {
    pub name: &'static str,
    pub entries: &'static [TableEntry],
}

pub const DEMAND_TABLE: DistributionTable = DistributionTable {
    name: "demand",
    entries: &[
        entry(1, 0.10, 0, 10),
        entry(2, 0.15, 11, 25),
        entry(3, 0.35, 26, 60),
        entry(4, 0.20, 61, 80),
        entry(5, 0.20, 81, 100),
    ],
};

pub const LEAD_TIME_TABLE: DistributionTable = DistributionTable {
    name: "lead time",
    entries: &[
        entry(1, 0.40, 0, 40),
        entry(2, 0.35, 41, 75),
        entry(3, 0.25, 76, 100),
    ],
};

impl DistributionTable {
    /// Linear scan for the first row covering `draw`.
    pub fn lookup(&self, draw: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|row| row.range.contains(&draw))
            .map(|row| row.value)
    }

    /// Draws in `0..=DRAW_MAX` that no row covers.
    pub fn coverage_gaps(&self) -> Vec<u32> {
        (0..=DRAW_MAX).filter(|d| self.lookup(*d).is_none()).collect()
    }

    /// Draws covered by more than one row. Only the first row is ever used for these.
    pub fn overlaps(&self) -> Vec<u32> {
        (0..=DRAW_MAX)
            .filter(|d| {
                self.entries
                    .iter()
                    .filter(|row| row.range.contains(d))
                    .count()
                    > 1
            })
            .collect()
    }

    /// Sum of the labelled probabilities.
    pub fn nominal_mass(&self) -> f64 {
        self.entries.iter().map(|row| row.probability).sum()
    }

    /// Checks that the table partitions the draw space.
    ///
    /// Overlapping ranges and labels that disagree with their ranges are only
    /// logged, since sampling follows the ranges either way.
    ///
    /// # Errors
    /// Returns `DistributionGap` for the first uncovered draw.
    pub fn validate(&self) -> Result<()> {
        if let Some(&draw) = self.coverage_gaps().first() {
            return Err(SimulationError::DistributionGap {
                table: self.name,
                draw,
            });
        }

        if (self.nominal_mass() - 1.0).abs() > 1e-6 {
            warn!(
                "{} table: labelled probabilities sum to {:.3}",
                self.name,
                self.nominal_mass()
            );
        }

        let overlaps = self.overlaps();
        if !overlaps.is_empty() {
            warn!("{} table: draws {:?} match more than one row", self.name, overlaps);
        }

        for row in self.entries {
            if (row.probability - row.range_mass()).abs() > MASS_TOLERANCE {
                warn!(
                    "{} table: value {} is labelled {:.3} but its range gives {:.3}",
                    self.name,
                    row.value,
                    row.probability,
                    row.range_mass()
                );
            }
        }
        Ok(())
    }
}

/// A realised variate together with the draw that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variate {
    pub value: u32,
    pub draw: u32,
}

/// Source of uniform integer draws in `0..=DRAW_MAX`.
pub trait DrawSource {
    fn next_draw(&mut self) -> u32;
}

/// Adapts any `rand` generator into a draw source.
#[derive(Debug, Clone)]
pub struct RngDraws<R> {
    rng: R,
}

impl<R: Rng> RngDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DrawSource for RngDraws<R> {
    fn next_draw(&mut self) -> u32 {
        self.rng.gen_range(0..=DRAW_MAX)
    }
}

/// Samples one day's demand.
///
/// # Errors
/// Returns `DistributionGap` if the draw is not covered by the demand table.
pub fn generate_demand(source: &mut dyn DrawSource) -> Result<Variate> {
    sample(&DEMAND_TABLE, source.next_draw())
}

/// Samples a replenishment lead time in days.
///
/// `None` means the draw matched no row. The bundled table covers every draw,
/// but the caller still handles the absent case.
pub fn generate_lead_time(source: &mut dyn DrawSource) -> Option<Variate> {
    let draw = source.next_draw();
    LEAD_TIME_TABLE
        .lookup(draw)
        .map(|value| Variate { value, draw })
}

fn sample(table: &DistributionTable, draw: u32) -> Result<Variate> {
    table
        .lookup(draw)
        .map(|value| Variate { value, draw })
        .ok_or(SimulationError::DistributionGap {
            table: table.name,
            draw,
        })
}
