// src/io/histogram.rs

use crate::simulation::engine::DayLogEntry;

/// Bin counts over fixed edges.
///
/// Bins are `[edges[i], edges[i + 1])`, except the last, which also includes
/// its upper edge. Values outside every bin are not counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: &'static str,
    pub edges: Vec<u32>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(title: &'static str, edges: Vec<u32>, values: impl IntoIterator<Item = u32>) -> Self {
        let bins = edges.len().saturating_sub(1);
        let mut counts = vec![0; bins];
        for value in values {
            if let Some(bin) = bin_index(&edges, value) {
                counts[bin] += 1;
            }
        }
        Self {
            title,
            edges,
            counts,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

fn bin_index(edges: &[u32], value: u32) -> Option<usize> {
    let last = edges.len().checked_sub(2)?;
    edges.windows(2).enumerate().find_map(|(i, pair)| {
        let inside = if i == last {
            (pair[0]..=pair[1]).contains(&value)
        } else {
            (pair[0]..pair[1]).contains(&value)
        };
        inside.then_some(i)
    })
}

fn stepped(start: u32, end: u32, step: usize) -> Vec<u32> {
    (start..end).step_by(step).collect()
}

pub fn demand(log: &[DayLogEntry]) -> Histogram {
    Histogram::new("Demand", stepped(1, 7, 1), log.iter().map(|e| e.demand))
}

/// Days without an order carry no lead time and are left out.
pub fn lead_time(log: &[DayLogEntry]) -> Histogram {
    Histogram::new(
        "Lead Time (Days)",
        stepped(1, 5, 1),
        log.iter().filter_map(|e| e.lead_time),
    )
}

pub fn first_floor_levels(log: &[DayLogEntry]) -> Histogram {
    Histogram::new(
        "First Floor Inventory Levels",
        stepped(0, 12, 2),
        log.iter().map(|e| e.ending_first_floor),
    )
}

pub fn basement_levels(log: &[DayLogEntry]) -> Histogram {
    Histogram::new(
        "Basement Inventory Levels",
        stepped(0, 32, 5),
        log.iter().map(|e| e.ending_basement),
    )
}

/// Only days that actually ran short.
pub fn shortages(log: &[DayLogEntry]) -> Histogram {
    Histogram::new(
        "Shortage Quantity",
        stepped(0, 12, 2),
        log.iter().map(|e| e.shortage).filter(|s| *s > 0),
    )
}

/// Quantity ordered per cycle, for cycles that ordered.
pub fn order_frequency(log: &[DayLogEntry]) -> Vec<(u32, u32)> {
    log.iter()
        .filter(|e| e.order_quantity > 0)
        .map(|e| (e.cycle, e.order_quantity))
        .collect()
}

pub fn all(log: &[DayLogEntry]) -> Vec<Histogram> {
    vec![
        demand(log),
        lead_time(log),
        first_floor_levels(log),
        basement_levels(log),
        shortages(log),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::replication::run_once;

    #[test]
    fn test_last_bin_is_closed() {
        let histogram = Histogram::new("t", vec![0, 2, 4], [0, 1, 2, 3, 4, 5]);
        assert_eq!(histogram.counts, vec![2, 3]);
        assert_eq!(histogram.total(), 5);
    }

    #[test]
    fn test_edges_match_chart_bins() {
        assert_eq!(stepped(1, 7, 1), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(stepped(0, 12, 2), vec![0, 2, 4, 6, 8, 10]);
        assert_eq!(stepped(0, 32, 5), vec![0, 5, 10, 15, 20, 25, 30]);
    }

    #[test]
    fn test_histograms_cover_the_run() {
        let outcome = run_once(Some(8)).unwrap();
        let log = &outcome.log;

        assert_eq!(demand(log).total(), log.len());
        assert_eq!(first_floor_levels(log).total(), log.len());
        assert_eq!(basement_levels(log).total(), log.len());
        assert_eq!(lead_time(log).total(), outcome.summary.order_count as usize);
        assert_eq!(
            shortages(log).total(),
            log.iter().filter(|e| e.shortage > 0).count()
        );
        assert_eq!(order_frequency(log).len(), outcome.summary.order_count as usize);
    }

    #[test]
    fn test_empty_edges_count_nothing() {
        let histogram = Histogram::new("t", vec![3], [3, 4]);
        assert!(histogram.counts.is_empty());
    }
}
