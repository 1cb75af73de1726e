// src/io/reporting.rs

use crate::error::Result;
use crate::io::histogram::Histogram;
use crate::simulation::engine::{DayLogEntry, RunSummary};
use crate::simulation::replication::AggregateSummary;
use log::info;
use std::fmt;
use std::path::Path;

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Average Ending Units in First Floor Inventory: {:.2}",
            self.average_ending_first_floor
        )?;
        writeln!(
            f,
            "Average Ending Units in Basement Inventory: {:.2}",
            self.average_ending_basement
        )?;
        writeln!(f, "Total Shortages: {}", self.total_shortage)?;
        writeln!(f, "Average Demand per Day: {:.2}", self.average_demand)?;
        writeln!(f, "Average Lead Time: {:.2} days", self.average_lead_time)?;
        writeln!(f, "Number of Orders Placed: {}", self.order_count)
    }
}

impl fmt::Display for AggregateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average of Average Demand: {:.2}", self.mean_average_demand)?;
        writeln!(
            f,
            "Average of Average Lead Time: {:.2} days",
            self.mean_average_lead_time
        )
    }
}

/// Writes the day log to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The day log of a completed run.
pub fn write_simulation_log(file_path: impl AsRef<Path>, data: &[DayLogEntry]) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!("Exported {} rows to '{}'", data.len(), path.display());
    Ok(())
}

fn dash(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Renders the day log as a fixed-width table.
pub fn format_log_table(data: &[DayLogEntry]) -> String {
    let mut out = format!(
        "{:>5} {:>3} {:>8} {:>8} {:>6} {:>4} {:>8} {:>8} {:>5} {:>5} {:>5} {:>4} {:>5}\n",
        "Cycle", "Day", "BegFloor", "BegBase", "Demand", "Draw", "EndFloor", "EndBase",
        "Short", "Recv", "Order", "Lead", "Until"
    );
    for e in data {
        out.push_str(&format!(
            "{:>5} {:>3} {:>8} {:>8} {:>6} {:>4} {:>8} {:>8} {:>5} {:>5} {:>5} {:>4} {:>5}\n",
            e.cycle,
            e.day,
            e.beginning_first_floor,
            e.beginning_basement,
            e.demand,
            e.demand_draw,
            e.ending_first_floor,
            e.ending_basement,
            e.shortage,
            e.received_quantity,
            e.order_quantity,
            dash(e.lead_time),
            dash(e.days_until_arrival)
        ));
    }
    out
}

/// Renders a histogram as one bar of `#` per bin.
pub fn format_histogram(histogram: &Histogram) -> String {
    let mut out = format!("{} (n = {})\n", histogram.title, histogram.total());
    let last = histogram.counts.len().saturating_sub(1);
    for (i, count) in histogram.counts.iter().enumerate() {
        let close = if i == last { ']' } else { ')' };
        out.push_str(&format!(
            "  [{:>2}, {:>2}{} {:>4} {}\n",
            histogram.edges[i],
            histogram.edges[i + 1],
            close,
            count,
            "#".repeat(*count)
        ));
    }
    out
}

/// Renders order quantity per ordering cycle.
pub fn format_order_frequency(orders: &[(u32, u32)]) -> String {
    let mut out = String::from("Order Frequency by Cycle\n");
    for (cycle, quantity) in orders {
        out.push_str(&format!(
            "  cycle {:>2} {:>4} {}\n",
            cycle,
            quantity,
            "#".repeat(*quantity as usize)
        ));
    }
    out
}
