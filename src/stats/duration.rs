use anyhow::{bail, Result};
use arrow::{array::Array, compute::sum};
use std::time::Instant;

use crate::dataset::{TripFrame, TRIP_DURATION};

/// Sum and arithmetic mean of trip durations, in seconds. Null durations
/// are skipped by both aggregates; `mean` is `None` when every value is
/// null.
#[derive(Debug, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    pub mean: Option<f64>,
}

impl DurationStats {
    pub fn compute(frame: &TripFrame) -> Result<Self> {
        if frame.num_rows() == 0 {
            bail!("no rows to report on");
        }

        let durations = frame.f64(TRIP_DURATION)?;
        let valid = durations.len() - durations.null_count();
        let total = sum(durations).unwrap_or(0.0);
        let mean = (valid > 0).then(|| total / valid as f64);
        Ok(Self { total, mean })
    }
}

pub fn report(frame: &TripFrame) -> Result<()> {
    println!("\nCalculating Trip Duration...\n");
    let start = Instant::now();

    let stats = DurationStats::compute(frame)?;
    println!("Total travel time: {}", stats.total);
    match stats.mean {
        Some(mean) => println!("Mean travel time: {}", mean),
        None => println!("Mean travel time: no duration values present"),
    }

    super::finish_report(start);
    Ok(())
}
