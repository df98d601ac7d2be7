use anyhow::{bail, Context, Result};
use std::time::Instant;

use crate::dataset::{TripFrame, MONTH, START_HOUR, WEEK_DAY};

/// Most frequent travel times in the current row set.
#[derive(Debug, PartialEq, Eq)]
pub struct TimeStats {
    pub month: String,
    pub month_count: usize,
    pub weekday: String,
    pub weekday_count: usize,
    pub hour: i32,
    pub hour_count: usize,
}

impl TimeStats {
    pub fn compute(frame: &TripFrame) -> Result<Self> {
        if frame.num_rows() == 0 {
            bail!("no rows to report on");
        }

        let (month, month_count) =
            super::mode(frame.utf8(MONTH)?.iter().flatten()).context("month column is empty")?;
        let (weekday, weekday_count) = super::mode(frame.utf8(WEEK_DAY)?.iter().flatten())
            .context("weekday column is empty")?;
        let (hour, hour_count) = super::mode(frame.i32(START_HOUR)?.iter().flatten())
            .context("start hour column is empty")?;

        Ok(Self {
            month: month.to_string(),
            month_count,
            weekday: weekday.to_string(),
            weekday_count,
            hour,
            hour_count,
        })
    }
}

pub fn report(frame: &TripFrame) -> Result<()> {
    println!("\nCalculating The Most Frequent Times of Travel...\n");
    let start = Instant::now();

    let stats = TimeStats::compute(frame)?;
    println!(
        "The most common month: {}, Count: {}",
        stats.month, stats.month_count
    );
    println!(
        "The most common day of week: {}, Count: {}",
        stats.weekday, stats.weekday_count
    );
    println!(
        "The most common start hour: {}, Count: {}",
        stats.hour, stats.hour_count
    );

    super::finish_report(start);
    Ok(())
}
