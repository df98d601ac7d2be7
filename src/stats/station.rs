use anyhow::{bail, Context, Result};
use std::time::Instant;

use crate::dataset::{TripFrame, END_STATION, START_STATION};

/// Most popular stations and start→end combination.
#[derive(Debug, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub start_count: usize,
    pub end_station: String,
    pub end_count: usize,
    pub trip: String,
    pub trip_count: usize,
}

impl StationStats {
    pub fn compute(frame: &TripFrame) -> Result<Self> {
        if frame.num_rows() == 0 {
            bail!("no rows to report on");
        }

        let starts = frame.utf8(START_STATION)?;
        let ends = frame.utf8(END_STATION)?;

        let (start_station, start_count) =
            super::mode(starts.iter().flatten()).context("start station column is empty")?;
        let (end_station, end_count) =
            super::mode(ends.iter().flatten()).context("end station column is empty")?;

        // combination key mirrors how the pair is printed
        let pairs = starts.iter().zip(ends.iter()).filter_map(|(s, e)| match (s, e) {
            (Some(s), Some(e)) => Some(format!("{} - {}", s, e)),
            _ => None,
        });
        let (trip, trip_count) = super::mode(pairs).context("no complete station pairs")?;

        Ok(Self {
            start_station: start_station.to_string(),
            start_count,
            end_station: end_station.to_string(),
            end_count,
            trip,
            trip_count,
        })
    }
}

pub fn report(frame: &TripFrame) -> Result<()> {
    println!("\nCalculating The Most Popular Stations and Trip...\n");
    let start = Instant::now();

    let stats = StationStats::compute(frame)?;
    println!(
        "The most common start station: {}, Count: {}",
        stats.start_station, stats.start_count
    );
    println!(
        "The most common end station: {}, Count: {}",
        stats.end_station, stats.end_count
    );
    println!(
        "The most common start-end trip combination: {}, Count: {}",
        stats.trip, stats.trip_count
    );

    super::finish_report(start);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;

    #[test]
    fn finds_popular_stations_and_pair() {
        let frame = fixtures::load("chicago", "all", "all");
        let stats = StationStats::compute(&frame).unwrap();
        assert_eq!(stats.start_station, "Canal St");
        assert_eq!(stats.start_count, 6);
        assert_eq!(stats.end_station, "State St");
        assert_eq!(stats.end_count, 6);
        assert_eq!(stats.trip, "Canal St - State St");
        assert_eq!(stats.trip_count, 4);
    }

    #[test]
    fn pair_counts_follow_the_filter() {
        let frame = fixtures::load("chicago", "january", "all");
        let stats = StationStats::compute(&frame).unwrap();
        assert_eq!(stats.trip, "Canal St - State St");
        assert_eq!(stats.trip_count, 2);
    }
}
