use anyhow::{bail, Context, Result};
use arrow::compute::{max, min};
use std::time::Instant;

use crate::dataset::{TripFrame, BIRTH_YEAR, GENDER, USER_TYPE};

#[derive(Debug, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub latest: i64,
    pub most_common: i64,
}

/// User demographics. `genders` and `birth_years` are `None` when the
/// source file carries no such column (Washington does not).
#[derive(Debug, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYearStats>,
}

impl UserStats {
    pub fn compute(frame: &TripFrame) -> Result<Self> {
        if frame.num_rows() == 0 {
            bail!("no rows to report on");
        }

        let user_types = super::string_counts(frame.utf8(USER_TYPE)?);

        let genders = if frame.has_column(GENDER) {
            Some(super::string_counts(frame.utf8(GENDER)?))
        } else {
            None
        };

        let birth_years = if frame.has_column(BIRTH_YEAR) {
            let years = frame.f64(BIRTH_YEAR)?;
            let earliest = min(years).context("birth year column has no values")?;
            let latest = max(years).context("birth year column has no values")?;
            let (most_common, _) = super::mode(years.iter().flatten().map(|y| y as i64))
                .context("birth year column has no values")?;
            Some(BirthYearStats {
                earliest: earliest as i64,
                latest: latest as i64,
                most_common,
            })
        } else {
            None
        };

        Ok(Self {
            user_types,
            genders,
            birth_years,
        })
    }
}

pub fn report(frame: &TripFrame, city: &str) -> Result<()> {
    println!("\nCalculating User Stats...\n");
    let start = Instant::now();

    let stats = UserStats::compute(frame)?;
    println!("Count of user type:");
    for (value, count) in &stats.user_types {
        println!("{:<12} {}", value, count);
    }

    println!("\nCount of gender:");
    match &stats.genders {
        Some(counts) => {
            for (value, count) in counts {
                println!("{:<12} {}", value, count);
            }
        }
        None => println!("The 'Gender' column does not exist in the {} dataset.", city),
    }

    println!("\nBirth Year details:");
    match &stats.birth_years {
        Some(years) => {
            println!("Earliest Year of Birth: {}", years.earliest);
            println!("Most recent Year of Birth: {}", years.latest);
            println!("Most common Year of Birth: {}", years.most_common);
        }
        None => println!(
            "The 'Birth Year' column does not exist in the {} dataset.",
            city
        ),
    }

    super::finish_report(start);
    Ok(())
}
