use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// Month filter values. The published city extracts only cover January
/// through June, so the list stops there.
pub const MONTHS: &[&str] = &[
    "all", "january", "february", "march", "april", "may", "june",
];

/// Weekday filter values.
pub const WEEKDAYS: &[&str] = &[
    "all",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// One session's filter selection.
#[derive(Debug, Clone)]
pub struct Filters {
    pub city: String,
    pub month: String,
    pub day: String,
}

/// Re-prompt until the (lowercased, trimmed) line is a member of `allowed`.
///
/// There is no retry cap; the only failure mode is the input stream ending
/// before a valid choice arrives.
pub fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    allowed: &[&str],
) -> Result<String> {
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input ended before a valid choice was made");
        }

        let choice = line.trim().to_lowercase();
        if allowed.contains(&choice.as_str()) {
            return Ok(choice);
        }
        writeln!(output, "Wrong input. Please try again.")?;
    }
}

/// Print each enumeration and gather one validated selection for it.
///
/// The enumerations come from the caller so there is exactly one place
/// (`main`) that decides what the valid cities, months, and weekdays are.
pub fn collect_filters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    cities: &[&str],
    months: &[&str],
    days: &[&str],
) -> Result<Filters> {
    writeln!(output, "\nCity list:")?;
    writeln!(output, "{}", cities.join(", "))?;
    let city = read_choice(input, output, "Select a city: ", cities)?;

    writeln!(output, "\nMonth list:")?;
    writeln!(output, "{}", months.join(", "))?;
    let month = read_choice(
        input,
        output,
        "Select a month for which you need data: ",
        months,
    )?;

    writeln!(output, "\nDay of Week list:")?;
    writeln!(output, "{}", days.join(", "))?;
    let day = read_choice(
        input,
        output,
        "Select a weekday for which you need data: ",
        days,
    )?;

    writeln!(output, "{}", "-".repeat(40))?;
    Ok(Filters { city, month, day })
}
