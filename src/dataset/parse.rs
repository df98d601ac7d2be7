use anyhow::{anyhow, Result};
use chrono::{NaiveDateTime, Timelike};

/// Parse a `"YYYY-MM-DD HH:MM:SS"` start-time field.
pub fn parse_start_time(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| anyhow!("unparseable start time {:?}: {}", s, e))
}

/// Full month name, e.g. "January".
pub fn month_name(dt: &NaiveDateTime) -> String {
    dt.format("%B").to_string()
}

/// Full weekday name, e.g. "Monday".
pub fn weekday_name(dt: &NaiveDateTime) -> String {
    dt.format("%A").to_string()
}

/// Hour of day, 0-23.
pub fn start_hour(dt: &NaiveDateTime) -> i32 {
    dt.hour() as i32
}

/// Title-case a single filter word ("february" -> "February") so user input
/// compares against the derived name columns.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
