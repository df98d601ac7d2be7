use arrow::array::StringArray;
use std::{collections::HashMap, hash::Hash, time::Instant};

pub mod duration;
pub mod station;
pub mod time;
pub mod user;

/// Most frequent value and its count. Ties are broken by first occurrence
/// in iteration order, so the result is deterministic for a given column.
pub(crate) fn mode<T, I>(values: I) -> Option<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order: Vec<T> = Vec::new();
    for v in values {
        let slot = counts.entry(v.clone()).or_insert(0);
        if *slot == 0 {
            order.push(v);
        }
        *slot += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for v in order {
        let count = counts[&v];
        if best.as_ref().is_none_or(|(_, c)| count > *c) {
            best = Some((v, count));
        }
    }
    best
}

/// Frequency table, descending by count, first occurrence breaking ties.
pub(crate) fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order: Vec<T> = Vec::new();
    for v in values {
        let slot = counts.entry(v.clone()).or_insert(0);
        if *slot == 0 {
            order.push(v);
        }
        *slot += 1;
    }

    let mut out: Vec<(T, usize)> = order
        .into_iter()
        .map(|v| {
            let count = counts[&v];
            (v, count)
        })
        .collect();
    // stable sort keeps first-seen order within equal counts
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Frequency table over a string column, nulls skipped.
pub(crate) fn string_counts(arr: &StringArray) -> Vec<(String, usize)> {
    value_counts(arr.iter().flatten())
        .into_iter()
        .map(|(v, c)| (v.to_string(), c))
        .collect()
}

/// Every report ends with the wall-clock line and a rule, like the others.
pub(crate) fn finish_report(start: Instant) {
    println!("\nThis took {} seconds.", start.elapsed().as_secs_f64());
    println!("{}", "-".repeat(40));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_picks_most_frequent() {
        let got = mode(["a", "b", "b", "c", "b"]).unwrap();
        assert_eq!(got, ("b", 3));
    }

    #[test]
    fn mode_breaks_ties_by_first_occurrence() {
        assert_eq!(mode(["b", "a", "a", "b"]).unwrap(), ("b", 2));
        assert_eq!(mode(["z"]).unwrap(), ("z", 1));
    }

    #[test]
    fn mode_of_nothing_is_none() {
        assert_eq!(mode(std::iter::empty::<&str>()), None);
    }

    #[test]
    fn value_counts_sorts_descending_with_stable_ties() {
        let got = value_counts(["x", "y", "y", "z", "x", "y"]);
        assert_eq!(got, vec![("y", 3), ("x", 2), ("z", 1)]);

        let tied = value_counts(["n", "m", "m", "n"]);
        assert_eq!(tied, vec![("n", 2), ("m", 2)]);
    }
}
