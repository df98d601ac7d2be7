use anyhow::Result;
use arrow::util::pretty::pretty_format_batches;
use std::io::{BufRead, Write};

use crate::dataset::TripFrame;

pub const PAGE_SIZE: usize = 5;

/// Page through the filtered rows five at a time as an aligned table.
///
/// After each window the user is asked for the next one; anything other
/// than exactly "Y" or "y" (EOF included) stops immediately, even when
/// more windows remain.
pub fn browse<R: BufRead, W: Write>(
    frame: &TripFrame,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "\nDisplaying the first {} records:", PAGE_SIZE)?;

    let total = frame.num_rows();
    let mut offset = 0;
    while offset < total {
        let len = PAGE_SIZE.min(total - offset);
        let window = frame.batch().slice(offset, len);
        writeln!(output, "{}", pretty_format_batches(&[window])?)?;
        offset += len;

        write!(
            output,
            "Do you want to display the next {} records? Y / N : ",
            PAGE_SIZE
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let answer = line.trim();
        if answer != "Y" && answer != "y" {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;
    use std::io::Cursor;

    const PROMPT: &str = "Do you want to display the next";

    fn run(frame: &TripFrame, answers: &str) -> String {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        browse(frame, &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn stops_after_a_negative_answer() {
        let frame = fixtures::load("chicago", "all", "all");
        let rendered = run(&frame, "n\n");
        assert_eq!(rendered.matches(PROMPT).count(), 1);
        // second window's rows never shown
        assert!(rendered.contains("2017-01-01"));
        assert!(!rendered.contains("2017-02-11"));
    }

    #[test]
    fn continues_on_y_until_rows_run_out() {
        let frame = fixtures::load("chicago", "all", "all");
        let rendered = run(&frame, "y\nY\n");
        assert_eq!(rendered.matches(PROMPT).count(), 2);
        assert!(rendered.contains("2017-02-19"));
    }

    #[test]
    fn any_other_answer_stops_mid_sequence() {
        let frame = fixtures::load("chicago", "all", "all");
        // "yes" is not exactly "Y"/"y"
        let rendered = run(&frame, "yes\n");
        assert_eq!(rendered.matches(PROMPT).count(), 1);
        assert!(!rendered.contains("2017-02-19"));
    }

    #[test]
    fn eof_stops_browsing() {
        let frame = fixtures::load("chicago", "all", "all");
        let rendered = run(&frame, "");
        assert_eq!(rendered.matches(PROMPT).count(), 1);
    }

    #[test]
    fn short_final_window_is_rendered() {
        let frame = fixtures::load("washington", "all", "all");
        let rendered = run(&frame, "n\n");
        assert!(rendered.contains("Union Station"));
        assert_eq!(rendered.matches(PROMPT).count(), 1);
    }

    #[test]
    fn empty_frame_shows_no_windows() {
        let frame = fixtures::load("chicago", "june", "all");
        let rendered = run(&frame, "y\n");
        assert!(rendered.contains("Displaying the first"));
        assert_eq!(rendered.matches(PROMPT).count(), 0);
    }
}
