use anyhow::Result;
use bikestats::{browse, dataset, prompt, stats};
use std::{
    io::{self, BufRead, Write},
    path::Path,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // quiet by default so log lines stay out of the interactive session
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let data_dir = Path::new(".");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    writeln!(output, "Hello! Let's explore some US bikeshare data!")?;
    let cities = dataset::city_names();

    loop {
        let filters = prompt::collect_filters(
            &mut input,
            &mut output,
            &cities,
            prompt::MONTHS,
            prompt::WEEKDAYS,
        )?;
        let frame = dataset::load_city(data_dir, &filters.city, &filters.month, &filters.day)?;

        if frame.num_rows() == 0 {
            writeln!(output, "\nNo trips match the selected filters.")?;
        } else {
            stats::time::report(&frame)?;
            stats::station::report(&frame)?;
            stats::duration::report(&frame)?;
            stats::user::report(&frame, &filters.city)?;
            browse::browse(&frame, &mut input, &mut output)?;
        }

        writeln!(output, "\nWould you like to restart? Enter yes or no.")?;
        output.flush()?;
        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            break;
        }
        if !answer.trim().eq_ignore_ascii_case("yes") {
            break;
        }
    }

    info!("session ended");
    Ok(())
}
