use anyhow::{anyhow, bail, Context, Result};
use arrow::{
    array::{ArrayRef, Int32Array, StringArray, TimestampSecondArray},
    compute::{cast, concat_batches},
    csv::ReaderBuilder,
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::Arc,
};
use tracing::{debug, info};

pub mod frame;
pub mod parse;

pub use frame::TripFrame;

// Source-file column names.
pub const START_TIME: &str = "Start Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

// Columns derived from the start timestamp at load time.
pub const MONTH: &str = "Month";
pub const WEEK_DAY: &str = "Week Day";
pub const START_HOUR: &str = "Start Hour";

/// City → source file. A BTreeMap so the printed city list has a stable
/// order.
static CITY_DATA: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("chicago", "chicago.csv"),
        ("new york city", "new_york_city.csv"),
        ("washington", "washington.csv"),
    ])
});

pub fn city_names() -> Vec<&'static str> {
    CITY_DATA.keys().copied().collect()
}

/// Load one city's trips, derive the month/weekday/hour columns, and narrow
/// to the requested month and weekday ("all" passes through).
///
/// A missing file or an unparseable start time is fatal; there is nothing to
/// recover to, the source files are fixed configuration.
pub fn load_city(data_dir: &Path, city: &str, month: &str, day: &str) -> Result<TripFrame> {
    let file = CITY_DATA
        .get(city)
        .ok_or_else(|| anyhow!("unknown city {:?}", city))?;
    let path = data_dir.join(file);

    let raw = read_csv(&path)?;
    let batch = with_derived_columns(&raw)?;
    let mut frame = TripFrame::new(batch);
    info!(city, rows = frame.num_rows(), "loaded dataset");

    if month != "all" {
        frame = frame.filter_eq(MONTH, &parse::title_case(month))?;
        debug!(month, rows = frame.num_rows(), "applied month filter");
    }
    if day != "all" {
        frame = frame.filter_eq(WEEK_DAY, &parse::title_case(day))?;
        debug!(day, rows = frame.num_rows(), "applied weekday filter");
    }
    Ok(frame)
}

/// Read a whole CSV file into one batch, every column as nullable Utf8.
/// Typed columns are produced afterwards so one bad cell cannot poison the
/// schema inference.
fn read_csv(path: &Path) -> Result<RecordBatch> {
    let header = {
        let file =
            File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .context("reading CSV header")?;
        line
    };
    if header.trim().is_empty() {
        bail!("{} has no header row", path.display());
    }

    let fields: Vec<Field> = header
        .trim_end()
        .split(',')
        .map(|name| Field::new(name.trim(), DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(8192)
        .build(file)
        .context("creating CSV reader")?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("reading {}", path.display()))?;
    concat_batches(&schema, &batches).context("concatenating CSV batches")
}

/// Replace the raw start-time strings with a timestamp column, cast the
/// numeric columns, and append the Month / Week Day / Start Hour columns.
fn with_derived_columns(batch: &RecordBatch) -> Result<RecordBatch> {
    let start_idx = batch
        .schema()
        .index_of(START_TIME)
        .with_context(|| format!("dataset has no {:?} column", START_TIME))?;
    let start_raw = batch
        .column(start_idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| anyhow!("{:?} column did not load as text", START_TIME))?;

    let n = batch.num_rows();
    let mut timestamps: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut months: Vec<Option<String>> = Vec::with_capacity(n);
    let mut weekdays: Vec<Option<String>> = Vec::with_capacity(n);
    let mut hours: Vec<Option<i32>> = Vec::with_capacity(n);
    for value in start_raw.iter() {
        match value {
            Some(raw) => {
                let dt = parse::parse_start_time(raw)?;
                timestamps.push(Some(dt.and_utc().timestamp()));
                months.push(Some(parse::month_name(&dt)));
                weekdays.push(Some(parse::weekday_name(&dt)));
                hours.push(Some(parse::start_hour(&dt)));
            }
            None => {
                timestamps.push(None);
                months.push(None);
                weekdays.push(None);
                hours.push(None);
            }
        }
    }
    let timestamp_col: ArrayRef = Arc::new(TimestampSecondArray::from(timestamps));

    let mut fields: Vec<Field> = Vec::with_capacity(batch.num_columns() + 3);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns() + 3);
    for (i, field) in batch.schema().fields().iter().enumerate() {
        let name = field.name().as_str();
        if i == start_idx {
            fields.push(Field::new(
                START_TIME,
                DataType::Timestamp(TimeUnit::Second, None),
                true,
            ));
            columns.push(timestamp_col.clone());
        } else if name == TRIP_DURATION || name == BIRTH_YEAR {
            // Safe cast: empty or malformed cells become null, matching the
            // aggregate kernels' skip-null behavior downstream.
            let numeric = cast(batch.column(i), &DataType::Float64)
                .with_context(|| format!("casting {:?} to float", name))?;
            fields.push(Field::new(name, DataType::Float64, true));
            columns.push(numeric);
        } else {
            fields.push(field.as_ref().clone());
            columns.push(batch.column(i).clone());
        }
    }

    fields.push(Field::new(MONTH, DataType::Utf8, true));
    columns.push(Arc::new(StringArray::from(months)) as ArrayRef);
    fields.push(Field::new(WEEK_DAY, DataType::Utf8, true));
    columns.push(Arc::new(StringArray::from(weekdays)) as ArrayRef);
    fields.push(Field::new(START_HOUR, DataType::Int32, true));
    columns.push(Arc::new(Int32Array::from(hours)) as ArrayRef);

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .context("assembling derived batch")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// Ten Chicago trips across January and February 2017. February has six
    /// rows, Sunday five, hour 9 four; Canal St starts six trips and
    /// State St ends six; durations sum to 6000.
    pub(crate) const CHICAGO_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-01-01 00:00:36,2017-01-01 00:10:36,600,Canal St,State St,Subscriber,Male,1985
2017-01-02 09:15:22,2017-01-02 09:20:22,300,Canal St,Clark St,Subscriber,Female,1990
2017-01-03 10:30:00,2017-01-03 10:37:30,450,Michigan Ave,State St,Customer,Male,
2017-01-08 17:05:10,2017-01-08 17:25:10,1200,Canal St,State St,Subscriber,Male,1985
2017-02-04 08:00:00,2017-02-04 08:03:20,200,Lake St,Canal St,Subscriber,Female,1992
2017-02-05 09:45:30,2017-02-05 09:58:50,800,Canal St,State St,Customer,Male,1985
2017-02-11 09:10:00,2017-02-11 09:15:50,350,Michigan Ave,Clark St,Subscriber,Male,1979
2017-02-12 14:20:05,2017-02-12 14:28:25,500,Lake St,State St,Subscriber,Female,1990
2017-02-18 09:59:59,2017-02-18 10:11:39,700,Canal St,Canal St,Dependent,Male,1979
2017-02-19 11:11:11,2017-02-19 11:26:11,900,Canal St,State St,Subscriber,Male,1985
";

    /// Washington files carry no Gender or Birth Year columns.
    pub(crate) const WASHINGTON_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-03-06 08:00:00,2017-03-06 08:10:00,600,14th & G St,17th & K St,Subscriber
2017-03-07 18:30:00,2017-03-07 18:45:00,900,17th & K St,14th & G St,Customer
2017-03-08 08:05:00,2017-03-08 08:12:00,420,14th & G St,Union Station,Subscriber
";

    pub(crate) fn data_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (file, contents) in [
            ("chicago.csv", CHICAGO_CSV),
            ("washington.csv", WASHINGTON_CSV),
        ] {
            let mut f = std::fs::File::create(dir.path().join(file)).unwrap();
            f.write_all(contents.as_bytes()).unwrap();
        }
        dir
    }

    pub(crate) fn load(city: &str, month: &str, day: &str) -> TripFrame {
        let dir = data_dir();
        load_city(dir.path(), city, month, day).unwrap()
    }
}
