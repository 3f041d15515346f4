//! CSV report output.
//!
//! One row per watchlist with its execution time and cost indicators. The
//! column names and the `True`/`False` spelling are kept stable so existing
//! spreadsheets and filters keep working across runs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::cost::CostIndicators;
use crate::error::Result;
use crate::watchlist::WatchlistRecord;

/// Report header, in column order
pub const HEADER: [&str; 7] = [
    "Query",
    "ExecutionTime",
    "NumberofWildcard",
    "WildcardwithFilemod",
    "WildcardwithModload",
    "EqualOperator",
    "NumberofOROperator",
];

const EXTENSION: &str = "csv";
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// A classified watchlist, ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub query: String,
    pub execution_time_ms: Option<u64>,
    pub cost: CostIndicators,
}

impl ReportRow {
    /// Classify a record's query.
    pub fn from_record(record: &WatchlistRecord) -> Self {
        Self {
            query: record.query.clone(),
            execution_time_ms: record.execution_time_ms,
            cost: CostIndicators::classify(&record.query),
        }
    }

    fn fields(&self) -> [String; 7] {
        [
            self.query.clone(),
            self.execution_time_ms
                .map(|ms| ms.to_string())
                .unwrap_or_default(),
            self.cost.wildcard_count.to_string(),
            flag(self.cost.has_filemod_wildcard).into(),
            flag(self.cost.has_modload_wildcard).into(),
            flag(self.cost.has_equality_operator).into(),
            self.cost.or_operator_count.to_string(),
        ]
    }
}

/// Write the header and every row.
pub fn write_report<W: Write>(writer: W, rows: &[ReportRow]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv.write_record(HEADER)?;
    for row in rows {
        csv.write_record(row.fields())?;
    }
    csv.flush()?;
    Ok(())
}

/// Create `path`, and its parent directory if missing, for writing.
pub fn create_report_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// `<dir>/<prefix><YYYYmmdd-HHMMSS>.csv`
pub fn default_report_path<Tz>(dir: &Path, prefix: &str, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    dir.join(format!(
        "{prefix}{}.{EXTENSION}",
        now.format(TIMESTAMP_FORMAT)
    ))
}

fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
