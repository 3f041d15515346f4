//! Fetch → classify → report pipeline.

use std::io::Write;

use crate::error::Result;
use crate::report::{self, ReportRow};
use crate::watchlist::{WatchlistRecord, WatchlistSource};

/// Knobs for a single scan
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Skip disabled watchlists
    pub enabled_only: bool,
}

/// Counts logged at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Watchlists returned by the server
    pub fetched: usize,
    /// Rows written to the report
    pub reported: usize,
    /// Reported rows with at least one cost indicator set
    pub flagged: usize,
}

/// Classify records in order, optionally dropping disabled ones.
pub fn classify_records(records: &[WatchlistRecord], options: ScanOptions) -> Vec<ReportRow> {
    records
        .iter()
        .filter(|r| !options.enabled_only || r.enabled)
        .map(|r| {
            let row = ReportRow::from_record(r);
            tracing::debug!(watchlist = %r.name, "{}", row.cost);
            row
        })
        .collect()
}

/// Run a full scan against `source` and write the CSV.
///
/// `open` is only called once the fetch has succeeded, so a failed run
/// never leaves an empty report behind.
pub fn run<S, F, W>(source: &S, options: ScanOptions, open: F) -> Result<ScanSummary>
where
    S: WatchlistSource + ?Sized,
    F: FnOnce() -> Result<W>,
    W: Write,
{
    let records = source.fetch_watchlists()?;
    let rows = classify_records(&records, options);
    report::write_report(open()?, &rows)?;

    Ok(ScanSummary {
        fetched: records.len(),
        reported: rows.len(),
        flagged: rows.iter().filter(|r| r.cost.is_flagged()).count(),
    })
}
