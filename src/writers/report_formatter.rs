use crate::error::{ProcessingError, Result};
use crate::models::{AggregateTable, StationSummary};

/// Station summaries sorted by the byte order of their decoded names.
///
/// Fails with [`ProcessingError::EmptyResult`] when the table is empty.
pub fn sorted_summaries(table: &AggregateTable) -> Result<Vec<StationSummary>> {
    if table.is_empty() {
        return Err(ProcessingError::EmptyResult);
    }

    let mut summaries: Vec<StationSummary> = table
        .iter()
        .map(|(key, aggregate)| StationSummary::new(key, aggregate))
        .collect();
    summaries.sort_by(|a, b| a.station.cmp(&b.station));

    Ok(summaries)
}

/// Render `{name=min/mean/max, ...}` with one fractional digit per number.
///
/// # Examples
/// ```
/// use station_aggregator::processors::ParallelProcessor;
/// use station_aggregator::writers::format_report;
///
/// let outcome = ParallelProcessor::new(1).process(b"X;-5.5\nX;4.5\n", None).unwrap();
/// assert_eq!(format_report(&outcome.table).unwrap(), "{X=-5.5/-0.5/4.5}");
/// ```
pub fn format_report(table: &AggregateTable) -> Result<String> {
    let entries: Vec<String> = sorted_summaries(table)?
        .iter()
        .map(StationSummary::report_entry)
        .collect();

    Ok(format!("{{{}}}", entries.join(", ")))
}
