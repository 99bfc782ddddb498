//! Export of trial summaries to CSV, JSON and Parquet.

use std::path::Path;

use crate::error::ExportError;
use crate::metrics::TrialSummary;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/parquet.rs"]
mod parquet;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export trial summaries to CSV, one row per trial.
///
/// # Errors
///
/// Returns an error if `summaries` is empty, or if file creation or CSV writing fails.
pub fn export_trials_to_csv(
    summaries: &[TrialSummary],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    writer_utils::ensure_not_empty(summaries)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(summaries, file)
}

/// Export trial summaries to a pretty-printed JSON array.
pub fn export_trials_to_json(
    summaries: &[TrialSummary],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(summaries, file)
}

/// Export trial summaries to Parquet.
///
/// # Errors
///
/// Returns an error if `summaries` is empty, or if batch construction or Parquet writing fails.
pub fn export_trials_to_parquet(
    summaries: &[TrialSummary],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    writer_utils::ensure_not_empty(summaries)?;
    let file = writer_utils::create_output_file(path)?;
    parquet::export_to_parquet_impl(summaries, file)
}
