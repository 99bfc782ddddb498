use crate::error::ExportError;
use crate::metrics::TrialSummary;

pub(crate) fn export_to_json_impl(
    summaries: &[TrialSummary],
    file: std::fs::File,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(file, summaries)?;
    Ok(())
}
