use crate::error::ExportError;
use crate::metrics::TrialSummary;

pub(crate) fn export_to_csv_impl(
    summaries: &[TrialSummary],
    file: std::fs::File,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record(["seed", "treated", "control", "naive_ratio", "ground_truth"])?;

    for summary in summaries {
        wtr.write_record([
            summary.seed.to_string(),
            summary.treated.to_string(),
            summary.control.to_string(),
            summary.naive_ratio.to_string(),
            summary.ground_truth.to_string(),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
