use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::ExportError;
use crate::metrics::TrialSummary;

pub(crate) fn export_to_parquet_impl(
    summaries: &[TrialSummary],
    file: std::fs::File,
) -> Result<(), ExportError> {
    let batch = build_record_batch(summaries)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn build_record_batch(
    summaries: &[TrialSummary],
) -> Result<RecordBatch, arrow::error::ArrowError> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("seed", DataType::UInt64, false),
        Field::new("treated", DataType::Float64, false),
        Field::new("control", DataType::Float64, false),
        Field::new("naive_ratio", DataType::Float64, false),
        Field::new("ground_truth", DataType::Float64, false),
    ]));

    let column = |f: fn(&TrialSummary) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(summaries.iter().map(f).collect::<Vec<_>>()))
    };

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(
            summaries.iter().map(|s| s.seed).collect::<Vec<_>>(),
        )),
        column(|s| s.treated),
        column(|s| s.control),
        column(|s| s.naive_ratio),
        column(|s| s.ground_truth),
    ];

    RecordBatch::try_new(schema, arrays)
}
