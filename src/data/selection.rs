//! Selection Aggregation Module
//! Converts the grid selection into a DataFrame and sums predicted time.

use crate::data::PredictionRow;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TotalError {
    #[error("no rows selected")]
    EmptySelection,
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Build a DataFrame from the current selection, in selection order.
///
/// An empty selection yields a frame with no columns at all, not a zero-row
/// frame with the prediction columns. Downstream code relies on this shape to
/// tell "nothing selected" apart from "selected nothing matching".
pub fn selection_to_dataframe(rows: &[PredictionRow]) -> Result<DataFrame, PolarsError> {
    if rows.is_empty() {
        return Ok(DataFrame::empty());
    }

    let predicted_time: Vec<f64> = rows.iter().map(|r| r.predicted_time).collect();
    let class_name: Vec<String> = rows.iter().map(|r| r.class_name.clone()).collect();
    let destination: Vec<String> = rows
        .iter()
        .map(|r| r.refactor_destination.clone())
        .collect();
    let class: Vec<String> = rows.iter().map(|r| r.class.clone()).collect();

    DataFrame::new(vec![
        Column::new("predicted_time".into(), predicted_time),
        Column::new("class_name".into(), class_name),
        Column::new("refactor_destination".into(), destination),
        Column::new("class".into(), class),
    ])
}

/// Sum `predicted_time` over a selection frame.
///
/// A column-less frame (the empty-selection shape) is reported as
/// `EmptySelection`; any other failure surfaces as a Polars error.
pub fn total_predicted_time(df: &DataFrame) -> Result<f64, TotalError> {
    if df.width() == 0 {
        return Err(TotalError::EmptySelection);
    }

    let col = df.column("predicted_time")?.cast(&DataType::Float64)?;
    Ok(col.f64()?.sum().unwrap_or(0.0))
}
