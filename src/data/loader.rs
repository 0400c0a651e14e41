//! Prediction CSV Loader Module
//! Loads the pipeline prediction output and projects it to the viewer columns.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default input file, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "pipeline_prediction_output.csv";

/// Columns the viewer works with, in display order. Extra input columns are
/// dropped at load time.
pub const REQUIRED_COLUMNS: [&str; 4] =
    ["predicted_time", "class_name", "refactor_destination", "class"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Input file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// One prediction as displayed in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub predicted_time: f64,
    pub class_name: String,
    pub refactor_destination: String,
    pub class: String,
}

/// Handles CSV loading and column projection with Polars.
pub struct PredictionLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for PredictionLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load the fixed-path prediction file.
    pub fn load(&mut self) -> Result<&DataFrame, LoaderError> {
        self.load_from(Path::new(DEFAULT_INPUT_PATH))
    }

    /// Load a prediction CSV and restrict it to the viewer columns,
    /// preserving file order.
    pub fn load_from(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| df.column(name).is_err())
            .map(|&name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns(missing));
        }

        let df = df.select(REQUIRED_COLUMNS)?;

        self.file_path = Some(file_path.to_path_buf());
        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Materialize the loaded frame as typed rows, in file order.
    /// `predicted_time` is cast to f64 so integer CSV cells read cleanly.
    pub fn rows(&self) -> Result<Vec<PredictionRow>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;

        let time = df.column("predicted_time")?.cast(&DataType::Float64)?;
        let time = time.f64()?;
        let class_name = df.column("class_name")?.cast(&DataType::String)?;
        let class_name = class_name.str()?;
        let destination = df.column("refactor_destination")?.cast(&DataType::String)?;
        let destination = destination.str()?;
        let class = df.column("class")?.cast(&DataType::String)?;
        let class = class.str()?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            rows.push(PredictionRow {
                predicted_time: time.get(i).unwrap_or(f64::NAN),
                class_name: class_name.get(i).unwrap_or("").to_string(),
                refactor_destination: destination.get(i).unwrap_or("").to_string(),
                class: class.get(i).unwrap_or("").to_string(),
            });
        }
        Ok(rows)
    }

    /// Get the number of rows in the loaded frame.
    pub fn row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
