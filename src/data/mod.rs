//! Data module - CSV loading, selection aggregation and export

mod exporter;
mod loader;
mod selection;

pub use exporter::{write_selection, ExportFormat};
pub use loader::{LoaderError, PredictionLoader, PredictionRow, DEFAULT_INPUT_PATH};
pub use selection::{selection_to_dataframe, total_predicted_time, TotalError};
