//! GUI module - User interface components

mod app;
mod grid;
mod summary;

pub use app::ResultsApp;
pub use grid::PredictionGrid;
pub use summary::{SummaryAction, SummaryPanel};
