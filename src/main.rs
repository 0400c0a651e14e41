//! RefactorScope - Refactoring Prediction Results Viewer
//!
//! A Rust application for reviewing pipeline refactoring predictions,
//! selecting rows of interest and exporting them.

mod data;
mod gui;

use eframe::egui;
use gui::ResultsApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("RefactorScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "RefactorScope",
        options,
        Box::new(|cc| Ok(Box::new(ResultsApp::new(cc)))),
    )
}
