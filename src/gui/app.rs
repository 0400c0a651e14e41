//! RefactorScope Main Application
//! Banner, prediction grid, selection summary and export handling.

use crate::data::{
    selection_to_dataframe, write_selection, ExportFormat, LoaderError, PredictionLoader,
    PredictionRow, DEFAULT_INPUT_PATH,
};
use crate::gui::{PredictionGrid, SummaryAction, SummaryPanel};
use egui::{Color32, RichText, SidePanel, TopBottomPanel};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

const TIP_TEXT: &str =
    "💡 Tip! Hold the shift key when selecting rows to select multiple rows at once!";

/// Main application window.
pub struct ResultsApp {
    loader: PredictionLoader,
    rows: Vec<PredictionRow>,
    grid: PredictionGrid,
    load_error: Option<String>,
    status: String,
    last_export: Option<PathBuf>,
}

impl ResultsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: PredictionLoader::new(),
            rows: Vec::new(),
            grid: PredictionGrid::default(),
            load_error: None,
            status: String::new(),
            last_export: None,
        };
        app.reload(Path::new(DEFAULT_INPUT_PATH));
        app
    }

    fn load_rows(&mut self, path: &Path) -> Result<Vec<PredictionRow>, LoaderError> {
        self.loader.load_from(path)?;
        self.loader.rows()
    }

    /// Re-read a prediction file. On failure the grid is not rendered until
    /// a load succeeds.
    fn reload(&mut self, path: &Path) {
        match self.load_rows(path) {
            Ok(rows) => {
                info!(rows = rows.len(), path = %path.display(), "loaded predictions");
                self.rows = rows;
                self.grid.clear_selection();
                self.load_error = None;
                self.status = format!(
                    "Loaded {} rows from {}",
                    self.loader.row_count(),
                    path.display()
                );
            }
            Err(err) => {
                error!(path = %path.display(), %err, "failed to load predictions");
                self.load_error = Some(err.to_string());
            }
        }
    }

    /// Handle prediction file selection
    fn handle_browse(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.reload(&path);
        }
    }

    fn handle_reload(&mut self) {
        let path = self
            .loader
            .file_path()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));
        self.reload(&path);
    }

    /// Handle a download action. Both actions write the same CSV payload
    /// under the same suggested file name.
    fn handle_export(&mut self, format: ExportFormat, selection: &[PredictionRow]) {
        let df = match selection_to_dataframe(selection) {
            Ok(df) => df,
            Err(err) => {
                self.status = format!("Export error: {err}");
                return;
            }
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(format.file_name())
            .save_file()
        else {
            return; // User cancelled
        };

        match write_selection(&df, &path) {
            Ok(()) => {
                info!(rows = df.height(), path = %path.display(), "exported selection");
                self.status = format!("Exported {} rows to {}", df.height(), path.display());
                self.last_export = Some(path);
            }
            Err(err) => {
                error!(%err, "selection export failed");
                self.status = format!("Export error: {err}");
            }
        }
    }

    fn draw_banner(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::Frame::none()
                .fill(Color32::from_rgb(33, 68, 41))
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(TIP_TEXT)
                            .size(13.0)
                            .color(Color32::from_rgb(130, 201, 149)),
                    );
                });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.grid.config.side_bar {
                    ui.toggle_value(&mut self.grid.tools_open, "🛠 Tools");
                }
                if ui.button("⟳ Reload").clicked() {
                    self.handle_reload();
                }
                if ui.button("📂 Open CSV…").clicked() {
                    self.handle_browse();
                }
            });
        });
    }

    fn draw_status_line(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(path) = self.last_export.clone() {
                    if ui.small_button("Open last export").clicked() {
                        if let Err(err) = open::that(&path) {
                            warn!(path = %path.display(), %err, "could not open exported file");
                            self.status = format!("Could not open {}: {err}", path.display());
                        }
                    }
                }
            });
        });
    }
}

impl eframe::App for ResultsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("banner").show(ctx, |ui| {
            ui.add_space(4.0);
            self.draw_banner(ui);
            ui.add_space(4.0);
        });

        TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.add_space(2.0);
            self.draw_status_line(ui);
            ui.add_space(2.0);
        });

        // Load failure is fatal for the render pass: no grid, no summary.
        if let Some(err) = self.load_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Error: {err}"))
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
            });
            return;
        }

        if self.grid.config.side_bar {
            SidePanel::right("grid_tools")
                .min_width(220.0)
                .max_width(280.0)
                .show_animated(ctx, self.grid.tools_open, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.grid.show_tools(ui);
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("results_page")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let selection = self.grid.show(ui, &self.rows);

                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(10.0);

                    match selection_to_dataframe(&selection) {
                        Ok(df) => {
                            if let SummaryAction::Export(format) = SummaryPanel::show(ui, &df) {
                                self.handle_export(format, &selection);
                            }
                        }
                        Err(err) => {
                            ui.label(
                                RichText::new(format!("Error: {err}"))
                                    .color(Color32::from_rgb(220, 53, 69)),
                            );
                        }
                    }
                });
        });
    }
}
