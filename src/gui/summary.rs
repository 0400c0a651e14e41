//! Selection Summary Widget
//! Shows the selected rows as a table, the total predicted time, and the
//! download actions.

use crate::data::{total_predicted_time, ExportFormat, TotalError};
use egui::{Color32, RichText};
use polars::prelude::*;

/// Actions triggered by the summary panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    None,
    Export(ExportFormat),
}

/// Table-and-total area below the grid.
pub struct SummaryPanel;

impl SummaryPanel {
    /// Draw the summary for the current selection frame. The table is drawn
    /// unconditionally; an empty selection produces an empty table view and
    /// the select-a-row prompt instead of a total.
    pub fn show(ui: &mut egui::Ui, selection: &DataFrame) -> SummaryAction {
        let mut action = SummaryAction::None;

        ui.label(
            RichText::new("Filtered data will appear below 👇")
                .size(16.0)
                .strong(),
        );
        ui.add_space(8.0);

        Self::draw_selection_table(ui, selection);

        ui.add_space(8.0);

        match total_predicted_time(selection) {
            Ok(total) => {
                ui.label(format!("Total predicted time: {total}"));
            }
            Err(TotalError::EmptySelection) => {
                ui.label("Please select a refactoring operation.");
            }
            Err(err) => {
                ui.label(
                    RichText::new(format!("Error: {err}")).color(Color32::from_rgb(220, 53, 69)),
                );
            }
        }

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            for format in ExportFormat::ALL {
                if ui.button(format.button_label()).clicked() {
                    action = SummaryAction::Export(format);
                }
            }
        });

        action
    }

    fn draw_selection_table(ui: &mut egui::Ui, df: &DataFrame) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                // An empty selection serializes to a frame with no columns,
                // so there is nothing to head the table with.
                if df.width() == 0 {
                    ui.add_space(18.0);
                    return;
                }

                egui::Grid::new("selection_table")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for name in df.get_column_names() {
                            ui.label(RichText::new(name.to_string()).strong().size(11.0));
                        }
                        ui.end_row();

                        for i in 0..df.height() {
                            for col in df.get_columns() {
                                let text = col
                                    .get(i)
                                    .map(|v| v.to_string().trim_matches('"').to_string())
                                    .unwrap_or_default();
                                ui.label(RichText::new(text).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
