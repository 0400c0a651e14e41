//! Prediction Grid Widget
//! Interactive table over the loaded predictions: sorting, per-column
//! filters, optional row grouping, and checkbox multi-selection.

use crate::data::PredictionRow;
use egui::{CollapsingHeader, ComboBox, RichText};
use std::collections::HashSet;

/// The four grid columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridColumn {
    PredictedTime,
    ClassName,
    RefactorDestination,
    Class,
}

impl GridColumn {
    pub const ALL: [GridColumn; 4] = [
        GridColumn::PredictedTime,
        GridColumn::ClassName,
        GridColumn::RefactorDestination,
        GridColumn::Class,
    ];

    /// Column name as it appears in the input file and the grid header.
    pub fn field(self) -> &'static str {
        match self {
            GridColumn::PredictedTime => "predicted_time",
            GridColumn::ClassName => "class_name",
            GridColumn::RefactorDestination => "refactor_destination",
            GridColumn::Class => "class",
        }
    }

    /// Cell text for a row.
    pub fn value_text(self, row: &PredictionRow) -> String {
        match self {
            GridColumn::PredictedTime => format!("{}", row.predicted_time),
            GridColumn::ClassName => row.class_name.clone(),
            GridColumn::RefactorDestination => row.refactor_destination.clone(),
            GridColumn::Class => row.class.clone(),
        }
    }
}

/// Per-column capabilities. Pivot and value aggregation are configured on
/// but have no consumer in the current UI; only `enable_row_group` feeds the
/// grid tools.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub column: GridColumn,
    #[allow(dead_code)]
    pub enable_pivot: bool,
    #[allow(dead_code)]
    pub enable_value: bool,
    pub enable_row_group: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multiple,
}

/// Explicit grid configuration record. The default mirrors the results view:
/// all column capabilities on, checkbox multi-selection, side bar enabled,
/// columns fit to the available width on load.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub columns: Vec<ColumnSpec>,
    pub selection_mode: SelectionMode,
    pub use_checkbox: bool,
    pub side_bar: bool,
    pub fit_columns_on_load: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: GridColumn::ALL
                .iter()
                .map(|&column| ColumnSpec {
                    column,
                    enable_pivot: true,
                    enable_value: true,
                    enable_row_group: true,
                })
                .collect(),
            selection_mode: SelectionMode::Multiple,
            use_checkbox: true,
            side_bar: true,
            fit_columns_on_load: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: GridColumn,
    pub ascending: bool,
}

/// Stateful prediction grid. Row ids are indices into the loaded table, so
/// the selection always refers to loaded rows, never synthesized ones.
pub struct PredictionGrid {
    pub config: GridConfig,
    filters: Vec<String>,
    hidden: HashSet<GridColumn>,
    sort: Option<SortSpec>,
    group_by: Option<GridColumn>,
    selected: HashSet<usize>,
    anchor: Option<usize>,
    pub tools_open: bool,
}

impl Default for PredictionGrid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl PredictionGrid {
    pub fn new(config: GridConfig) -> Self {
        let filters = vec![String::new(); config.columns.len()];
        Self {
            config,
            filters,
            hidden: HashSet::new(),
            sort: None,
            group_by: None,
            selected: HashSet::new(),
            anchor: None,
            tools_open: false,
        }
    }

    /// Drop the selection and range anchor, e.g. after a reload.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    fn visible_columns(&self) -> Vec<GridColumn> {
        self.config
            .columns
            .iter()
            .map(|spec| spec.column)
            .filter(|column| !self.hidden.contains(column))
            .collect()
    }

    fn matches_filters(&self, row: &PredictionRow) -> bool {
        self.config
            .columns
            .iter()
            .zip(self.filters.iter())
            .all(|(spec, filter)| {
                let filter = filter.trim();
                filter.is_empty()
                    || spec
                        .column
                        .value_text(row)
                        .to_lowercase()
                        .contains(&filter.to_lowercase())
            })
    }

    /// Row ids visible in the grid, in view order: filters applied, then the
    /// active sort, then grouping. Both sorts are stable with respect to
    /// file order.
    pub fn view_indices(&self, rows: &[PredictionRow]) -> Vec<usize> {
        let mut view: Vec<usize> = (0..rows.len())
            .filter(|&i| self.matches_filters(&rows[i]))
            .collect();

        if let Some(sort) = self.sort {
            view.sort_by(|&a, &b| {
                let ord = match sort.column {
                    GridColumn::PredictedTime => {
                        rows[a].predicted_time.total_cmp(&rows[b].predicted_time)
                    }
                    GridColumn::ClassName => rows[a].class_name.cmp(&rows[b].class_name),
                    GridColumn::RefactorDestination => rows[a]
                        .refactor_destination
                        .cmp(&rows[b].refactor_destination),
                    GridColumn::Class => rows[a].class.cmp(&rows[b].class),
                };
                if sort.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        if let Some(group) = self.group_by {
            view.sort_by(|&a, &b| group.value_text(&rows[a]).cmp(&group.value_text(&rows[b])));
        }

        view
    }

    /// The current selection as seen through the view: rows hidden by a
    /// filter are excluded, order is view order.
    pub fn selected_rows(&self, rows: &[PredictionRow], view: &[usize]) -> Vec<PredictionRow> {
        view.iter()
            .filter(|i| self.selected.contains(i))
            .map(|&i| rows[i].clone())
            .collect()
    }

    /// Cycle a column header: ascending, descending, unsorted.
    fn toggle_sort(&mut self, column: GridColumn) {
        self.sort = match self.sort {
            Some(sort) if sort.column == column && sort.ascending => Some(SortSpec {
                column,
                ascending: false,
            }),
            Some(sort) if sort.column == column => None,
            _ => Some(SortSpec {
                column,
                ascending: true,
            }),
        };
    }

    /// Toggle one row. With shift held, selects the contiguous view-order
    /// range between the last toggled row and this one.
    fn toggle_row(&mut self, view: &[usize], row_id: usize, shift: bool) {
        match self.config.selection_mode {
            SelectionMode::Single => {
                self.selected.clear();
                self.selected.insert(row_id);
            }
            SelectionMode::Multiple => {
                let range = if shift {
                    let anchor = self
                        .anchor
                        .and_then(|a| view.iter().position(|&i| i == a));
                    let clicked = view.iter().position(|&i| i == row_id);
                    match (anchor, clicked) {
                        (Some(a), Some(b)) => Some((a.min(b), a.max(b))),
                        _ => None,
                    }
                } else {
                    None
                };

                if let Some((lo, hi)) = range {
                    for &i in &view[lo..=hi] {
                        self.selected.insert(i);
                    }
                } else if !self.selected.remove(&row_id) {
                    self.selected.insert(row_id);
                }
                self.anchor = Some(row_id);
            }
        }
    }

    /// Draw the grid and return the current selection in view order.
    pub fn show(&mut self, ui: &mut egui::Ui, rows: &[PredictionRow]) -> Vec<PredictionRow> {
        let view = self.view_indices(rows);
        let visible = self.visible_columns();
        let shift = ui.input(|input| input.modifiers.shift);

        if rows.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return Vec::new();
        }

        let spacing_x = ui.spacing().item_spacing.x;
        let ncols = visible.len() + usize::from(self.config.use_checkbox);
        let min_col_width = if self.config.fit_columns_on_load && ncols > 0 {
            ((ui.available_width() - spacing_x * (ncols as f32 + 1.0)) / ncols as f32).max(60.0)
        } else {
            80.0
        };

        egui::ScrollArea::vertical()
            .id_salt("prediction_grid_scroll")
            .max_height(340.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if let Some(group) = self.group_by {
                    self.draw_header_grid(ui, &view, &visible, min_col_width);
                    self.draw_grouped_rows(ui, rows, &view, &visible, min_col_width, group, shift);
                } else {
                    egui::Grid::new("prediction_grid_table")
                        .striped(true)
                        .min_col_width(min_col_width)
                        .spacing([8.0, 4.0])
                        .show(ui, |ui| {
                            self.draw_header_row(ui, &view, &visible);
                            for &i in &view {
                                self.draw_row(ui, rows, i, &view, &visible, shift);
                            }
                        });
                }
            });

        self.selected_rows(rows, &view)
    }

    fn draw_header_grid(
        &mut self,
        ui: &mut egui::Ui,
        view: &[usize],
        visible: &[GridColumn],
        min_col_width: f32,
    ) {
        egui::Grid::new("prediction_grid_header")
            .min_col_width(min_col_width)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                self.draw_header_row(ui, view, visible);
            });
    }

    fn draw_header_row(&mut self, ui: &mut egui::Ui, view: &[usize], visible: &[GridColumn]) {
        if self.config.use_checkbox {
            let mut all = !view.is_empty() && view.iter().all(|i| self.selected.contains(i));
            if ui.checkbox(&mut all, "").changed() {
                if all {
                    self.selected.extend(view.iter().copied());
                } else {
                    for i in view {
                        self.selected.remove(i);
                    }
                }
            }
        }

        for &column in visible {
            let indicator = match self.sort {
                Some(sort) if sort.column == column && sort.ascending => " ▲",
                Some(sort) if sort.column == column => " ▼",
                _ => "",
            };
            let sorted = self.sort.map(|s| s.column) == Some(column);
            let label = RichText::new(format!("{}{}", column.field(), indicator))
                .strong()
                .size(12.0);
            if ui.selectable_label(sorted, label).clicked() {
                self.toggle_sort(column);
            }
        }
        ui.end_row();
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_grouped_rows(
        &mut self,
        ui: &mut egui::Ui,
        rows: &[PredictionRow],
        view: &[usize],
        visible: &[GridColumn],
        min_col_width: f32,
        group: GridColumn,
        shift: bool,
    ) {
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for &i in view {
            let key = group.value_text(&rows[i]);
            match groups.last_mut() {
                Some((last, ids)) if *last == key => ids.push(i),
                _ => groups.push((key, vec![i])),
            }
        }

        for (key, ids) in groups {
            CollapsingHeader::new(
                RichText::new(format!("{}: {} ({})", group.field(), key, ids.len())).size(12.0),
            )
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new(format!("prediction_grid_group_{key}"))
                    .striped(true)
                    .min_col_width(min_col_width)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for &i in &ids {
                            self.draw_row(ui, rows, i, view, visible, shift);
                        }
                    });
            });
        }
    }

    fn draw_row(
        &mut self,
        ui: &mut egui::Ui,
        rows: &[PredictionRow],
        row_id: usize,
        view: &[usize],
        visible: &[GridColumn],
        shift: bool,
    ) {
        if self.config.use_checkbox {
            let mut checked = self.selected.contains(&row_id);
            if ui.checkbox(&mut checked, "").changed() {
                self.toggle_row(view, row_id, shift);
            }
        }
        for &column in visible {
            ui.label(RichText::new(column.value_text(&rows[row_id])).size(12.0));
        }
        ui.end_row();
    }

    /// Side-panel grid tools: per-column filters, column visibility, and row
    /// grouping for the columns that allow it.
    pub fn show_tools(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("🛠 Grid Tools").size(14.0).strong());
        ui.add_space(5.0);
        ui.separator();

        CollapsingHeader::new("Filters")
            .default_open(true)
            .show(ui, |ui| {
                for (i, spec) in self.config.columns.iter().enumerate() {
                    ui.label(RichText::new(spec.column.field()).size(11.0));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.filters[i]).hint_text("contains..."),
                    );
                    ui.add_space(4.0);
                }
                if ui.small_button("Clear filters").clicked() {
                    for filter in &mut self.filters {
                        filter.clear();
                    }
                }
            });

        ui.add_space(5.0);

        CollapsingHeader::new("Columns")
            .default_open(false)
            .show(ui, |ui| {
                for spec in &self.config.columns {
                    let mut visible = !self.hidden.contains(&spec.column);
                    if ui.checkbox(&mut visible, spec.column.field()).changed() {
                        if visible {
                            self.hidden.remove(&spec.column);
                        } else {
                            self.hidden.insert(spec.column);
                        }
                    }
                }
            });

        ui.add_space(5.0);

        let groupable: Vec<GridColumn> = self
            .config
            .columns
            .iter()
            .filter(|spec| spec.enable_row_group)
            .map(|spec| spec.column)
            .collect();
        if !groupable.is_empty() {
            CollapsingHeader::new("Row Groups")
                .default_open(false)
                .show(ui, |ui| {
                    ComboBox::from_id_salt("group_by")
                        .selected_text(self.group_by.map(|c| c.field()).unwrap_or("(none)"))
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(self.group_by.is_none(), "(none)")
                                .clicked()
                            {
                                self.group_by = None;
                            }
                            for column in &groupable {
                                if ui
                                    .selectable_label(self.group_by == Some(*column), column.field())
                                    .clicked()
                                {
                                    self.group_by = Some(*column);
                                }
                            }
                        });
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: f64, name: &str, dest: &str, class: &str) -> PredictionRow {
        PredictionRow {
            predicted_time: time,
            class_name: name.to_string(),
            refactor_destination: dest.to_string(),
            class: class.to_string(),
        }
    }

    fn sample_rows() -> Vec<PredictionRow> {
        vec![
            row(5.0, "Foo", "ServiceA", "X"),
            row(3.0, "Bar", "ServiceB", "Y"),
            row(7.5, "Baz", "ServiceA", "X"),
            row(1.0, "Qux", "ServiceC", "Z"),
        ]
    }

    #[test]
    fn test_default_config_matches_results_view() {
        let config = GridConfig::default();
        assert_eq!(config.selection_mode, SelectionMode::Multiple);
        assert!(config.use_checkbox);
        assert!(config.side_bar);
        assert!(config.fit_columns_on_load);
        assert_eq!(config.columns.len(), 4);
        assert!(config.columns.iter().all(|spec| spec.enable_row_group));
    }

    #[test]
    fn test_view_defaults_to_file_order() {
        let grid = PredictionGrid::default();
        let rows = sample_rows();
        assert_eq!(grid.view_indices(&rows), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sort_cycles_and_orders_numerically() {
        let mut grid = PredictionGrid::default();
        let rows = sample_rows();

        grid.toggle_sort(GridColumn::PredictedTime);
        assert_eq!(grid.view_indices(&rows), vec![3, 1, 0, 2]);

        grid.toggle_sort(GridColumn::PredictedTime);
        assert_eq!(grid.view_indices(&rows), vec![2, 0, 1, 3]);

        grid.toggle_sort(GridColumn::PredictedTime);
        assert_eq!(grid.view_indices(&rows), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_filter_narrows_view() {
        let mut grid = PredictionGrid::default();
        let rows = sample_rows();

        // filter on refactor_destination
        grid.filters[2] = "servicea".to_string();
        assert_eq!(grid.view_indices(&rows), vec![0, 2]);
    }

    #[test]
    fn test_selection_follows_filtered_and_sorted_view() {
        let mut grid = PredictionGrid::default();
        let rows = sample_rows();

        let view = grid.view_indices(&rows);
        grid.toggle_row(&view, 0, false);
        grid.toggle_row(&view, 2, false);

        // Sort descending by predicted_time: Baz (7.5) now precedes Foo (5.0)
        grid.toggle_sort(GridColumn::PredictedTime);
        grid.toggle_sort(GridColumn::PredictedTime);
        let view = grid.view_indices(&rows);
        let selected = grid.selected_rows(&rows, &view);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].class_name, "Baz");
        assert_eq!(selected[1].class_name, "Foo");

        // Filtering Foo out removes it from the reported selection
        grid.filters[1] = "ba".to_string();
        let view = grid.view_indices(&rows);
        let selected = grid.selected_rows(&rows, &view);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].class_name, "Baz");
    }

    #[test]
    fn test_shift_click_selects_contiguous_range() {
        let mut grid = PredictionGrid::default();
        let rows = sample_rows();
        let view = grid.view_indices(&rows);

        grid.toggle_row(&view, 0, false);
        grid.toggle_row(&view, 3, true);

        let selected = grid.selected_rows(&rows, &view);
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn test_shift_range_respects_view_order() {
        let mut grid = PredictionGrid::default();
        let rows = sample_rows();

        // Ascending by predicted_time: view is Qux, Bar, Foo, Baz
        grid.toggle_sort(GridColumn::PredictedTime);
        let view = grid.view_indices(&rows);

        grid.toggle_row(&view, 3, false); // Qux, first in view
        grid.toggle_row(&view, 0, true); // Foo, third in view

        let selected = grid.selected_rows(&rows, &view);
        let names: Vec<&str> = selected.iter().map(|r| r.class_name.as_str()).collect();
        assert_eq!(names, vec!["Qux", "Bar", "Foo"]);
    }

    #[test]
    fn test_toggle_twice_deselects() {
        let mut grid = PredictionGrid::default();
        let rows = sample_rows();
        let view = grid.view_indices(&rows);

        grid.toggle_row(&view, 1, false);
        assert_eq!(grid.selected_rows(&rows, &view).len(), 1);
        grid.toggle_row(&view, 1, false);
        assert!(grid.selected_rows(&rows, &view).is_empty());
    }

    #[test]
    fn test_single_mode_keeps_one_row() {
        let mut grid = PredictionGrid::new(GridConfig {
            selection_mode: SelectionMode::Single,
            ..GridConfig::default()
        });
        let rows = sample_rows();
        let view = grid.view_indices(&rows);

        grid.toggle_row(&view, 0, false);
        grid.toggle_row(&view, 2, false);

        let selected = grid.selected_rows(&rows, &view);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].class_name, "Baz");
    }

    #[test]
    fn test_grouping_keeps_groups_contiguous() {
        let mut grid = PredictionGrid::default();
        let rows = sample_rows();

        grid.group_by = Some(GridColumn::RefactorDestination);
        let view = grid.view_indices(&rows);
        let dests: Vec<&str> = view
            .iter()
            .map(|&i| rows[i].refactor_destination.as_str())
            .collect();
        assert_eq!(dests, vec!["ServiceA", "ServiceA", "ServiceB", "ServiceC"]);
    }

    #[test]
    fn test_clear_selection_resets_anchor() {
        let mut grid = PredictionGrid::default();
        let rows = sample_rows();
        let view = grid.view_indices(&rows);

        grid.toggle_row(&view, 0, false);
        grid.clear_selection();
        assert!(grid.selected_rows(&rows, &view).is_empty());

        // Shift-click with no anchor falls back to a plain toggle
        grid.toggle_row(&view, 2, true);
        assert_eq!(grid.selected_rows(&rows, &view).len(), 1);
    }
}
