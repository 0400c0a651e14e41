//! Selection Export Module
//! Writes the selected predictions to disk as CSV.

use anyhow::Context;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Default name offered in the save dialog.
pub const EXPORT_FILE_NAME: &str = "File.csv";

/// The two download actions offered below the grid.
///
/// Both actions emit the same CSV payload under the same default file name;
/// the TXT label does not change the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Txt];

    pub fn button_label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "Download to CSV",
            ExportFormat::Txt => "Download to TXT",
        }
    }

    pub fn file_name(self) -> &'static str {
        EXPORT_FILE_NAME
    }
}

/// Write a selection frame to `path` as comma-separated text with a header
/// row. Used by both download actions.
pub fn write_selection(df: &DataFrame, path: &Path) -> anyhow::Result<()> {
    let mut df = df.clone();
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{selection_to_dataframe, PredictionRow};

    fn row(time: f64, name: &str, dest: &str, class: &str) -> PredictionRow {
        PredictionRow {
            predicted_time: time,
            class_name: name.to_string(),
            refactor_destination: dest.to_string(),
            class: class.to_string(),
        }
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let rows = vec![
            row(5.0, "Foo", "ServiceA", "X"),
            row(3.0, "Bar", "ServiceB", "Y"),
        ];
        let df = selection_to_dataframe(&rows).unwrap();

        write_selection(&df, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "predicted_time,class_name,refactor_destination,class"
        );
        assert_eq!(lines[1], "5.0,Foo,ServiceA,X");
        assert_eq!(lines[2], "3.0,Bar,ServiceB,Y");
    }

    #[test]
    fn test_both_actions_share_name_and_payload() {
        assert_eq!(ExportFormat::Csv.file_name(), ExportFormat::Txt.file_name());

        let dir = tempfile::tempdir().unwrap();
        let rows = vec![row(5.0, "Foo", "ServiceA", "X")];
        let df = selection_to_dataframe(&rows).unwrap();

        let csv_path = dir.path().join("csv_action.csv");
        let txt_path = dir.path().join("txt_action.csv");
        write_selection(&df, &csv_path).unwrap();
        write_selection(&df, &txt_path).unwrap();

        let csv_bytes = std::fs::read(&csv_path).unwrap();
        let txt_bytes = std::fs::read(&txt_path).unwrap();
        assert_eq!(csv_bytes, txt_bytes);
    }

    #[test]
    fn test_button_labels_differ() {
        assert_eq!(ExportFormat::Csv.button_label(), "Download to CSV");
        assert_eq!(ExportFormat::Txt.button_label(), "Download to TXT");
    }
}
