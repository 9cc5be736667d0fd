//! Table formatting utilities for CLI output.

use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Outcome of building one document.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Document path as given on the command line.
    pub path: String,
    /// Number of elements in the built tree, when the build succeeded.
    pub elements: Option<usize>,
    /// Error kind, for expansion and build failures.
    pub kind: Option<String>,
    /// Error message, when the build failed.
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Format check results as a table.
pub fn format_check_table(reports: &[FileReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Document", "Status", "Elements", "Error"]);

    for report in reports {
        let status = if report.is_ok() {
            Cell::new("ok").fg(Color::Green)
        } else {
            Cell::new("failed").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&report.path),
            status,
            Cell::new(report.elements.map_or_else(|| "-".to_string(), |n| n.to_string())),
            Cell::new(report.kind.as_deref().unwrap_or("")),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_row_per_report() {
        let reports = vec![
            FileReport {
                path: "ok.yaml".to_string(),
                elements: Some(4),
                kind: None,
                error: None,
            },
            FileReport {
                path: "bad.yaml".to_string(),
                elements: None,
                kind: Some("missing required field".to_string()),
                error: Some("required field 'items' not found".to_string()),
            },
        ];
        let table = format_check_table(&reports);
        assert_eq!(table.row_iter().count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("ok.yaml"));
        assert!(rendered.contains("missing required field"));
    }
}
