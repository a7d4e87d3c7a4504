//! Results Grid Module
//!
//! Renders query results as an aligned text table, one line per row, with an
//! optional leading `(index)` column counting rows from zero.

use crate::core::db::QueryResult;

const INDEX_HEADER: &str = "(index)";

/// A table of display strings ready to be printed.
#[derive(Debug, Clone)]
pub struct ResultsGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub show_index: bool,
}

impl ResultsGrid {
    /// Builds an indexed grid from a query result.
    pub fn from_result(result: &QueryResult) -> Self {
        ResultsGrid {
            headers: result.columns.clone(),
            rows: result.display_rows(),
            show_index: true,
        }
    }

    fn header_cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.headers.len() + 1);
        if self.show_index {
            cells.push(INDEX_HEADER.to_string());
        }
        cells.extend(self.headers.iter().cloned());
        cells
    }

    fn row_cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut cells = Vec::with_capacity(row.len() + 1);
                if self.show_index {
                    cells.push(i.to_string());
                }
                cells.extend(row.iter().cloned());
                cells
            })
            .collect()
    }

    /// Renders headers, an underline and every row with aligned columns.
    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let headers = self.header_cells();
        let rows = self.row_cells();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let mut output = String::new();
        output.push_str(&render_line(&headers, &widths));
        output.push('\n');
        let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&underline.join("-|-"));
        output.push('\n');
        for row in &rows {
            output.push_str(&render_line(row, &widths));
            output.push('\n');
        }
        output
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{:<width$}", cell, width = *width)
        })
        .collect();
    padded.join(" | ").trim_end().to_string()
}
