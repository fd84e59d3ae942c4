//! ui::table
//!
//! Box-drawn tables for the `status` and `list` reports.
//!
//! Column widths are computed from the plain cell text; styling is applied
//! after padding so escape codes never skew the layout.
//!
//! # Example
//!
//! ```
//! use statrepos::ui::table::{Cell, Table};
//!
//! let mut table = Table::new(["ID", "Path"]);
//! table.push_row(vec![Cell::plain("0"), Cell::plain("/src/app")]);
//!
//! let rendered = table.render(false);
//! assert!(rendered.contains("│ 0  │ /src/app │"));
//! ```

use owo_colors::{OwoColorize, Style};

use crate::core::types::RepositoryEntry;
use crate::engine::StatusReport;

use super::output::state_style;

/// A table cell with optional styling.
#[derive(Debug, Clone)]
pub struct Cell {
    text: String,
    style: Option<Style>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// A simple bordered table.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty; extra cells are dropped.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(Cell::width)
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table. When `color` is set, styled cells and the header
    /// are colored.
    pub fn render(&self, color: bool) -> String {
        let widths = self.widths();
        let mut out = String::new();

        out.push_str(&border(&widths, '┌', '┬', '┐'));
        out.push('\n');

        let header_cells: Vec<Cell> = self
            .headers
            .iter()
            .map(|h| Cell::styled(h.clone(), Style::new().bold()))
            .collect();
        out.push_str(&line(&header_cells, &widths, color));
        out.push('\n');

        if !self.rows.is_empty() {
            out.push_str(&border(&widths, '├', '┼', '┤'));
            out.push('\n');
        }

        for row in &self.rows {
            out.push_str(&line(row, &widths, color));
            out.push('\n');
        }

        out.push_str(&border(&widths, '└', '┴', '┘'));
        out
    }
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&mid.to_string()), right)
}

fn line(cells: &[Cell], widths: &[usize], color: bool) -> String {
    let empty = Cell::plain("");
    let rendered: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(col, width)| {
            let cell = cells.get(col).unwrap_or(&empty);
            let padded = format!("{:<width$}", cell.text, width = width);
            match (&cell.style, color) {
                (Some(style), true) => padded.style(*style).to_string(),
                _ => padded,
            }
        })
        .collect();
    format!("│ {} │", rendered.join(" │ "))
}

/// `ID | Status | Kind | Path` table for a status report.
pub fn status_table(report: &StatusReport) -> Table {
    let mut table = Table::new(["ID", "Status", "Kind", "Path"]);
    for (id, result) in report.results.iter().enumerate() {
        table.push_row(vec![
            Cell::plain(id.to_string()),
            Cell::styled(result.state.as_str(), state_style(result.state)),
            Cell::plain(result.kind.as_str()),
            Cell::plain(result.path.clone()),
        ]);
    }
    table
}

/// `ID | Path` table for the registry listing.
pub fn list_table(entries: &[RepositoryEntry]) -> Table {
    let mut table = Table::new(["ID", "Path"]);
    for (id, entry) in entries.iter().enumerate() {
        table.push_row(vec![Cell::plain(id.to_string()), Cell::plain(entry.path())]);
    }
    table
}
