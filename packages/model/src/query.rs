//! Read-only lookups over a template.
//!
//! Lookups are linear scans in rows × columns × contents order and return the
//! first match, so a document with duplicated ids still resolves
//! deterministically.

use crate::content::Content;
use crate::template::{Column, Row, Template};

/// Position of a column inside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLocation {
    pub row_index: usize,
    pub column_index: usize,
}

/// Position of a content block inside the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentLocation<'a> {
    pub content: &'a Content,
    pub row_index: usize,
    pub column_index: usize,
    pub column_id: &'a str,
    /// Index within the column's `contents`.
    pub index: usize,
}

pub fn find_row<'a>(template: &'a Template, id: &str) -> Option<&'a Row> {
    template.body.rows.iter().find(|row| row.id == id)
}

pub fn find_row_index(template: &Template, id: &str) -> Option<usize> {
    template.body.rows.iter().position(|row| row.id == id)
}

pub fn find_column(template: &Template, id: &str) -> Option<ColumnLocation> {
    template
        .body
        .rows
        .iter()
        .enumerate()
        .find_map(|(row_index, row)| {
            row.columns
                .iter()
                .position(|column| column.id == id)
                .map(|column_index| ColumnLocation {
                    row_index,
                    column_index,
                })
        })
}

pub fn column_at(template: &Template, location: ColumnLocation) -> Option<&Column> {
    template
        .body
        .rows
        .get(location.row_index)
        .and_then(|row| row.columns.get(location.column_index))
}

pub fn find_content<'a>(template: &'a Template, id: &str) -> Option<ContentLocation<'a>> {
    for (row_index, row) in template.body.rows.iter().enumerate() {
        for (column_index, column) in row.columns.iter().enumerate() {
            if let Some(index) = column.position_of(id) {
                return Some(ContentLocation {
                    content: &column.contents[index],
                    row_index,
                    column_index,
                    column_id: &column.id,
                    index,
                });
            }
        }
    }
    None
}

/// Every content block, in document order.
pub fn contents(template: &Template) -> impl Iterator<Item = &Content> {
    template
        .body
        .rows
        .iter()
        .flat_map(|row| row.columns.iter())
        .flat_map(|column| column.contents.iter())
}

/// Width of column `index` as a percentage of its row.
///
/// `None` when `index` is out of range or no cell is positive.
pub fn column_width_percent(cells: &[u32], index: usize) -> Option<f64> {
    let sum: u64 = cells.iter().map(|&c| u64::from(c)).sum();
    let cell = *cells.get(index)?;
    if sum == 0 {
        return None;
    }
    Some(f64::from(cell) / sum as f64 * 100.0)
}

/// Pixel widths of every column for a body `content_width` wide.
pub fn column_widths_px(cells: &[u32], content_width: u32) -> Option<Vec<f64>> {
    (0..cells.len())
        .map(|i| column_width_percent(cells, i).map(|pct| pct / 100.0 * f64::from(content_width)))
        .collect()
}

/// Structural problem in a loaded document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("row `{row_id}` has {cells} cells but {columns} columns")]
    CellsMismatch {
        row_id: String,
        cells: usize,
        columns: usize,
    },
    #[error("row `{row_id}` has no cells")]
    EmptyLayout { row_id: String },
    #[error("row `{row_id}` has a zero-width cell at index {index}")]
    ZeroCell { row_id: String, index: usize },
}

/// Check the per-row layout invariants.
pub fn check_invariants(template: &Template) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for row in &template.body.rows {
        if row.cells.is_empty() {
            violations.push(InvariantViolation::EmptyLayout {
                row_id: row.id.clone(),
            });
        }
        if !row.is_consistent() {
            violations.push(InvariantViolation::CellsMismatch {
                row_id: row.id.clone(),
                cells: row.cells.len(),
                columns: row.columns.len(),
            });
        }
        if let Some(index) = row.cells.iter().position(|&c| c == 0) {
            violations.push(InvariantViolation::ZeroCell {
                row_id: row.id.clone(),
                index,
            });
        }
    }
    violations
}
