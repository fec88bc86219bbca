//! Record source: load and validate the input roster
//!
//! The first sheet of the workbook is read; row 1 is a header and data starts
//! at row 2. Name and identity number sit at fixed, configured columns.
//! Bad rows are filtered out with a warning, never fatal on their own.

use crate::config::InputConfig;
use crate::core::types::Record;
use crate::utils::error::{CertError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;
use tracing::{debug, info, warn};

/// Why a row was dropped or flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIssueKind {
    /// Name or identity number is blank; the row is dropped
    MissingField,
    /// Identity number is neither 15 nor 18 characters; the row is kept
    AtypicalIdLength,
}

/// A problem found on one sheet row (1-based, header is row 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub row: usize,
    pub kind: RowIssueKind,
    pub detail: String,
}

/// Result of a successful load
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub issues: Vec<RowIssue>,
}

impl LoadedRecords {
    pub fn dropped(&self) -> usize {
        self.count(RowIssueKind::MissingField)
    }

    pub fn flagged(&self) -> usize {
        self.count(RowIssueKind::AtypicalIdLength)
    }

    fn count(&self, kind: RowIssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

/// Loads records from a tabular file using a fixed column layout
#[derive(Debug, Clone, Default)]
pub struct RecordSource {
    layout: InputConfig,
}

impl RecordSource {
    pub fn new(layout: InputConfig) -> Self {
        Self { layout }
    }

    /// Read the first worksheet of `path` and validate its rows
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedRecords> {
        let path = path.as_ref();
        info!("Reading records from {}", path.display());

        let (width, rows) = read_first_sheet(path)?;
        let loaded = self.parse_rows(width, &rows)?;

        info!(
            "Loaded {} records ({} rows dropped, {} flagged)",
            loaded.records.len(),
            loaded.dropped(),
            loaded.flagged()
        );
        Ok(loaded)
    }

    /// Validate data rows already extracted as text
    ///
    /// `width` is the sheet's column count; `rows` excludes the header.
    pub fn parse_rows(&self, width: usize, rows: &[Vec<String>]) -> Result<LoadedRecords> {
        if self.layout.name_column == 0 || self.layout.id_column == 0 {
            return Err(CertError::format(format!(
                "column positions are 1-based (name column {}, identity number column {})",
                self.layout.name_column, self.layout.id_column
            )));
        }
        let min_columns = self.layout.min_columns();
        if width < min_columns {
            return Err(CertError::format(format!(
                "sheet has {} columns, at least {} required (name in column {}, identity number in column {})",
                width, min_columns, self.layout.name_column, self.layout.id_column
            )));
        }

        let mut loaded = LoadedRecords::default();
        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 2;
            if row.iter().all(|cell| cell.trim().is_empty()) {
                debug!("Row {} is blank, skipping", row_number);
                continue;
            }

            let name = cell_at(row, self.layout.name_column);
            let id = cell_at(row, self.layout.id_column);
            let Some(record) = Record::new(name, id) else {
                warn!("Row {} is missing a name or identity number, skipped", row_number);
                loaded.issues.push(RowIssue {
                    row: row_number,
                    kind: RowIssueKind::MissingField,
                    detail: format!("name={:?} identity_number={:?}", name.trim(), id.trim()),
                });
                continue;
            };

            if !record.has_typical_id_length() {
                warn!(
                    "Row {} identity number has unusual length {}: {}",
                    row_number,
                    record.identity_number.chars().count(),
                    record.identity_number
                );
                loaded.issues.push(RowIssue {
                    row: row_number,
                    kind: RowIssueKind::AtypicalIdLength,
                    detail: record.identity_number.clone(),
                });
            }
            loaded.records.push(record);
        }

        if loaded.records.is_empty() {
            return Err(CertError::empty_dataset(format!(
                "no valid rows among {} data rows",
                rows.len()
            )));
        }
        Ok(loaded)
    }
}

fn cell_at(row: &[String], column: usize) -> &str {
    column
        .checked_sub(1)
        .and_then(|index| row.get(index))
        .map(String::as_str)
        .unwrap_or("")
}

fn read_first_sheet(path: &Path) -> Result<(usize, Vec<Vec<String>>)> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CertError::format(format!("cannot open {}: {}", path.display(), e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CertError::format(format!("{} contains no worksheets", path.display())))?
        .map_err(|e| CertError::format(format!("cannot read first worksheet: {}", e)))?;

    // Positions are absolute so a blank leading column does not shift the layout.
    let Some((last_row, last_col)) = range.end() else {
        return Ok((0, Vec::new()));
    };
    let width = last_col as usize + 1;
    let rows = (1..=last_row)
        .map(|r| {
            (0..=last_col)
                .map(|c| range.get_value((r, c)).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();
    Ok((width, rows))
}

/// Render a cell the way a person reads it; whole floats lose the ".0"
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e18 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
