use std::fs;
use std::path::Path;

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use derive_more::{From, IsVariant};

use crate::MergeError;

/// A single cell value, as read from or written to a workbook.
#[derive(Debug, Clone, PartialEq, From, IsVariant)]
pub enum Cell {
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_owned())
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::String(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            // dates, durations, cell errors: keep the display form
            other => Cell::String(other.to_string()),
        }
    }
}

/// An ordered table read from one sheet of a workbook. Row and column order
/// match the source; every row is exactly `columns.len()` cells wide.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn load(path: impl AsRef<Path>, sheet_name: &str) -> Result<Sheet, MergeError> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;

        if !workbook.sheet_names().iter().any(|n| n.as_str() == sheet_name) {
            return Err(MergeError::SheetNotFound(sheet_name.to_owned()));
        }
        let range = workbook.worksheet_range(sheet_name)?;

        let mut raw_rows = range.rows();
        let header = raw_rows
            .next()
            .ok_or_else(|| MergeError::Header("sheet has no header row".to_owned()))?;
        let columns = header
            .iter()
            .map(|c| {
                c.get_string()
                    .map(str::to_owned)
                    .ok_or_else(|| MergeError::Header(format!("non-string header cell {c:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = raw_rows
            .map(|raw_row| {
                let mut row: Vec<Cell> = raw_row.iter().map(Cell::from).collect();
                row.resize(columns.len(), Cell::Empty);
                row
            })
            .collect();

        Ok(Sheet {
            name: sheet_name.to_owned(),
            columns,
            rows,
        })
    }

    /// Writes the table as a new single-sheet workbook: header row first,
    /// then the data rows, no index column. The file goes to a temporary
    /// sibling path and is renamed into place, so a failed write never
    /// leaves a truncated workbook at `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), MergeError> {
        let path = path.as_ref();

        let mut book = umya_spreadsheet::new_file_empty_worksheet();
        let sheet = book
            .new_sheet(&self.name)
            .map_err(|e| MergeError::Write(e.to_owned()))?;

        for (jx, column) in self.columns.iter().enumerate() {
            sheet
                .get_cell_mut((jx as u32 + 1, 1u32))
                .set_value(column.as_str());
        }
        for (iy, row) in self.rows.iter().enumerate() {
            for (jx, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let target = sheet.get_cell_mut((jx as u32 + 1, iy as u32 + 2));
                match cell {
                    Cell::String(s) => target.set_value(s.as_str()),
                    Cell::Int(i) => target.set_value_number(*i as f64),
                    Cell::Float(f) => target.set_value_number(*f),
                    Cell::Bool(b) => target.set_value_bool(*b),
                    Cell::Empty => unreachable!(),
                };
            }
        }

        let tmp = path.with_extension("xlsx.tmp");
        if let Err(e) = umya_spreadsheet::writer::xlsx::write(&book, &tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(MergeError::Write(e.to_string()));
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
