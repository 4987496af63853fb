pub mod data;
pub mod merge;
pub mod sheets;

use std::path::PathBuf;

use thiserror::Error;

use crate::sheets::Sheet;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read workbook: {0}")]
    Xlsx(#[from] calamine::XlsxError),
    #[error("no sheet named {0:?} in workbook")]
    SheetNotFound(String),
    #[error("invalid header row: {0}")]
    Header(String),
    #[error("no column named {0:?} in sheet")]
    MissingColumn(String),
    #[error("missing, empty, or non-text profile link at data row {row}")]
    EmptyKey { row: usize },
    #[error("failed to write workbook: {0}")]
    Write(String),
}

/// Everything the original script hard-coded: input/output paths, the sheet
/// to read, and the column the user id is derived from.
#[derive(Debug, Clone)]
pub struct Config {
    pub records_path: PathBuf,
    pub spreadsheet_path: PathBuf,
    pub output_path: PathBuf,
    pub sheet_name: String,
    pub key_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            records_path: "results.json".into(),
            spreadsheet_path: "existing_spreadsheet.xlsx".into(),
            output_path: "updated_spreadsheet.xlsx".into(),
            sheet_name: "Form Responses 1".into(),
            key_column: "CodeForces profile link".into(),
        }
    }
}

/// Runs the whole pipeline: load the JSON records and the source sheet,
/// left-join them on the derived user id, write the result as a new workbook.
pub fn run(config: &Config) -> Result<(), MergeError> {
    let records = data::load_records(&config.records_path)?;
    let sheet = Sheet::load(&config.spreadsheet_path, &config.sheet_name)?;
    let updated = merge::merge(sheet, &records, &config.key_column)?;
    updated.write(&config.output_path)?;
    Ok(())
}
