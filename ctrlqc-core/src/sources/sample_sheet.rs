use std::path::{Path, PathBuf};

use crate::{
    error::QcError,
    sources::{CsvTable, SampleSheetSource},
};

pub const DEFAULT_SAMPLE_SHEET: &str = "sample_sheet.csv";
pub const KEY_COLUMN: &str = "barcode";
pub const NAME_COLUMN: &str = "alias";

#[derive(Debug, Clone)]
pub struct CsvSampleSheet {
    pub file_name: PathBuf,
}

impl Default for CsvSampleSheet {
    #[inline]
    fn default() -> Self {
        Self {
            file_name: PathBuf::from(DEFAULT_SAMPLE_SHEET),
        }
    }
}

impl CsvSampleSheet {
    #[inline]
    pub fn new(file_name: &Path) -> Self {
        Self {
            file_name: file_name.to_path_buf(),
        }
    }
}

impl SampleSheetSource for CsvSampleSheet {
    #[inline]
    fn sample_sheet(&self, run_directory: &Path) -> anyhow::Result<Vec<(String, String)>> {
        let path = run_directory.join(&self.file_name);
        let table = CsvTable::read(&path)?;
        let key = table.column(&path, KEY_COLUMN)?;
        let name = table.column(&path, NAME_COLUMN)?;

        let cell = |row: &[String], index: usize, row_number: usize, column: &'static str| {
            row.get(index).cloned().ok_or_else(|| QcError::ShortRow {
                path:   path.clone(),
                row:    row_number,
                column,
            })
        };

        table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| -> anyhow::Result<(String, String)> {
                Ok((
                    cell(row.as_slice(), key, i + 1, KEY_COLUMN)?,
                    cell(row.as_slice(), name, i + 1, NAME_COLUMN)?,
                ))
            })
            .collect()
    }
}
