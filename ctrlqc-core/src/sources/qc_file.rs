use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    sample::{normalize_barcode, QcRecord, DEFAULT_BARCODE_PREFIX},
    sources::{CsvTable, QcDataSource},
};

pub const BARCODE_COLUMN: &str = "barcode";

/// QC summaries stored as `<directory>/<run_id>.csv`.
#[derive(Debug, Clone)]
pub struct CsvQcDirectory {
    pub directory:      PathBuf,
    pub barcode_prefix: String,
}

impl CsvQcDirectory {
    #[inline]
    pub fn new(directory: &Path) -> Self {
        Self {
            directory:      directory.to_path_buf(),
            barcode_prefix: DEFAULT_BARCODE_PREFIX.to_owned(),
        }
    }

    #[inline]
    pub fn with_barcode_prefix(mut self, prefix: &str) -> Self {
        prefix.clone_into(&mut self.barcode_prefix);
        self
    }

    #[inline]
    pub fn path(&self, run_id: &str) -> PathBuf {
        self.directory.join(format!("{run_id}.csv"))
    }
}

impl QcDataSource for CsvQcDirectory {
    #[inline]
    fn qc_records(&self, run_id: &str) -> anyhow::Result<HashMap<String, QcRecord>> {
        let path = self.path(run_id);
        let table = CsvTable::read(&path)?;
        table.column(&path, BARCODE_COLUMN)?;

        let mut records = HashMap::with_capacity(table.rows.len());
        for record in table.records() {
            let Some(barcode) = record.get(BARCODE_COLUMN) else {
                continue;
            };
            let barcode = normalize_barcode(barcode, &self.barcode_prefix).to_owned();
            if records.contains_key(&barcode) {
                warn!(barcode = %barcode, path = %path.display(), "Duplicate QC row, keeping the last one");
            }
            records.insert(barcode, record);
        }
        debug!(rows = records.len(), path = %path.display(), "Loaded QC records");

        Ok(records)
    }
}
