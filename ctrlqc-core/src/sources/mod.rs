use std::{collections::HashMap, path::Path};

use anyhow::Context;

use crate::{error::QcError, sample::QcRecord};

pub mod qc_file;
pub mod sample_sheet;

/// Per-run QC rows keyed by barcode.
pub trait QcDataSource {
    fn qc_records(&self, run_id: &str) -> anyhow::Result<HashMap<String, QcRecord>>;
}

/// `(barcode or key, sample name)` pairs in sheet order.
pub trait SampleSheetSource {
    fn sample_sheet(&self, run_directory: &Path) -> anyhow::Result<Vec<(String, String)>>;
}

/// A comma separated file with a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CsvTable {
    pub header: Vec<String>,
    pub rows:   Vec<Vec<String>>,
}

impl CsvTable {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut lines = contents
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty());
        let header = lines.next().map(split_row).unwrap_or_default();
        let rows = lines.map(split_row).collect();

        Self {
            header,
            rows,
        }
    }

    pub fn column(&self, path: &Path, column: &'static str) -> Result<usize, QcError> {
        self.header
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| QcError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
    }

    /// Each row as a map from header name to value. Short rows leave the
    /// trailing columns out.
    pub fn records(&self) -> impl Iterator<Item = QcRecord> + '_ {
        self.rows.iter().map(|row| {
            self.header
                .iter()
                .zip(row)
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect::<QcRecord>()
        })
    }
}

fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            },
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field).trim().to_owned()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_owned());

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_fields() {
        assert_eq!(split_row(r#"01, "a, b" ,"say ""hi""""#), vec![
            "01",
            "a, b",
            r#"say "hi""#
        ]);
    }

    #[test]
    fn skips_blank_lines_and_carriage_returns() {
        let table = CsvTable::parse("barcode,alias\r\n\r\n01,CTRL_barcode01\r\n");
        assert_eq!(table.header, vec!["barcode", "alias"]);
        assert_eq!(table.rows, vec![vec!["01", "CTRL_barcode01"]]);
    }

    #[test]
    fn reports_missing_columns() {
        let table = CsvTable::parse("barcode\n01\n");
        assert_eq!(table.column(Path::new("x.csv"), "barcode"), Ok(0));
        assert_eq!(
            table.column(Path::new("x.csv"), "alias"),
            Err(QcError::MissingColumn {
                path:   Path::new("x.csv").to_path_buf(),
                column: "alias",
            })
        );
    }
}
