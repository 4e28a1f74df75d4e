use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QcError {
    #[error("Unsupported metric: {0}")]
    UnsupportedMetric(String),
    #[error("Malformed QC record for sample {sample}: field `{field}` has value {value:?}")]
    MalformedQcRecord {
        sample: String,
        field:  &'static str,
        value:  Option<String>,
    },
    #[error("Invalid sample name {name:?}: expected a trailing `_{prefix}<barcode>` token")]
    InvalidSampleName { name: String, prefix: String },
    #[error("Missing column `{column}` in {}", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),
    #[error("Control {0} has no expectations")]
    EmptyControl(String),
    #[error("Invalid expectation for control {control}: {reason}")]
    InvalidExpectation { control: String, reason: String },
    #[error("Row {row} of {} is missing column `{column}`", .path.display())]
    ShortRow {
        path:   PathBuf,
        row:    usize,
        column: &'static str,
    },
}
