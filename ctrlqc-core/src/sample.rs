use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::QcError,
    metric::{Metric, MetricValue},
};

pub const DEFAULT_BARCODE_PREFIX: &str = "barcode";

/// One row of the QC file, keyed by column name.
pub type QcRecord = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub name:    String,
    /// `None` when the QC file has no row for this sample's barcode.
    pub data_qc: Option<QcRecord>,
}

impl Sample {
    #[inline]
    pub fn new(name: impl Into<String>, data_qc: Option<QcRecord>) -> Self {
        Self {
            name: name.into(),
            data_qc,
        }
    }

    /// Name without the trailing `_<barcode>` token.
    #[inline]
    pub fn base_name(&self) -> &str {
        self.name.rsplit_once('_').map_or(self.name.as_str(), |(base, _)| base)
    }

    #[inline]
    pub fn extract_metric_value(&self, metric: Metric) -> anyhow::Result<MetricValue> {
        metric.extract(self.data_qc.as_ref(), &self.name)
    }
}

/// Derives the QC barcode from the last underscore-delimited token of a
/// sample name, e.g. `CTRL-POS_barcode01` gives `01`.
#[inline]
pub fn barcode_from_sample_name(name: &str, prefix: &str) -> Result<String, QcError> {
    let invalid = || QcError::InvalidSampleName {
        name:   name.to_owned(),
        prefix: prefix.to_owned(),
    };
    let (_, token) = name.rsplit_once('_').ok_or_else(invalid)?;
    let barcode = token.strip_prefix(prefix).ok_or_else(invalid)?;
    if barcode.is_empty() {
        return Err(invalid());
    }

    Ok(barcode.to_owned())
}

/// Normalizes a barcode as written in a QC or sample sheet file, which may or
/// may not carry the prefix.
#[inline]
pub fn normalize_barcode<'a>(raw: &'a str, prefix: &str) -> &'a str {
    let raw = raw.trim();
    raw.strip_prefix(prefix).unwrap_or(raw)
}
