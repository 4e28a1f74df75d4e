use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::info;

use crate::{error::QcError, sample::QcRecord};

/// Reads assumed for a sample that has no row in the QC file.
pub const ABSENT_NUMBER_OF_READS: u64 = 0;
/// Percentage of N bases assumed for a sample that has no row in the QC file.
pub const ABSENT_PERCENT_NS: f64 = 100.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[strum(serialize = "number_of_reads")]
    NumberOfReads,
    #[strum(serialize = "percent_ns")]
    PercentNs,
}

impl Metric {
    /// Resolves a configured metric tag, rejecting anything outside the known
    /// set.
    #[inline]
    pub fn parse(tag: &str) -> Result<Self, QcError> {
        Self::from_str(tag.trim()).map_err(|_| QcError::UnsupportedMetric(tag.to_owned()))
    }

    /// Column of the QC file this metric is read from.
    #[inline]
    pub fn field(self) -> &'static str {
        match self {
            Metric::NumberOfReads => "num_aligned_reads",
            Metric::PercentNs => "pct_N_bases",
        }
    }

    /// The worst plausible measurement, used when a sample has no QC data.
    #[inline]
    pub fn worst_case(self) -> MetricValue {
        match self {
            Metric::NumberOfReads => MetricValue::Count(ABSENT_NUMBER_OF_READS),
            Metric::PercentNs => MetricValue::Percent(ABSENT_PERCENT_NS),
        }
    }

    #[inline]
    pub fn extract(self, record: Option<&QcRecord>, sample: &str) -> anyhow::Result<MetricValue> {
        let Some(record) = record else {
            let value = self.worst_case();
            info!(
                sample,
                metric = %self,
                %value,
                "No QC data for sample, assuming worst case"
            );
            return Ok(value);
        };

        let field = self.field();
        let raw = record.get(field).map(|value| value.trim());
        let malformed = || QcError::MalformedQcRecord {
            sample: sample.to_owned(),
            field,
            value: raw.map(str::to_owned),
        };
        let raw = raw.ok_or_else(malformed)?;

        let value = match self {
            Metric::NumberOfReads => raw.parse::<u64>().ok().map(MetricValue::Count),
            Metric::PercentNs => raw
                .parse::<f64>()
                .ok()
                .filter(|percent| percent.is_finite())
                .map(MetricValue::Percent),
        };

        Ok(value.ok_or_else(malformed)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Percent(f64),
}

impl MetricValue {
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            MetricValue::Count(count) => count as f64,
            MetricValue::Percent(percent) => percent,
        }
    }
}

impl fmt::Display for MetricValue {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(count) => write!(f, "{count}"),
            MetricValue::Percent(percent) => write!(f, "{percent:.2}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, &str)]) -> QcRecord {
        fields.iter().map(|(key, value)| ((*key).to_owned(), (*value).to_owned())).collect()
    }

    #[test]
    fn parses_known_tags() {
        assert_eq!(Metric::parse("number_of_reads").unwrap(), Metric::NumberOfReads);
        assert_eq!(Metric::parse(" percent_ns ").unwrap(), Metric::PercentNs);
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        assert_eq!(
            Metric::parse("gc_content").unwrap_err(),
            QcError::UnsupportedMetric("gc_content".to_owned())
        );
    }

    #[test]
    fn absent_record_uses_worst_case() {
        assert_eq!(
            Metric::NumberOfReads.extract(None, "S1").unwrap(),
            MetricValue::Count(0)
        );
        assert_eq!(
            Metric::PercentNs.extract(None, "S1").unwrap(),
            MetricValue::Percent(100.0)
        );
    }

    #[test]
    fn present_record_is_parsed() {
        let qc = record(&[("num_aligned_reads", " 500000 "), ("pct_N_bases", "1.25")]);
        assert_eq!(
            Metric::NumberOfReads.extract(Some(&qc), "S1").unwrap(),
            MetricValue::Count(500_000)
        );
        assert_eq!(
            Metric::PercentNs.extract(Some(&qc), "S1").unwrap(),
            MetricValue::Percent(1.25)
        );
    }

    #[test]
    fn missing_field_is_malformed() {
        let qc = record(&[("pct_N_bases", "1.0")]);
        let error = Metric::NumberOfReads.extract(Some(&qc), "S1").unwrap_err();
        assert_eq!(
            error.downcast_ref::<QcError>(),
            Some(&QcError::MalformedQcRecord {
                sample: "S1".to_owned(),
                field:  "num_aligned_reads",
                value:  None,
            })
        );
    }

    #[test]
    fn unparsable_field_is_malformed() {
        let qc = record(&[("num_aligned_reads", "-3"), ("pct_N_bases", "NaN")]);
        for metric in [Metric::NumberOfReads, Metric::PercentNs] {
            let error = metric.extract(Some(&qc), "S2").unwrap_err();
            assert!(matches!(
                error.downcast_ref::<QcError>(),
                Some(QcError::MalformedQcRecord { value: Some(_), .. })
            ));
        }
    }

    #[test]
    fn values_compare_as_floats() {
        assert!((MetricValue::Count(7).as_f64() - 7.0).abs() < f64::EPSILON);
        assert_eq!(MetricValue::Percent(100.0).to_string(), "100.00%");
    }
}
