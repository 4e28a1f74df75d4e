//! Control-sample quality gate for sequencing runs.
//!
//! Per-sample QC measurements are mapped onto a closed set of [`Metric`]s,
//! each configured control sample is checked against its expectations, and
//! the results are collected into a [`Report`] that itemizes failures only.
//! Sample metadata verdicts from an external source can be folded into the
//! same report.

pub mod context;
pub mod control;
pub mod error;
pub mod evaluation;
pub mod expectation;
pub mod getter;
pub mod metadata;
pub mod metric;
pub mod report;
pub mod sample;
pub mod settings;
pub mod sources;

pub use crate::{
    context::{append_metadata_checks, generate_metadata_report, generate_report, load_samples},
    control::{ControlDefinitionSource, ControlExpectation, ControlSample, YamlControlDefinitions},
    error::QcError,
    evaluation::evaluate_controls,
    expectation::{EmptyObservationPolicy, Expectation},
    getter::{MetricGetter, SampleSet},
    metadata::{
        validate_metadata,
        ConnectionGuard,
        MetadataConnection,
        MetadataConnectionParams,
        MetadataSource,
        SampleValidity,
    },
    metric::{Metric, MetricValue},
    report::{Outcome, Report},
    sample::{barcode_from_sample_name, QcRecord, Sample},
    settings::ReportSettings,
    sources::{
        qc_file::CsvQcDirectory,
        sample_sheet::CsvSampleSheet,
        QcDataSource,
        SampleSheetSource,
    },
};
