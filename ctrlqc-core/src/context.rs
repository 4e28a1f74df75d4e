//! Report generation for one run: joins the run's inputs and hands them to
//! the evaluation engine and the metadata pathway.

use tracing::{debug, info, instrument};

use crate::{
    control::ControlDefinitionSource,
    error::QcError,
    evaluation::evaluate_controls,
    getter::SampleSet,
    metadata::{validate_metadata, MetadataSource},
    report::Report,
    sample::{barcode_from_sample_name, Sample},
    settings::ReportSettings,
    sources::{QcDataSource, SampleSheetSource},
};

/// Builds the run's samples in sample sheet order, attaching the QC row that
/// matches each sample name's barcode, if any.
#[inline]
pub fn load_samples(
    settings: &ReportSettings,
    sample_sheet: &dyn SampleSheetSource,
    qc_source: &dyn QcDataSource,
) -> anyhow::Result<SampleSet> {
    let sheet = sample_sheet.sample_sheet(&settings.run_directory)?;
    let qc_records = qc_source.qc_records(&settings.run_id)?;

    let samples = sheet
        .into_iter()
        .map(|(_, name)| -> anyhow::Result<Sample> {
            let barcode = barcode_from_sample_name(&name, &settings.barcode_prefix)?;
            let data_qc = qc_records.get(&barcode).cloned();
            if data_qc.is_none() {
                info!(sample = %name, barcode = %barcode, "No QC row for sample");
            }
            Ok(Sample::new(name, data_qc))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    debug!(samples = samples.len(), "Loaded samples");

    Ok(SampleSet::new(samples))
}

/// Evaluates every configured control against the run. Any error aborts the
/// whole report.
#[inline]
#[instrument(skip_all, fields(run_id = %settings.run_id))]
pub fn generate_report(
    settings: &ReportSettings,
    sample_sheet: &dyn SampleSheetSource,
    qc_source: &dyn QcDataSource,
    controls: &dyn ControlDefinitionSource,
) -> anyhow::Result<Report> {
    let samples = load_samples(settings, sample_sheet, qc_source)?;
    let controls = controls.control_definitions()?;

    let mut report = Report::new();
    evaluate_controls(&controls, &samples, settings.empty_observations, &mut report)?;
    info!(
        checks = report.len(),
        success = report.success(),
        "Evaluated control samples"
    );

    Ok(report)
}

/// Folds the metadata verdicts of `molis_ids` into `report`.
#[inline]
#[instrument(skip_all, fields(run_id = %settings.run_id))]
pub fn append_metadata_checks<S>(
    settings: &ReportSettings,
    source: &S,
    molis_ids: &[String],
    report: &mut Report,
) -> anyhow::Result<()>
where
    S: MetadataSource + ?Sized,
{
    let params = settings.metadata.as_ref().ok_or(QcError::MissingSetting("metadata"))?;
    let sequencing_date = settings
        .sequencing_date
        .ok_or(QcError::MissingSetting("sequencing_date"))?;

    validate_metadata(
        source,
        params,
        molis_ids,
        sequencing_date,
        settings.allow_historical_samples,
        report,
    )
}

#[inline]
pub fn generate_metadata_report<S>(
    settings: &ReportSettings,
    source: &S,
    molis_ids: &[String],
) -> anyhow::Result<Report>
where
    S: MetadataSource + ?Sized,
{
    let mut report = Report::new();
    append_metadata_checks(settings, source, molis_ids, &mut report)?;
    Ok(report)
}
