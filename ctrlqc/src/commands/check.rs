use std::path::Path;

use anyhow::{bail, Result};
use ctrlqc_core::{
    generate_report,
    CsvQcDirectory,
    CsvSampleSheet,
    Report,
    ReportSettings,
    YamlControlDefinitions,
};
use tracing::{error, info};

use crate::{commands::ReportFormat, CtrlQcCliError};

/// Prints the run's report and returns whether it passed.
#[tracing::instrument(skip_all)]
pub fn check_handler(settings_path: &Path, format: ReportFormat) -> Result<bool> {
    if !settings_path.exists() {
        let err = CtrlQcCliError::SettingsFileNotFound(settings_path.to_path_buf());
        error!("{}", err);
        bail!(err);
    }
    let settings = ReportSettings::load(settings_path)?;

    let report = generate_report(
        &settings,
        &CsvSampleSheet::new(&settings.sample_sheet_name),
        &CsvQcDirectory::new(&settings.qc_directory).with_barcode_prefix(&settings.barcode_prefix),
        &YamlControlDefinitions::new(&settings.controls_file),
    )?;

    println!("{}", render(&report, format)?);
    info!(
        "Run {} {}",
        settings.run_id,
        if report.success() { "passed QC" } else { "failed QC" }
    );

    Ok(report.success())
}

fn render(report: &Report, format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Text => report.to_string(),
        ReportFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "success":  report.success(),
            "outcomes": report.outcomes(),
        }))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_carries_success_and_every_outcome() {
        let mut report = Report::new();
        report.add("CTRL-POS: number_of_reads >= 1 (observed 5)", true);
        report.add("CTRL-NEG: percent_ns <= 5 (no matching samples)", false);

        let json: serde_json::Value =
            serde_json::from_str(&render(&report, ReportFormat::Json).unwrap()).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["outcomes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn text_lists_failures_only() {
        let mut report = Report::new();
        report.add("ok", true);
        report.add("bad", false);

        assert_eq!(
            render(&report, ReportFormat::Text).unwrap(),
            "QC FAILED (2 checks)\n  [fail] bad"
        );
    }
}
