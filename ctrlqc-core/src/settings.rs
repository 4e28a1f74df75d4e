use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    expectation::EmptyObservationPolicy,
    metadata::MetadataConnectionParams,
    sample::DEFAULT_BARCODE_PREFIX,
    sources::sample_sheet::DEFAULT_SAMPLE_SHEET,
};

/// Everything one report generation needs to locate its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub run_id:                   String,
    /// Directory holding the run's sample sheet.
    pub run_directory:            PathBuf,
    /// Directory holding `<run_id>.csv` QC summaries.
    pub qc_directory:             PathBuf,
    pub controls_file:            PathBuf,
    #[serde(default = "default_sample_sheet_name")]
    pub sample_sheet_name:        PathBuf,
    #[serde(default = "default_barcode_prefix")]
    pub barcode_prefix:           String,
    #[serde(default)]
    pub empty_observations:       EmptyObservationPolicy,
    #[serde(default)]
    pub sequencing_date:          Option<NaiveDate>,
    #[serde(default)]
    pub allow_historical_samples: bool,
    #[serde(default)]
    pub metadata:                 Option<MetadataConnectionParams>,
}

fn default_sample_sheet_name() -> PathBuf {
    PathBuf::from(DEFAULT_SAMPLE_SHEET)
}

fn default_barcode_prefix() -> String {
    DEFAULT_BARCODE_PREFIX.to_owned()
}

impl ReportSettings {
    #[inline]
    pub fn new(run_id: &str, run_directory: &Path, qc_directory: &Path, controls_file: &Path) -> Self {
        Self {
            run_id:                   run_id.to_owned(),
            run_directory:            run_directory.to_path_buf(),
            qc_directory:             qc_directory.to_path_buf(),
            controls_file:            controls_file.to_path_buf(),
            sample_sheet_name:        default_sample_sheet_name(),
            barcode_prefix:           default_barcode_prefix(),
            empty_observations:       EmptyObservationPolicy::default(),
            sequencing_date:          None,
            allow_historical_samples: false,
            metadata:                 None,
        }
    }

    #[inline]
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    #[inline]
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut buffer = vec![];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        std::fs::write(path, buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_settings_take_defaults() {
        let settings: ReportSettings = serde_json::from_str(
            r#"{
                "run_id": "RUN1",
                "run_directory": "/runs/RUN1",
                "qc_directory": "/qc",
                "controls_file": "/etc/controls.yaml"
            }"#,
        )
        .unwrap();

        assert_eq!(
            settings,
            ReportSettings::new(
                "RUN1",
                Path::new("/runs/RUN1"),
                Path::new("/qc"),
                Path::new("/etc/controls.yaml")
            )
        );
    }

    #[test]
    fn saved_settings_load_back() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("ctrlqc.json");
        let mut settings =
            ReportSettings::new("RUN2", directory.path(), directory.path(), Path::new("c.yaml"));
        settings.sequencing_date = NaiveDate::from_ymd_opt(2024, 1, 31);
        settings.empty_observations = EmptyObservationPolicy::Pass;

        settings.save(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        assert!(contents.contains("    \"sequencing_date\": \"2024-01-31\""));
        assert!(contents.contains("\"empty_observations\": \"pass\""));
        assert_eq!(ReportSettings::load(&path).unwrap(), settings);
    }
}
