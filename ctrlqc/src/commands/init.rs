use std::path::Path;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use ctrlqc_core::ReportSettings;
use tracing::{error, info};

use crate::CtrlQcCliError;

pub fn init_handler(
    settings_path: &Path,
    run_directory: &Path,
    run_id: &str,
    qc_directory: &Path,
    controls: &Path,
    sequencing_date: Option<NaiveDate>,
    allow_historical_samples: bool,
) -> Result<()> {
    if settings_path.exists() {
        let err = CtrlQcCliError::SettingsFileAlreadyExists(settings_path.to_path_buf());
        error!("{}", err);
        bail!(err);
    }

    let run_directory = path_abs::PathAbs::new(run_directory)?.as_path().to_path_buf();
    let qc_directory = path_abs::PathAbs::new(qc_directory)?.as_path().to_path_buf();
    let controls = path_abs::PathAbs::new(controls)?.as_path().to_path_buf();

    let mut settings = ReportSettings::new(run_id, &run_directory, &qc_directory, &controls);
    settings.sequencing_date = sequencing_date;
    settings.allow_historical_samples = allow_historical_samples;
    settings.save(settings_path)?;

    info!("Initialized ctrlqc settings at: {}", settings_path.display());
    info!("Run \"ctrlqc check\" to evaluate the run's control samples.");

    Ok(())
}
