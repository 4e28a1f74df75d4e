use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::Shell;
use strum::{Display as DisplayMacro, EnumString, IntoStaticStr};

pub mod check;
pub mod init;

#[derive(ClapParser)]
#[command(
    name = "ctrlqc",
    about = "Validates a sequencing run's control samples against configured QC expectations.",
    version
)]
pub struct CtrlQcCli {
    #[command(subcommand)]
    pub command:  Commands,
    /// Location of the settings file. Defaults to `./ctrlqc.json`.
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Location of the log file. Defaults to `./logs/ctrlqc.log`.
    #[arg(long)]
    pub logs:     Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a settings file for a run.
    Init {
        /// Directory holding the run's sample sheet.
        run_directory:            PathBuf,
        #[arg(long)]
        run_id:                   String,
        /// Directory holding `<run-id>.csv` QC summaries.
        #[arg(long)]
        qc_directory:             PathBuf,
        /// YAML file with the control sample definitions.
        #[arg(long)]
        controls:                 PathBuf,
        /// Sequencing date (YYYY-MM-DD), needed for metadata validation.
        #[arg(long)]
        sequencing_date:          Option<NaiveDate>,
        #[arg(long)]
        allow_historical_samples: bool,
    },
    /// Evaluate the run's control samples and print the report.
    Check {
        #[arg(long, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Print shell completions.
    Completions { shell: Shell },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, DisplayMacro)]
pub enum ReportFormat {
    #[strum(serialize = "text")]
    Text,
    #[strum(serialize = "json")]
    Json,
}

pub fn completions_handler(shell: Shell) {
    let mut command = CtrlQcCli::command();
    clap_complete::generate(shell, &mut command, "ctrlqc", &mut std::io::stdout());
}
