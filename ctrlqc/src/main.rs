use std::{panic, path::PathBuf, process, process::ExitCode};

use clap::Parser;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::{
    commands::{
        check::check_handler,
        completions_handler,
        init::init_handler,
        Commands,
        CtrlQcCli,
    },
    logging::init_logging,
};

mod commands;
mod logging;

pub const DEFAULT_SETTINGS_PATH: &str = "./ctrlqc.json";
pub const DEFAULT_LOG_PATH: &str = "./logs/ctrlqc.log";

fn main() -> anyhow::Result<ExitCode> {
    let orig_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        orig_hook(panic_info);
        process::exit(1);
    }));
    run()
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = CtrlQcCli::parse();
    let cwd = std::env::current_dir()?;
    let settings_path = cli.settings.unwrap_or_else(|| cwd.join(DEFAULT_SETTINGS_PATH));

    if let Commands::Completions {
        shell,
    } = cli.command
    {
        completions_handler(shell);
        return Ok(ExitCode::SUCCESS);
    }

    let logs = cli.logs.unwrap_or_else(|| cwd.join(DEFAULT_LOG_PATH));
    let _log_guard = init_logging(LevelFilter::INFO, &logs, LevelFilter::DEBUG)?;

    match cli.command {
        Commands::Init {
            run_directory,
            run_id,
            qc_directory,
            controls,
            sequencing_date,
            allow_historical_samples,
        } => {
            init_handler(
                &settings_path,
                &run_directory,
                &run_id,
                &qc_directory,
                &controls,
                sequencing_date,
                allow_historical_samples,
            )?;
            Ok(ExitCode::SUCCESS)
        },
        Commands::Check {
            format,
        } => {
            let passed = check_handler(&settings_path, format)?;
            Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        },
        Commands::Completions {
            ..
        } => Ok(ExitCode::SUCCESS),
    }
}

#[derive(Debug, Error)]
pub enum CtrlQcCliError {
    #[error("Cannot initialize over an existing settings file: {}", .0.display())]
    SettingsFileAlreadyExists(PathBuf),
    #[error("No settings file found at: {}", .0.display())]
    SettingsFileNotFound(PathBuf),
}
