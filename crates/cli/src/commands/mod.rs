//! CLI argument definitions and execution
//!
//! The tool exposes one flag-driven command: an action (upload, download,
//! delete) applied to a single object or, with `--dir-enable`, to a whole
//! directory tree / key prefix. Every action resolves its profile, builds
//! a session, and verifies connectivity before touching any data.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use oss_core::{BatchReport, Error, ItemReport, Outcome, ProfileStore, Result, TransferEngine};
use oss_s3::S3Session;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod delete;
mod download;
mod upload;

/// oss - S3-compatible object storage CLI
///
/// Transfers files between the local filesystem and the bucket bound to
/// a configured profile.
#[derive(Parser, Debug)]
#[command(name = "oss")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Operation to perform
    #[arg(long, value_enum)]
    pub action: Action,

    /// Treat the paths as a directory and key prefix
    #[arg(long)]
    pub dir_enable: bool,

    /// Local file/directory for upload, object key/prefix otherwise
    #[arg(long)]
    pub source_path: String,

    /// Object key/prefix for upload, local path for download
    #[arg(long)]
    pub target_path: Option<String>,

    /// Profile name inside the config file
    #[arg(long, default_value = oss_core::DEFAULT_PROFILE)]
    pub config_name: String,

    /// Config file location (default: ~/.config/oss-cli/config.yaml)
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Directory upload: comma-separated regex rules matched against the
    /// start of each relative file name. Directory download: a key suffix
    /// to skip.
    #[arg(long)]
    pub ignore: Option<String>,

    /// Output the transfer report as JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Upload,
    Download,
    Delete,
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
    });

    match run(&cli, &formatter).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

async fn run(cli: &Cli, formatter: &Formatter) -> Result<ExitCode> {
    let profiles = match &cli.config_path {
        Some(path) => ProfileStore::with_path(path.clone()),
        None => ProfileStore::new()?,
    };
    let profile = profiles.load(&cli.config_name)?;

    let session = S3Session::connect(&profile).await?;
    let engine = TransferEngine::new(&session);
    engine.check_connection().await?;

    match cli.action {
        Action::Upload => upload::execute(&engine, cli, formatter).await,
        Action::Download => download::execute(&engine, cli, formatter).await,
        Action::Delete => delete::execute(&engine, cli, formatter).await,
    }
}

/// The target path, required for upload and download
fn target_path(cli: &Cli) -> Result<&str> {
    cli.target_path
        .as_deref()
        .ok_or_else(|| Error::Validation("--target-path is required for this action".into()))
}

/// Report a single-item outcome and derive the exit code
fn finish_single(formatter: &Formatter, report: ItemReport, done_message: &str) -> ExitCode {
    if formatter.is_json() {
        formatter.json(&report);
    }
    match &report.outcome {
        Outcome::Done => {
            formatter.success(done_message);
            ExitCode::Success
        }
        Outcome::SkippedMissing => {
            formatter.warning(&format!("{} does not exist, nothing to do", report.source));
            ExitCode::Success
        }
        Outcome::Failed(reason) => {
            formatter.error(reason);
            ExitCode::GeneralError
        }
    }
}

/// Report a batch and derive the exit code: any failed item is an error
fn finish_batch(formatter: &Formatter, report: BatchReport) -> ExitCode {
    if formatter.is_json() {
        formatter.json(&report);
    } else {
        for item in report.failed() {
            if let Outcome::Failed(reason) = &item.outcome {
                formatter.error(reason);
            }
        }
        let skipped = report.len() - report.done_count() - report.failed_count();
        formatter.success(&format!(
            "{} completed, {} skipped, {} failed",
            report.done_count(),
            skipped,
            report.failed_count()
        ));
    }

    if report.all_succeeded() {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    }
}
