//! Delete action: object or whole key prefix

use oss_core::{ItemReport, ObjectStore, Result, TransferEngine};

use super::Cli;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

pub async fn execute<S: ObjectStore + ?Sized>(
    engine: &TransferEngine<'_, S>,
    cli: &Cli,
    formatter: &Formatter,
) -> Result<ExitCode> {
    if cli.dir_enable {
        let report = engine.delete_dir(&cli.source_path).await?;
        Ok(super::finish_batch(formatter, report))
    } else {
        let outcome = engine.delete_one(&cli.source_path).await;
        let message = format!("deleted {}", cli.source_path);
        let report = ItemReport {
            source: cli.source_path.clone(),
            target: None,
            outcome,
        };
        Ok(super::finish_single(formatter, report, &message))
    }
}
