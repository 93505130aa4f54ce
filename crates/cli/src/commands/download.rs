//! Download action: object or key prefix to the local filesystem

use std::path::Path;

use oss_core::{ItemReport, ObjectStore, Result, TransferEngine};

use super::Cli;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

pub async fn execute<S: ObjectStore + ?Sized>(
    engine: &TransferEngine<'_, S>,
    cli: &Cli,
    formatter: &Formatter,
) -> Result<ExitCode> {
    let target = super::target_path(cli)?;
    let local = Path::new(target);

    if cli.dir_enable {
        let report = match &cli.ignore {
            Some(suffix) => {
                engine
                    .download_dir_ignoring(&cli.source_path, local, suffix)
                    .await?
            }
            None => engine.download_dir(&cli.source_path, local).await?,
        };
        Ok(super::finish_batch(formatter, report))
    } else {
        let outcome = engine.download_one(&cli.source_path, local).await;
        let message = format!("downloaded {} to {target}", cli.source_path);
        let report = ItemReport {
            source: cli.source_path.clone(),
            target: Some(target.to_string()),
            outcome,
        };
        Ok(super::finish_single(formatter, report, &message))
    }
}
