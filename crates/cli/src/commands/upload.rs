//! Upload action: local file or directory tree to the bucket

use std::path::Path;

use oss_core::{IgnoreRules, ItemReport, ObjectStore, Result, TransferEngine};

use super::Cli;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

pub async fn execute<S: ObjectStore + ?Sized>(
    engine: &TransferEngine<'_, S>,
    cli: &Cli,
    formatter: &Formatter,
) -> Result<ExitCode> {
    let target = super::target_path(cli)?;
    let local = Path::new(&cli.source_path);

    if cli.dir_enable {
        let rules = match &cli.ignore {
            Some(patterns) => Some(IgnoreRules::parse(patterns)?),
            None => None,
        };
        let report = engine.upload_dir(local, target, rules.as_ref()).await?;
        Ok(super::finish_batch(formatter, report))
    } else {
        let outcome = engine.upload_one(local, target).await;
        let message = format!("uploaded {} to {target}", cli.source_path);
        let report = ItemReport {
            source: cli.source_path.clone(),
            target: Some(target.to_string()),
            outcome,
        };
        Ok(super::finish_single(formatter, report, &message))
    }
}
