use crate::{
    cli::args::PassArgs,
    core::{
        build_transform,
        config::{resolve_directory, ConfigLoader, ConfigValidator},
        BatchReport, BatchRunner, PassKind,
    },
    utils::discover_documents,
    Result,
};
use std::path::PathBuf;

/// Run one pass over every matching document in its directory.
///
/// A missing directory is logged and yields an empty report; per-file failures
/// are recorded in the report and never returned as errors.
pub fn run_pass(pass: PassKind, args: &PassArgs) -> Result<BatchReport> {
    let workspace_root = args.workspace_root();
    let config = ConfigLoader::load(&args.config_path())?;
    ConfigValidator::validate(&config)?;

    let directory: PathBuf = match &args.dir {
        Some(dir) => dir.clone(),
        None => resolve_directory(&workspace_root, config.directory_for(pass)),
    };
    if !directory.is_dir() {
        tracing::warn!("Directory not found: {}", directory.display());
        return Ok(BatchReport::default());
    }

    let targets = discover_documents(&directory, &config.discovery.suffix)?;
    if targets.is_empty() {
        tracing::info!(
            "No *{} files found in {}",
            config.discovery.suffix,
            directory.display()
        );
        return Ok(BatchReport::default());
    }

    tracing::debug!(pass = %pass, count = targets.len(), "starting batch");
    let runner = BatchRunner::new(vec![build_transform(pass, &config)?]);
    Ok(runner.run(&targets))
}
