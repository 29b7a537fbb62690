//! `sync`: resolve the configured mappings and apply them to HubSpot

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::*;

use super::Status;
use super::context::{connect_hubspot, connect_salesforce, prepare};
use crate::api::schema::{SourceSchema, TargetSchema};
use crate::api::{RetryConfig, RetryPolicy};
use crate::cli::CommonArgs;
use crate::cli::display::{
    print_failures, print_info, print_plan, print_results, print_run_summary, print_success,
    print_warning,
};
use crate::config::Config;
use crate::fields_file::{FieldsFileSource, FileFormat, load_fields};
use crate::report::excel::export_sync_report;
use crate::sync::logic::run_sync;
use crate::sync::types::SyncRun;

pub async fn handle_sync(
    common: CommonArgs,
    fields_file: Option<PathBuf>,
    fields_format: Option<FileFormat>,
    dry_run: bool,
    report: Option<PathBuf>,
) -> Result<Status> {
    let config = prepare(&common, true)?;

    let source: Box<dyn SourceSchema> = match &fields_file {
        Some(path) => {
            let format = resolve_format(path, fields_format)?;
            let file = load_fields(&path.to_string_lossy(), format)?;
            print_info(&format!(
                "Using {} field(s) from {}",
                file.field_count(),
                path.display().to_string().cyan()
            ));
            Box::new(FieldsFileSource::new(file))
        }
        None => Box::new(connect_salesforce(&config).await?),
    };

    let hubspot = connect_hubspot(&config)?;
    if hubspot.is_none() && !dry_run {
        print_warning("No HubSpot access token configured; running as a dry run");
    }
    let target = hubspot.as_ref().map(|client| client as &dyn TargetSchema);

    let policy = RetryPolicy::new(RetryConfig::from_sync_settings(&config.sync_settings));
    let run = run_sync(
        &config,
        common.object.as_deref(),
        source.as_ref(),
        target,
        &policy,
        dry_run,
    )
    .await?;

    print_run(&run);

    if let Some(path) = report {
        export_sync_report(&run, &path.to_string_lossy())
            .with_context(|| format!("Failed to write sync report to {}", path.display()))?;
        print_success(&format!("Report saved to {}", path.display().to_string().bright_green()));
    }

    Ok(Status::from_problems(run.has_problems()))
}

/// Plan every configured object (or only `only`) against live Salesforce
/// and, when a token is configured, live HubSpot properties
pub(crate) async fn plan_configured_objects(config: &Config, only: Option<&str>) -> Result<SyncRun> {
    let source = connect_salesforce(config).await?;
    let hubspot = connect_hubspot(config)?;
    let target = hubspot.as_ref().map(|client| client as &dyn TargetSchema);

    let run = run_sync(config, only, &source, target, &RetryPolicy::default(), true).await?;
    Ok(run)
}

/// Explicit format, else guessed from the file extension
pub(crate) fn resolve_format(path: &std::path::Path, format: Option<FileFormat>) -> Result<FileFormat> {
    format
        .or_else(|| FileFormat::from_path(path))
        .with_context(|| format!("Cannot tell the format of {}; pass --format", path.display()))
}

fn print_run(run: &SyncRun) {
    for object in &run.objects {
        print_plan(&object.plan);
        if !run.dry_run {
            print_results(object);
        }
    }
    print_failures(&run.failures);
    print_run_summary(run);
}
