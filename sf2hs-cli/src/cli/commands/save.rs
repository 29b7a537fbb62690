//! `save-fields`: write Salesforce field metadata (or the resolved plan) to a file

use std::path::PathBuf;

use anyhow::Result;
use colored::*;

use super::context::{connect_salesforce, prepare};
use super::sync::plan_configured_objects;
use super::{Status, target_objects};
use crate::api::schema::SourceSchema;
use crate::cli::CommonArgs;
use crate::cli::display::{print_error, print_failures, print_success};
use crate::fields_file::{FieldsFile, FileFormat, ObjectFields, save_fields};
use crate::report::write_plans;
use crate::sync::types::ObjectPlan;

pub async fn handle_save_fields(
    common: CommonArgs,
    output: Option<PathBuf>,
    format: FileFormat,
    migratable_only: bool,
    plan: bool,
) -> Result<Status> {
    if plan {
        return save_plan(&common, output, format).await;
    }

    let config = prepare(&common, false)?;
    let objects = target_objects(common.object.as_deref(), &config)?;
    let client = connect_salesforce(&config).await?;

    let mut file = FieldsFile::default();
    let mut has_problems = false;

    for object in &objects {
        let fields = match client.describe_object(object).await {
            Ok(fields) => fields,
            Err(err) if err.is_not_found() => {
                print_error(&format!("Object '{}' does not exist in Salesforce", object));
                has_problems = true;
                continue;
            }
            Err(err) => {
                print_error(&format!("Error retrieving fields for {}: {}", object, err));
                has_problems = true;
                continue;
            }
        };

        let mut records = ObjectFields::from_descriptors(object.as_str(), &fields);
        // An explicit --object saves every field; configured objects only their mapped ones
        if common.object.is_none() {
            if let Some(mapping) = config.find_object(object) {
                records = records.restrict_to(mapping);
            }
        }
        if migratable_only {
            records = records.migratable_only();
        }
        file.objects.push(records);
    }

    if file.objects.is_empty() {
        anyhow::bail!("No field data to save");
    }

    let stem = match common.object.as_deref() {
        Some(object) => format!("{}_fields", object),
        None => "salesforce_fields".to_string(),
    };
    let path = output_path(output, &stem, format);

    save_fields(&file, format, &path.to_string_lossy())?;
    print_success(&format!(
        "Saved {} field(s) for {} object(s) to {}",
        file.field_count(),
        file.objects.len(),
        path.display().to_string().bright_green()
    ));

    Ok(Status::from_problems(has_problems))
}

async fn save_plan(common: &CommonArgs, output: Option<PathBuf>, format: FileFormat) -> Result<Status> {
    let config = prepare(common, true)?;
    let run = plan_configured_objects(&config, common.object.as_deref()).await?;
    print_failures(&run.failures);

    let plans: Vec<ObjectPlan> = run.objects.iter().map(|o| o.plan.clone()).collect();
    let path = output_path(output, "sync_plan", format);

    write_plans(&plans, format, &path.to_string_lossy())?;
    print_success(&format!(
        "Saved plan for {} object(s) to {}",
        plans.len(),
        path.display().to_string().bright_green()
    ));

    Ok(Status::from_problems(run.has_problems()))
}

fn output_path(output: Option<PathBuf>, stem: &str, format: FileFormat) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(format!("{}.{}", stem, format.extension())))
}
