//! `list-fields`: show Salesforce fields with their migration status

use anyhow::Result;
use colored::*;

use super::context::{connect_salesforce, prepare};
use super::sync::plan_configured_objects;
use super::{Status, target_objects};
use crate::api::schema::SourceSchema;
use crate::cli::CommonArgs;
use crate::cli::display::{
    print_error, print_failures, print_field_legend, print_fields_table, print_plan,
};

pub async fn handle_list_fields(common: CommonArgs, migratable_only: bool, plan: bool) -> Result<Status> {
    if plan {
        return list_plan(&common).await;
    }

    let config = prepare(&common, false)?;
    let objects = target_objects(common.object.as_deref(), &config)?;
    let client = connect_salesforce(&config).await?;

    let mut has_problems = false;
    print_field_legend();

    for object in &objects {
        let mut fields = match client.describe_object(object).await {
            Ok(fields) => fields,
            Err(err) if err.is_not_found() => {
                print_error(&format!("Object '{}' does not exist in Salesforce", object));
                has_problems = true;
                continue;
            }
            Err(err) => {
                print_error(&format!("Error listing fields for {}: {}", object, err));
                has_problems = true;
                continue;
            }
        };

        if migratable_only {
            fields.retain(|f| f.is_migratable());
        }
        print_fields_table(object, &fields);
    }

    Ok(Status::from_problems(has_problems))
}

async fn list_plan(common: &CommonArgs) -> Result<Status> {
    let config = prepare(common, true)?;
    let run = plan_configured_objects(&config, common.object.as_deref()).await?;

    for object in &run.objects {
        print_plan(&object.plan);
    }
    print_failures(&run.failures);

    if run.objects.is_empty() && run.failures.is_empty() {
        println!("{}", "No configured objects matched".yellow());
    }

    Ok(Status::from_problems(run.has_problems()))
}
