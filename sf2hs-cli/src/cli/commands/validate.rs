//! `validate`: check configuration, credentials and connectivity
//!
//! Nothing here changes remote state, and connection problems are reported
//! as failed checks rather than errors.

use anyhow::Result;

use super::Status;
use super::context::{load_config, migration_rules};
use crate::api::schema::{SourceSchema, TargetSchema};
use crate::api::{HubSpotClient, SalesforceClient};
use crate::cli::CommonArgs;
use crate::cli::display::print_validation_report;
use crate::config::{Config, HubSpotCredentials, SalesforceCredentials, load_env_file};
use crate::sync::logic::{Connection, validate};

pub async fn handle_validate(common: CommonArgs) -> Result<Status> {
    // Structural problems become checks, so skip the fail-fast validation
    let config = match &common.config {
        Some(path) => Config::load(path)?,
        None => load_config(None, false)?,
    };
    load_env_file(&common.env_file)?;

    let salesforce = connect_salesforce(&config).await;
    let hubspot = connect_hubspot(&config);

    let source = match &salesforce {
        Ok(client) => Connection::Available(client as &dyn SourceSchema),
        Err(reason) => Connection::Unavailable(reason.clone()),
    };
    let target = match &hubspot {
        Some(Ok(client)) => Connection::Available(client as &dyn TargetSchema),
        Some(Err(reason)) => Connection::Unavailable(reason.clone()),
        None => Connection::NotConfigured,
    };

    let report = validate(&config, common.object.as_deref(), source, target).await;
    print_validation_report(&report);

    Ok(Status::from_problems(report.has_failures()))
}

async fn connect_salesforce(config: &Config) -> Result<SalesforceClient, String> {
    let credentials = SalesforceCredentials::from_env().map_err(|e| e.to_string())?;
    SalesforceClient::connect(&config.salesforce, &credentials, migration_rules(config))
        .await
        .map_err(|e| format!("login failed: {}", e))
}

fn connect_hubspot(config: &Config) -> Option<Result<HubSpotClient, String>> {
    let credentials = HubSpotCredentials::from_env()?;
    Some(HubSpotClient::new(&config.hubspot, &credentials).map_err(|e| e.to_string()))
}
