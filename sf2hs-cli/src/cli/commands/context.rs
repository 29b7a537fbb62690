//! Shared setup for commands: configuration, credentials and clients

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{HubSpotClient, MigrationPolicy, MigrationRules, SalesforceClient};
use crate::cli::CommonArgs;
use crate::config::{Config, HubSpotCredentials, SalesforceCredentials, load_env_file};

/// Load the configuration named by `--config`, or defaults when absent.
///
/// A configuration with objects (or one the command cannot work without) is
/// validated before anything else happens.
pub fn load_config(path: Option<&Path>, require_objects: bool) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None if require_objects => {
            anyhow::bail!("This command needs a configuration file; pass one with --config")
        }
        None => {
            log::debug!("No configuration file given, using default settings");
            Config::default()
        }
    };

    if require_objects || !config.objects.is_empty() {
        config.ensure_valid()?;
    }
    Ok(config)
}

/// Load the configuration and the env file named in `common`
pub fn prepare(common: &CommonArgs, require_objects: bool) -> Result<Config> {
    let config = load_config(common.config.as_deref(), require_objects)?;
    load_env_file(&common.env_file)?;

    if let Some(object) = &common.object {
        if !config.objects.is_empty() && config.find_object(object).is_none() {
            log::warn!("Object '{}' is not in the configuration", object);
        }
    }
    Ok(config)
}

pub fn migration_rules(config: &Config) -> Arc<dyn MigrationPolicy> {
    Arc::new(MigrationRules::with_extra_system_fields(
        config.salesforce.system_fields.iter().cloned(),
    ))
}

pub async fn connect_salesforce(config: &Config) -> Result<SalesforceClient> {
    let credentials = SalesforceCredentials::from_env()?;
    SalesforceClient::connect(&config.salesforce, &credentials, migration_rules(config))
        .await
        .context("Failed to connect to Salesforce")
}

/// HubSpot is optional for planning: `None` when no token is configured
pub fn connect_hubspot(config: &Config) -> Result<Option<HubSpotClient>> {
    let Some(credentials) = HubSpotCredentials::from_env() else {
        log::info!("No HubSpot access token configured");
        return Ok(None);
    };

    let client = HubSpotClient::new(&config.hubspot, &credentials)
        .context("Failed to create HubSpot client")?;
    Ok(Some(client))
}
