//! Whole-configuration sync: plan and execute every object in order

use crate::api::resilience::RetryPolicy;
use crate::api::schema::{SourceSchema, TargetSchema};
use crate::config::{Config, ConfigError};
use crate::sync::types::{ObjectFailure, ObjectSyncReport, SyncRun};

use super::execution::execute_plan;
use super::planner::{PlanError, plan_object};

/// Plan every configured object (optionally only `only`) and, unless this is
/// a dry run, execute the plans against `target`
///
/// Configuration errors abort the run; describe or list failures are recorded
/// for the object and the run moves on. An `only` naming no configured object
/// is recorded as a failure of that object.
pub async fn run_sync(
    config: &Config,
    only: Option<&str>,
    source: &dyn SourceSchema,
    target: Option<&dyn TargetSchema>,
    policy: &RetryPolicy,
    dry_run: bool,
) -> Result<SyncRun, ConfigError> {
    let mut run = SyncRun {
        dry_run: dry_run || target.is_none(),
        ..SyncRun::default()
    };

    if let Some(name) = only {
        if config.find_object(name).is_none() {
            log::error!("Object '{}' is not in the configuration", name);
            run.failures.push(ObjectFailure {
                object: name.to_string(),
                message: "object is not configured".to_string(),
            });
        }
    }

    for object in config
        .objects
        .iter()
        .filter(|o| only.is_none_or(|name| o.name == name))
    {
        log::info!("Planning {} -> {}", object.name, object.hubspot_object);

        let plan = match plan_object(object, source, target, &config.hubspot).await {
            Ok(plan) => plan,
            Err(PlanError::Config(err)) => return Err(err),
            Err(err) => {
                log::error!("{}", err);
                run.failures.push(ObjectFailure {
                    object: object.name.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        };

        let results = match target {
            Some(target) if !run.dry_run => execute_plan(&plan, target, policy).await,
            _ => Vec::new(),
        };

        run.objects.push(ObjectSyncReport { plan, results });
    }

    Ok(run)
}
