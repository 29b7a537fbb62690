//! Plan and sync reports
//!
//! Flattens resolved plans and sync results into rows and writes them to
//! Excel (with a summary sheet), JSON or CSV.

pub mod excel;
pub mod formatting;

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;

use crate::fields_file::FileFormat;
use crate::sync::types::{ObjectPlan, ObjectSyncReport, SyncRun};

/// One resolved item, flattened for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRecord {
    pub object: String,
    pub hubspot_object: String,
    pub source_field: String,
    pub label: String,
    pub salesforce_type: String,
    pub target_property: String,
    pub hubspot_type: String,
    pub existing_type: String,
    pub decision: String,
    pub reason: String,
}

impl PlanRecord {
    pub const HEADERS: [&'static str; 10] = [
        "object",
        "hubspot_object",
        "source_field",
        "label",
        "salesforce_type",
        "target_property",
        "hubspot_type",
        "existing_type",
        "decision",
        "reason",
    ];

    fn values(&self) -> [&str; 10] {
        [
            self.object.as_str(),
            self.hubspot_object.as_str(),
            self.source_field.as_str(),
            self.label.as_str(),
            self.salesforce_type.as_str(),
            self.target_property.as_str(),
            self.hubspot_type.as_str(),
            self.existing_type.as_str(),
            self.decision.as_str(),
            self.reason.as_str(),
        ]
    }
}

pub fn plan_records(plan: &ObjectPlan) -> Vec<PlanRecord> {
    plan.items
        .iter()
        .map(|item| PlanRecord {
            object: plan.source_object.clone(),
            hubspot_object: plan.target_object.clone(),
            source_field: item.mapping.name.clone(),
            label: item
                .source_field
                .as_ref()
                .map(|f| f.label.clone())
                .unwrap_or_default(),
            salesforce_type: item
                .source_field
                .as_ref()
                .map(|f| f.field_type.to_string())
                .unwrap_or_default(),
            target_property: item.target_name.clone(),
            hubspot_type: item
                .desired_type()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            existing_type: item
                .target_property
                .as_ref()
                .map(|p| p.property_type.to_string())
                .unwrap_or_default(),
            decision: item.decision.label().to_string(),
            reason: item.reason.clone(),
        })
        .collect()
}

/// Write resolved plans in the requested format
pub fn write_plans(plans: &[ObjectPlan], format: FileFormat, path: &str) -> Result<()> {
    let records: Vec<PlanRecord> = plans.iter().flat_map(plan_records).collect();

    match format {
        FileFormat::Excel => {
            let run = SyncRun {
                objects: plans
                    .iter()
                    .cloned()
                    .map(|plan| ObjectSyncReport {
                        plan,
                        results: Vec::new(),
                    })
                    .collect(),
                failures: Vec::new(),
                dry_run: true,
            };
            excel::export_sync_report(&run, path)
        }
        FileFormat::Json => {
            let content = serde_json::to_string_pretty(&records).context("Failed to serialize plan")?;
            std::fs::write(path, content).with_context(|| format!("Failed to write JSON file: {}", path))?;
            log::info!("Plan written to {}", path);
            Ok(())
        }
        FileFormat::Csv => write_plan_csv(&records, path),
    }
}

fn write_plan_csv(records: &[PlanRecord], path: &str) -> Result<()> {
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path))?;

    wtr.write_record(PlanRecord::HEADERS)
        .context("Failed to write CSV header")?;
    for record in records {
        wtr.write_record(record.values())
            .with_context(|| format!("Failed to write plan row: {}.{}", record.object, record.source_field))?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;

    log::info!("CSV file exported to: {}", path);
    Ok(())
}
