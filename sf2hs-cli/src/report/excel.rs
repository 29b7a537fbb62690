//! Excel sync report
//!
//! Generates a workbook containing:
//! - Summary sheet with per-object decision and outcome counts
//! - Plan sheet with every resolved item
//! - Results sheet with per-item outcomes (omitted for dry runs)
//! - Failures sheet for objects that could not be planned

use anyhow::{Context, Result};
use rust_xlsxwriter::*;

use super::formatting::*;
use super::{PlanRecord, plan_records};
use crate::sync::types::{Decision, SyncRun};

/// Export a sync run (or a plan-only run) to an Excel file
pub fn export_sync_report(run: &SyncRun, file_path: &str) -> Result<()> {
    let mut workbook = Workbook::new();

    create_summary_sheet(&mut workbook, run)?;
    create_plan_sheet(&mut workbook, run)?;
    if !run.dry_run {
        create_results_sheet(&mut workbook, run)?;
    }
    if !run.failures.is_empty() {
        create_failures_sheet(&mut workbook, run)?;
    }

    workbook
        .save(file_path)
        .with_context(|| format!("Failed to save Excel file: {}", file_path))?;

    log::info!("Sync report exported to: {}", file_path);
    Ok(())
}

fn create_summary_sheet(workbook: &mut Workbook, run: &SyncRun) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary")?;

    let title_format = create_title_format();
    let label_format = create_label_format();
    let header_format = create_header_format();

    sheet.write_string_with_format(0, 0, "Salesforce to HubSpot Sync Report", &title_format)?;
    sheet.write_string_with_format(2, 0, "Generated", &label_format)?;
    sheet.write_string(
        2,
        1,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    )?;
    sheet.write_string_with_format(3, 0, "Mode", &label_format)?;
    sheet.write_string(3, 1, if run.dry_run { "Plan only" } else { "Applied" })?;

    let headers = [
        "Object",
        "HubSpot Object",
        "Create",
        "Update",
        "Unmigratable",
        "Unchanged",
        "Missing Source",
        "Applied",
        "Failed",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(5, col as u16, *header, &header_format)?;
    }

    let mut row = 6u32;
    for object in &run.objects {
        let plan = &object.plan;
        let summary = object.summary();
        sheet.write_string(row, 0, &plan.source_object)?;
        sheet.write_string(row, 1, &plan.target_object)?;
        sheet.write_number(row, 2, plan.count(Decision::Create) as f64)?;
        sheet.write_number(row, 3, plan.count(Decision::Update) as f64)?;
        sheet.write_number(row, 4, plan.count(Decision::SkipUnmigratable) as f64)?;
        sheet.write_number(row, 5, plan.count(Decision::SkipUnchanged) as f64)?;
        sheet.write_number(row, 6, plan.count(Decision::ErrorMissingSource) as f64)?;
        sheet.write_number(row, 7, summary.applied as f64)?;
        sheet.write_number(row, 8, summary.failed as f64)?;
        row += 1;
    }

    for failure in &run.failures {
        sheet.write_string_with_format(row, 0, &failure.object, &create_error_format())?;
        sheet.write_string(row, 1, "not planned")?;
        row += 1;
    }

    sheet.autofit();
    Ok(())
}

fn create_plan_sheet(workbook: &mut Workbook, run: &SyncRun) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Plan")?;

    let header_format = create_header_format();
    for (col, header) in PlanRecord::HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let mut row = 1u32;
    for object in &run.objects {
        for (item, record) in object.plan.items.iter().zip(plan_records(&object.plan)) {
            for (col, value) in record.values().iter().enumerate() {
                sheet.write_string(row, col as u16, *value)?;
            }
            // Colour the decision cell
            sheet.write_string_with_format(row, 8, &record.decision, &decision_format(item.decision))?;
            row += 1;
        }
    }

    if row == 1 {
        sheet.write_string(1, 0, "No objects planned")?;
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();
    Ok(())
}

fn create_results_sheet(workbook: &mut Workbook, run: &SyncRun) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Results")?;

    let header_format = create_header_format();
    let headers = ["Object", "Source Field", "Target Property", "Decision", "Outcome", "Attempts", "Detail"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let mut row = 1u32;
    for object in &run.objects {
        for result in &object.results {
            sheet.write_string(row, 0, &object.plan.source_object)?;
            sheet.write_string(row, 1, &result.field_name)?;
            sheet.write_string(row, 2, &result.target_name)?;
            sheet.write_string(row, 3, result.decision.label())?;
            sheet.write_string_with_format(row, 4, result.outcome.label(), &outcome_format(result.outcome))?;
            sheet.write_number(row, 5, result.attempts as f64)?;
            sheet.write_string(row, 6, result.detail.as_deref().unwrap_or(""))?;
            row += 1;
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();
    Ok(())
}

fn create_failures_sheet(workbook: &mut Workbook, run: &SyncRun) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Failures")?;

    let header_format = create_header_format();
    sheet.write_string_with_format(0, 0, "Object", &header_format)?;
    sheet.write_string_with_format(0, 1, "Error", &header_format)?;

    for (i, failure) in run.failures.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &failure.object)?;
        sheet.write_string(row, 1, &failure.message)?;
    }

    sheet.autofit();
    Ok(())
}
