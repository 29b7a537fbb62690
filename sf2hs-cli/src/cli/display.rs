//! Console rendering: colour-coded tables, legends and summaries

use colored::*;

use crate::api::metadata::{FieldDescriptor, Migratability};
use crate::fields_file::FieldsFile;
use crate::sync::logic::{CheckStatus, ValidationReport};
use crate::sync::types::{Decision, ObjectFailure, ObjectPlan, ObjectSyncReport, SyncOutcome, SyncRun};

const MAX_CELL_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Green,
    Blue,
    Yellow,
    Red,
    Dimmed,
}

fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Plain => text.normal(),
        Tone::Green => text.green(),
        Tone::Blue => text.blue(),
        Tone::Yellow => text.yellow(),
        Tone::Red => text.red(),
        Tone::Dimmed => text.red().dimmed(),
    }
}

/// Plain-text table; each row carries one tone
struct Table {
    title: String,
    headers: Vec<&'static str>,
    rows: Vec<(Vec<String>, Tone)>,
}

impl Table {
    fn new(title: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    fn add_row(&mut self, cells: Vec<String>, tone: Tone) {
        self.rows.push((cells.into_iter().map(|c| truncate(&c)).collect(), tone));
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for (cells, _) in &self.rows {
            for (i, cell) in cells.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        widths
    }

    fn print(&self) {
        let widths = self.widths();

        println!("{}", self.title.bold());
        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", header.bold());
        println!("{}", "-".repeat(header.chars().count()).dimmed());

        for (cells, tone) in &self.rows {
            let line = cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| pad(c, *w))
                .collect::<Vec<_>>()
                .join("  ");
            println!("{}", paint(line.trim_end(), *tone));
        }

        if self.rows.is_empty() {
            println!("{}", "(none)".dimmed());
        }
        println!();
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut short: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
    short.push_str("...");
    short
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".bright_red().bold(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".bright_green(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "→".cyan(), message);
}

fn field_tone(field: &FieldDescriptor) -> Tone {
    match field.migration {
        Migratability::Blocked(_) => Tone::Dimmed,
        Migratability::UserReference => Tone::Blue,
        _ => Tone::Green,
    }
}

pub fn print_field_legend() {
    println!("{}", "Legend:".bold());
    println!("{} - Field can be migrated", "Green".green());
    println!(
        "{} - User reference field (mapped to a HubSpot owner property)",
        "Blue".blue()
    );
    println!("{} - Field cannot be migrated", "Red (dimmed)".red().dimmed());
    println!();
}

pub fn print_fields_table(object: &str, fields: &[FieldDescriptor]) {
    let mut table = Table::new(
        format!("Fields for {}", object),
        vec![
            "Field Name",
            "Label",
            "Type",
            "Required",
            "Unique",
            "Updateable",
            "Can Migrate",
            "Migration Type",
            "Notes",
        ],
    );

    for field in fields {
        table.add_row(
            vec![
                field.name.clone(),
                field.label.clone(),
                field.field_type.to_string(),
                yes_no(field.required),
                yes_no(field.unique),
                yes_no(field.updateable),
                yes_no(field.is_migratable()),
                field.migration.label().to_string(),
                field.migration_notes().join("; "),
            ],
            field_tone(field),
        );
    }

    table.print();
}

fn decision_tone(decision: Decision) -> Tone {
    match decision {
        Decision::Create | Decision::Update => Tone::Yellow,
        Decision::SkipUnchanged => Tone::Green,
        Decision::SkipUnmigratable => Tone::Dimmed,
        Decision::ErrorMissingSource => Tone::Red,
    }
}

pub fn print_plan(plan: &ObjectPlan) {
    let mut table = Table::new(
        format!("Plan for {} -> {}", plan.source_object, plan.target_object),
        vec!["", "Source Field", "Target Property", "Type", "Decision", "Reason"],
    );

    for item in &plan.items {
        table.add_row(
            vec![
                item.decision.symbol().to_string(),
                item.source_name().to_string(),
                item.target_name.clone(),
                item.desired_type().map(|t| t.to_string()).unwrap_or_default(),
                item.decision.label().to_string(),
                item.reason.clone(),
            ],
            decision_tone(item.decision),
        );
    }

    table.print();

    println!(
        "{} create, {} update, {} unchanged, {} unmigratable, {} missing source",
        plan.count(Decision::Create).to_string().yellow(),
        plan.count(Decision::Update).to_string().yellow(),
        plan.count(Decision::SkipUnchanged).to_string().green(),
        plan.count(Decision::SkipUnmigratable),
        plan.count(Decision::ErrorMissingSource).to_string().red(),
    );
    println!();
}

fn outcome_tone(outcome: SyncOutcome) -> Tone {
    match outcome {
        SyncOutcome::Applied => Tone::Green,
        SyncOutcome::Failed => Tone::Red,
        SyncOutcome::Skipped => Tone::Plain,
    }
}

pub fn print_results(report: &ObjectSyncReport) {
    let mut table = Table::new(
        format!("Results for {}", report.plan.source_object),
        vec!["Source Field", "Target Property", "Decision", "Outcome", "Attempts", "Detail"],
    );

    for result in &report.results {
        table.add_row(
            vec![
                result.field_name.clone(),
                result.target_name.clone(),
                result.decision.label().to_string(),
                result.outcome.label().to_string(),
                result.attempts.to_string(),
                result.detail.clone().unwrap_or_default(),
            ],
            outcome_tone(result.outcome),
        );
    }

    table.print();
}

pub fn print_failures(failures: &[ObjectFailure]) {
    for failure in failures {
        print_error(&format!("{}: {}", failure.object, failure.message));
    }
}

pub fn print_run_summary(run: &SyncRun) {
    let summary = run.summary();

    println!("{}", "Summary".bold());
    if run.dry_run {
        let actionable: usize = run.objects.iter().map(|o| o.plan.actionable().count()).sum();
        println!("  Mode: {}", "dry run (no changes made)".cyan());
        println!("  Pending changes: {}", actionable.to_string().yellow());
    } else {
        println!("  Applied: {}", summary.applied.to_string().bright_green());
        println!("  Failed: {}", summary.failed.to_string().bright_red());
        println!("  Skipped: {}", summary.skipped);
    }

    let missing: usize = run
        .objects
        .iter()
        .map(|o| o.plan.count(Decision::ErrorMissingSource))
        .sum();
    if missing > 0 {
        println!("  Missing source fields: {}", missing.to_string().bright_red());
    }
    if !run.failures.is_empty() {
        println!("  Objects not planned: {}", run.failures.len().to_string().bright_red());
    }
    println!();
}

fn status_label(status: CheckStatus) -> ColoredString {
    match status {
        CheckStatus::Pass => status.label().bright_green().bold(),
        CheckStatus::Warn => status.label().yellow().bold(),
        CheckStatus::Fail => status.label().bright_red().bold(),
        CheckStatus::Skipped => status.label().dimmed(),
    }
}

pub fn print_validation_report(report: &ValidationReport) {
    let width = report
        .checks
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    println!("{}", "Validation".bold());
    for check in &report.checks {
        println!(
            "  [{}] {}  {}",
            status_label(check.status),
            pad(&check.name, width),
            check.detail.dimmed()
        );
    }
    println!();
    println!(
        "{} passed, {} warnings, {} failed, {} skipped",
        report.count(CheckStatus::Pass).to_string().bright_green(),
        report.count(CheckStatus::Warn).to_string().yellow(),
        report.count(CheckStatus::Fail).to_string().bright_red(),
        report.count(CheckStatus::Skipped),
    );
}

pub fn print_fields_file_summary(file: &FieldsFile) {
    println!("{}", "Fields file".bold());
    for object in &file.objects {
        let migratable = object.fields.iter().filter(|f| f.can_migrate).count();
        println!(
            "  {}: {} field(s), {} migratable",
            object.object.cyan(),
            object.fields.len(),
            migratable
        );
    }
    println!();
}
