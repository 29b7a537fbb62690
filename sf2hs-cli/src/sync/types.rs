//! Core data types for field sync
//!
//! A resolved plan is produced fresh for every run from the configured
//! mappings and the two schema snapshots; nothing here is persisted.

use serde::Serialize;

use crate::api::metadata::{FieldDescriptor, HubSpotType, PropertyDescriptor};
use crate::config::FieldMapping;

/// What to do with one configured field mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Target property does not exist yet
    Create,
    /// Target property exists with the wrong type
    Update,
    /// Source field or target property cannot be migrated
    SkipUnmigratable,
    /// Target property already matches
    SkipUnchanged,
    /// Source field does not exist on the Salesforce object
    ErrorMissingSource,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::SkipUnmigratable => "Skip (unmigratable)",
            Self::SkipUnchanged => "Skip (unchanged)",
            Self::ErrorMissingSource => "Error (missing source)",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Create => "+",
            Self::Update => "~",
            Self::SkipUnmigratable => "-",
            Self::SkipUnchanged => "=",
            Self::ErrorMissingSource => "!",
        }
    }

    /// Whether the executor calls the target for this decision
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorMissingSource)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One field mapping cross-referenced against both schemas
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub mapping: FieldMapping,
    /// Matched Salesforce field, absent when the source field does not exist
    pub source_field: Option<FieldDescriptor>,
    /// Matched HubSpot property, absent when it does not exist yet
    pub target_property: Option<PropertyDescriptor>,
    /// HubSpot property name this mapping writes to
    pub target_name: String,
    pub decision: Decision,
    pub reason: String,
}

impl ResolvedItem {
    pub fn source_name(&self) -> &str {
        &self.mapping.name
    }

    /// HubSpot type the property should have, when the source field is known
    pub fn desired_type(&self) -> Option<HubSpotType> {
        self.source_field.as_ref().map(|f| f.hubspot_type())
    }
}

/// Resolved plan for one configured object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPlan {
    pub source_object: String,
    pub target_object: String,
    /// Group new properties are created in
    pub property_group: String,
    pub items: Vec<ResolvedItem>,
}

impl ObjectPlan {
    pub fn count(&self, decision: Decision) -> usize {
        self.items.iter().filter(|i| i.decision == decision).count()
    }

    pub fn actionable(&self) -> impl Iterator<Item = &ResolvedItem> {
        self.items.iter().filter(|i| i.decision.is_actionable())
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|i| i.decision.is_error())
    }
}

/// Outcome of executing one resolved item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    Applied,
    Failed,
    Skipped,
}

impl SyncOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Failed => "Failed",
            Self::Skipped => "Skipped",
        }
    }
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-item execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub field_name: String,
    pub target_name: String,
    pub decision: Decision,
    pub outcome: SyncOutcome,
    /// Last error for failures, resolution reason for skips
    pub detail: Option<String>,
    /// Calls made against HubSpot (0 for skipped items)
    pub attempts: u32,
}

/// Counts over a set of sync results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub applied: usize,
    pub failed: usize,
    pub skipped: usize,
    pub missing_source: usize,
}

impl SyncSummary {
    pub fn from_results(results: &[SyncResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.outcome {
                SyncOutcome::Applied => summary.applied += 1,
                SyncOutcome::Failed => summary.failed += 1,
                SyncOutcome::Skipped => summary.skipped += 1,
            }
            if result.decision.is_error() {
                summary.missing_source += 1;
            }
        }
        summary
    }

    pub fn add(&mut self, other: SyncSummary) {
        self.applied += other.applied;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.missing_source += other.missing_source;
    }

    pub fn has_problems(&self) -> bool {
        self.failed > 0 || self.missing_source > 0
    }
}

/// Plan and results for one object
#[derive(Debug, Clone)]
pub struct ObjectSyncReport {
    pub plan: ObjectPlan,
    /// Empty for dry runs
    pub results: Vec<SyncResult>,
}

impl ObjectSyncReport {
    pub fn summary(&self) -> SyncSummary {
        SyncSummary::from_results(&self.results)
    }
}

/// An object that could not be planned at all (describe or list failed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectFailure {
    pub object: String,
    pub message: String,
}

/// Everything a sync run produced, in configuration order
#[derive(Debug, Clone, Default)]
pub struct SyncRun {
    pub objects: Vec<ObjectSyncReport>,
    pub failures: Vec<ObjectFailure>,
    pub dry_run: bool,
}

impl SyncRun {
    pub fn summary(&self) -> SyncSummary {
        let mut total = SyncSummary::default();
        for object in &self.objects {
            total.add(object.summary());
        }
        total
    }

    /// Exit status: any failed item, missing source field or unplannable object
    pub fn has_problems(&self) -> bool {
        !self.failures.is_empty()
            || self.summary().has_problems()
            || self.objects.iter().any(|o| o.plan.has_errors())
    }
}
