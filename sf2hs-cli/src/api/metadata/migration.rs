//! Rules deciding whether a Salesforce field can be carried over to HubSpot
//!
//! The rule set is a trait so callers can swap in their own assessment; the
//! default [`MigrationRules`] blocks system audit fields, formula fields and
//! compound address fields, and classifies references.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::types::SalesforceType;

/// Audit fields every Salesforce object carries; HubSpot keeps its own equivalents
pub const DEFAULT_SYSTEM_FIELDS: &[&str] = &[
    "CreatedById",
    "LastModifiedById",
    "CreatedDate",
    "LastModifiedDate",
    "SystemModstamp",
    "LastViewedDate",
    "LastReferencedDate",
];

/// Why a field cannot be migrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    SystemField,
    FormulaField,
    CompoundField,
    /// Marked non-migratable in an imported fields file without a specific cause
    Flagged,
}

impl BlockReason {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SystemField => "system_field",
            Self::FormulaField => "formula_field",
            Self::CompoundField => "compound_field",
            Self::Flagged => "flagged",
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            Self::SystemField => "System field - exists in HubSpot",
            Self::FormulaField => "Formula field - requires custom implementation",
            Self::CompoundField => "Address field - compound field type",
            Self::Flagged => "Marked as not migratable",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::SystemField => "system field",
            Self::FormulaField => "formula field",
            Self::CompoundField => "compound address field",
            Self::Flagged => "flagged as not migratable",
        };
        f.write_str(text)
    }
}

/// Outcome of assessing one source field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Migratability {
    /// Copied as a plain property
    Direct,
    /// Reference to a User record, mapped onto a HubSpot owner/user property
    UserReference,
    /// Reference to another object, normally expressed as an association
    Association,
    Blocked(BlockReason),
}

impl Migratability {
    pub fn is_migratable(&self) -> bool {
        !matches!(self, Self::Blocked(_))
    }

    pub fn block_reason(&self) -> Option<BlockReason> {
        match self {
            Self::Blocked(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Short machine-readable label, stable across saved fields files
    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::UserReference => "user_reference",
            Self::Association => "association",
            Self::Blocked(reason) => reason.label(),
        }
    }

    /// Inverse of [`Migratability::label`]; `can_migrate` decides unknown labels
    pub fn from_label(label: &str, can_migrate: bool) -> Self {
        let parsed = match label.trim().to_ascii_lowercase().as_str() {
            "direct" => Self::Direct,
            "user_reference" => Self::UserReference,
            "association" => Self::Association,
            "system_field" => Self::Blocked(BlockReason::SystemField),
            "formula_field" => Self::Blocked(BlockReason::FormulaField),
            "compound_field" => Self::Blocked(BlockReason::CompoundField),
            _ => Self::Blocked(BlockReason::Flagged),
        };

        match (parsed.is_migratable(), can_migrate) {
            (true, false) => Self::Blocked(BlockReason::Flagged),
            (false, true) => Self::Direct,
            _ => parsed,
        }
    }

    pub fn notes(&self) -> Vec<String> {
        match self {
            Self::Direct => Vec::new(),
            Self::UserReference => {
                vec!["User reference field - will be mapped to HubSpot user field".to_string()]
            }
            Self::Association => {
                vec!["Reference field - usually created as association".to_string()]
            }
            Self::Blocked(reason) => vec![reason.note().to_string()],
        }
    }
}

/// The attributes of a describe result that migratability depends on
#[derive(Debug, Clone, Copy)]
pub struct FieldFacts<'a> {
    pub name: &'a str,
    pub field_type: &'a SalesforceType,
    pub calculated: bool,
    pub reference_to: &'a [String],
}

/// Pluggable migratability assessment
pub trait MigrationPolicy: Send + Sync {
    fn assess(&self, facts: &FieldFacts<'_>) -> Migratability;
}

/// Default rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRules {
    system_fields: BTreeSet<String>,
}

impl Default for MigrationRules {
    fn default() -> Self {
        Self {
            system_fields: DEFAULT_SYSTEM_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl MigrationRules {
    /// Default rules plus additional field names treated as system fields
    pub fn with_extra_system_fields<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rules = Self::default();
        rules.system_fields.extend(extra.into_iter().map(Into::into));
        rules
    }

    pub fn is_system_field(&self, name: &str) -> bool {
        self.system_fields.contains(name)
    }
}

impl MigrationPolicy for MigrationRules {
    fn assess(&self, facts: &FieldFacts<'_>) -> Migratability {
        if self.is_system_field(facts.name) {
            return Migratability::Blocked(BlockReason::SystemField);
        }

        if facts.calculated {
            return Migratability::Blocked(BlockReason::FormulaField);
        }

        match facts.field_type {
            SalesforceType::Reference => {
                if facts.reference_to == ["User"] {
                    Migratability::UserReference
                } else {
                    Migratability::Association
                }
            }
            SalesforceType::Address => Migratability::Blocked(BlockReason::CompoundField),
            _ => Migratability::Direct,
        }
    }
}
