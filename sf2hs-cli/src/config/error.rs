//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Two or more source fields resolving to one HubSpot property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTarget {
    pub target: String,
    pub source_fields: Vec<String>,
}

impl std::fmt::Display for DuplicateTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is targeted by {}",
            self.target,
            self.source_fields.join(", ")
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {}", .issues.join("; "))]
    Invalid { issues: Vec<String> },

    #[error(
        "object '{object}' maps several fields to the same HubSpot property: {}",
        format_duplicates(.duplicates)
    )]
    DuplicateTargets {
        object: String,
        duplicates: Vec<DuplicateTarget>,
    },

    #[error("missing credentials: {}", .missing.join(", "))]
    MissingCredentials { missing: Vec<String> },
}

fn format_duplicates(duplicates: &[DuplicateTarget]) -> String {
    duplicates
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
