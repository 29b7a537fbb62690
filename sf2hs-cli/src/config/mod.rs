//! Typed YAML configuration
//!
//! The configuration file is parsed once into explicit records and checked
//! for structural problems before any network call is made.

pub mod credentials;
pub mod error;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub use credentials::{HubSpotCredentials, SalesforceCredentials, load_env_file};
pub use error::{ConfigError, DuplicateTarget};

pub const DEFAULT_INSTANCE_URL: &str = "https://login.salesforce.com";
pub const DEFAULT_API_VERSION: &str = "57.0";
pub const DEFAULT_HUBSPOT_URL: &str = "https://api.hubapi.com";

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub salesforce: SalesforceSettings,
    #[serde(default)]
    pub hubspot: HubSpotSettings,
    #[serde(default)]
    pub objects: Vec<ObjectMapping>,
    #[serde(default)]
    pub sync_settings: SyncSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesforceSettings {
    #[serde(default = "default_instance_url")]
    pub instance_url: String,
    #[serde(default = "default_api_version", deserialize_with = "deserialize_version")]
    pub api_version: String,
    /// Extra field names treated as system fields (never migrated)
    #[serde(default)]
    pub system_fields: Vec<String>,
}

impl Default for SalesforceSettings {
    fn default() -> Self {
        Self {
            instance_url: default_instance_url(),
            api_version: default_api_version(),
            system_fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSpotSettings {
    #[serde(default = "default_hubspot_url")]
    pub base_url: String,
    /// Group for newly created properties; derived from the object type when absent
    #[serde(default)]
    pub property_group: Option<String>,
}

impl Default for HubSpotSettings {
    fn default() -> Self {
        Self {
            base_url: default_hubspot_url(),
            property_group: None,
        }
    }
}

/// One Salesforce object and the fields to carry over to a HubSpot object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMapping {
    pub name: String,
    #[serde(default)]
    pub hubspot_object: String,
    #[serde(default)]
    pub fields: Vec<FieldMapping>,
}

/// A source field and, optionally, the HubSpot property it lands in
///
/// In YAML either `- Name` or `- { name: Name, hubspot_property: name }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FieldMappingEntry")]
pub struct FieldMapping {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hubspot_property: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldMappingEntry {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        hubspot_property: Option<String>,
    },
}

impl From<FieldMappingEntry> for FieldMapping {
    fn from(entry: FieldMappingEntry) -> Self {
        match entry {
            FieldMappingEntry::Name(name) => FieldMapping::new(name),
            FieldMappingEntry::Full {
                name,
                hubspot_property,
            } => FieldMapping {
                name,
                hubspot_property: hubspot_property.filter(|p| !p.trim().is_empty()),
            },
        }
    }
}

impl FieldMapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hubspot_property: None,
        }
    }

    pub fn to_property(name: impl Into<String>, hubspot_property: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hubspot_property: Some(hubspot_property.into()),
        }
    }

    /// HubSpot property name: the explicit one, else the source name verbatim
    pub fn target_name(&self) -> &str {
        self.hubspot_property.as_deref().unwrap_or(&self.name)
    }
}

impl ObjectMapping {
    /// Target names claimed by more than one field mapping, in first-seen order
    pub fn duplicate_targets(&self) -> Vec<DuplicateTarget> {
        let mut by_target: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        let mut order: Vec<&str> = Vec::new();

        for field in &self.fields {
            let target = field.target_name();
            let sources = by_target.entry(target).or_default();
            if sources.is_empty() {
                order.push(target);
            }
            sources.push(&field.name);
        }

        order
            .into_iter()
            .filter_map(|target| {
                let sources = &by_target[target];
                (sources.len() > 1).then(|| DuplicateTarget {
                    target: target.to_string(),
                    source_fields: sources.iter().map(|s| s.to_string()).collect(),
                })
            })
            .collect()
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// `sync_settings` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Record batch size; carried for record-level operations
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Attempts per mutating call, first attempt included
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Seconds between attempts
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
        }
    }
}

/// A structural problem found in a loaded configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted location, e.g. `objects.Account.fields`
    pub location: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl Config {
    /// Read and parse a YAML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!(
            "Loaded configuration from {} ({} objects)",
            path.display(),
            config.objects.len()
        );
        Ok(config)
    }

    /// Structural problems: missing sections, duplicate targets, bad settings
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.objects.is_empty() {
            issues.push(ConfigIssue {
                location: "objects".to_string(),
                message: "no objects configured".to_string(),
            });
        }

        let mut seen_objects: Vec<&str> = Vec::new();
        for object in &self.objects {
            issues.extend(object_issues(object));
            if seen_objects.contains(&object.name.as_str()) {
                issues.push(ConfigIssue {
                    location: format!("objects.{}", object.name),
                    message: "object is configured more than once".to_string(),
                });
            }
            seen_objects.push(&object.name);
        }

        if self.sync_settings.batch_size == 0 {
            issues.push(ConfigIssue {
                location: "sync_settings.batch_size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.sync_settings.max_retries == 0 {
            issues.push(ConfigIssue {
                location: "sync_settings.max_retries".to_string(),
                message: "must allow at least one attempt".to_string(),
            });
        }

        issues
    }

    /// Fail fast on any structural problem
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                issues: issues.iter().map(|i| i.to_string()).collect(),
            })
        }
    }

    pub fn find_object(&self, name: &str) -> Option<&ObjectMapping> {
        self.objects.iter().find(|o| o.name == name)
    }
}

/// Structural problems of a single object mapping
pub fn object_issues(object: &ObjectMapping) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let location = format!("objects.{}", object.name);

    if object.name.trim().is_empty() {
        issues.push(ConfigIssue {
            location: "objects".to_string(),
            message: "object without a name".to_string(),
        });
    }
    if object.hubspot_object.trim().is_empty() {
        issues.push(ConfigIssue {
            location: format!("{}.hubspot_object", location),
            message: "missing HubSpot object type".to_string(),
        });
    }
    if object.fields.is_empty() {
        issues.push(ConfigIssue {
            location: format!("{}.fields", location),
            message: "no fields configured".to_string(),
        });
    }
    for field in &object.fields {
        if field.name.trim().is_empty() {
            issues.push(ConfigIssue {
                location: format!("{}.fields", location),
                message: "field without a name".to_string(),
            });
        }
    }
    for duplicate in object.duplicate_targets() {
        issues.push(ConfigIssue {
            location: format!("{}.fields", location),
            message: format!("duplicate target property {}", duplicate),
        });
    }

    issues
}

fn default_instance_url() -> String {
    DEFAULT_INSTANCE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_hubspot_url() -> String {
    DEFAULT_HUBSPOT_URL.to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5
}

/// Accept `api_version: 57.0` as well as `api_version: "57.0"`
fn deserialize_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Number(f64),
    }

    Ok(match Version::deserialize(deserializer)? {
        Version::Text(text) => text,
        Version::Number(number) => format!("{:.1}", number),
    })
}
