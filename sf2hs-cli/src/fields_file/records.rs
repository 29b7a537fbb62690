//! Saved field metadata: one record per Salesforce field, grouped by object

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::api::metadata::{FieldDescriptor, Migratability, PicklistValue, SalesforceType};
use crate::config::ObjectMapping;

/// Column names, in the order they are written
pub const COLUMNS: &[&str] = &[
    "name",
    "label",
    "type",
    "length",
    "precision",
    "scale",
    "required",
    "unique",
    "updateable",
    "createable",
    "reference_to",
    "picklist_values",
    "can_migrate",
    "migration_type",
    "migration_notes",
    "hubspot_property",
];

/// Columns a loaded record must carry
pub const REQUIRED_COLUMNS: &[&str] = &[
    "name",
    "label",
    "type",
    "required",
    "unique",
    "updateable",
    "can_migrate",
    "migration_type",
];

/// Columns holding booleans
pub const BOOL_COLUMNS: &[&str] = &["required", "unique", "updateable", "createable", "can_migrate"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    pub required: bool,
    pub unique: bool,
    pub updateable: bool,
    #[serde(default = "default_true")]
    pub createable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picklist_values: Option<Vec<PicklistValue>>,
    pub can_migrate: bool,
    pub migration_type: String,
    #[serde(default)]
    pub migration_notes: Vec<String>,
    /// Configured HubSpot property, when it differs from the field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hubspot_property: Option<String>,
}

fn default_true() -> bool {
    true
}

impl From<&FieldDescriptor> for FieldRecord {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            label: field.label.clone(),
            field_type: field.field_type.api_name().to_string(),
            length: field.length,
            precision: field.precision,
            scale: field.scale,
            required: field.required,
            unique: field.unique,
            updateable: field.updateable,
            createable: field.createable,
            reference_to: field.reference_to.clone(),
            picklist_values: field
                .field_type
                .is_picklist()
                .then(|| field.picklist_values.clone()),
            can_migrate: field.is_migratable(),
            migration_type: field.migration.label().to_string(),
            migration_notes: field.migration_notes(),
            hubspot_property: None,
        }
    }
}

impl FieldRecord {
    pub fn to_descriptor(&self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name.clone(),
            label: self.label.clone(),
            field_type: SalesforceType::from_api_name(&self.field_type),
            migration: Migratability::from_label(&self.migration_type, self.can_migrate),
            required: self.required,
            unique: self.unique,
            updateable: self.updateable,
            createable: self.createable,
            length: self.length,
            precision: self.precision,
            scale: self.scale,
            reference_to: self.reference_to.clone(),
            picklist_values: self.picklist_values.clone().unwrap_or_default(),
        }
    }
}

/// Field records of one Salesforce object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectFields {
    pub object: String,
    pub fields: Vec<FieldRecord>,
}

impl ObjectFields {
    pub fn from_descriptors(object: impl Into<String>, fields: &[FieldDescriptor]) -> Self {
        Self {
            object: object.into(),
            fields: fields.iter().map(FieldRecord::from).collect(),
        }
    }

    /// Keep only the fields listed in `mapping`, in describe order, and
    /// record their configured HubSpot property names
    pub fn restrict_to(mut self, mapping: &ObjectMapping) -> Self {
        if mapping.fields.is_empty() {
            return self;
        }

        self.fields.retain(|f| mapping.find_field(&f.name).is_some());
        for record in &mut self.fields {
            record.hubspot_property = mapping
                .find_field(&record.name)
                .and_then(|m| m.hubspot_property.clone());
        }
        self
    }

    pub fn migratable_only(mut self) -> Self {
        self.fields.retain(|f| f.can_migrate);
        self
    }
}

/// A whole fields file: objects in the order they were saved
///
/// Serializes as a JSON object keyed by object name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldsFile {
    pub objects: Vec<ObjectFields>,
}

impl FieldsFile {
    pub fn find(&self, object: &str) -> Option<&ObjectFields> {
        self.objects.iter().find(|o| o.object == object)
    }

    pub fn field_count(&self) -> usize {
        self.objects.iter().map(|o| o.fields.len()).sum()
    }
}

impl Serialize for FieldsFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.objects.len()))?;
        for object in &self.objects {
            map.serialize_entry(&object.object, &object.fields)?;
        }
        map.end()
    }
}
