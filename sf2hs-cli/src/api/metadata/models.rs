//! Schema snapshots exchanged with Salesforce and HubSpot

use serde::{Deserialize, Serialize};

use super::migration::Migratability;
use super::types::{HubSpotType, SalesforceType};

/// Salesforce field metadata, as returned by an object describe
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub field_type: SalesforceType,
    pub migration: Migratability,
    pub required: bool,
    pub unique: bool,
    pub updateable: bool,
    pub createable: bool,
    pub length: Option<u32>,
    /// Total digits of number, currency and percent fields
    pub precision: Option<u32>,
    /// Digits right of the decimal point
    pub scale: Option<u32>,
    /// Target objects for reference fields
    pub reference_to: Vec<String>,
    /// Values for picklist-like fields
    pub picklist_values: Vec<PicklistValue>,
}

impl FieldDescriptor {
    pub fn is_migratable(&self) -> bool {
        self.migration.is_migratable()
    }

    pub fn migration_notes(&self) -> Vec<String> {
        self.migration.notes()
    }

    /// HubSpot type this field maps to
    pub fn hubspot_type(&self) -> HubSpotType {
        HubSpotType::for_salesforce(&self.field_type)
    }
}

/// A single picklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistValue {
    pub label: String,
    pub value: String,
}

/// HubSpot property metadata for one object type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub label: String,
    pub property_type: HubSpotType,
    pub field_type: String,
    /// The property definition cannot be modified (HubSpot-defined or locked)
    pub read_only: bool,
    pub group_name: Option<String>,
    pub description: Option<String>,
}

/// Payload for creating a HubSpot property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub property_type: HubSpotType,
    pub field_type: String,
    pub group_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
}

/// Payload for retyping an existing HubSpot property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    #[serde(rename = "type")]
    pub property_type: HubSpotType,
    pub field_type: String,
    /// Replaces the option set; enumeration and bool properties need one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
}

/// Option of an enumeration or bool property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOption {
    pub label: String,
    pub value: String,
    pub display_order: i32,
    pub hidden: bool,
}

impl PropertyOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>, display_order: i32) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            display_order,
            hidden: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_property_serializes_to_hubspot_shape() {
        let property = NewProperty {
            name: "type".to_string(),
            label: "Account Type".to_string(),
            property_type: HubSpotType::Enumeration,
            field_type: "select".to_string(),
            group_name: "companyinformation".to_string(),
            description: "Migrated".to_string(),
            options: vec![PropertyOption::new("Customer", "Customer", 0)],
        };

        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["type"], "enumeration");
        assert_eq!(json["fieldType"], "select");
        assert_eq!(json["groupName"], "companyinformation");
        assert_eq!(json["options"][0]["displayOrder"], 0);
        assert_eq!(json["options"][0]["hidden"], false);
    }

    #[test]
    fn test_update_to_enumeration_carries_options() {
        let update = PropertyUpdate {
            property_type: HubSpotType::Enumeration,
            field_type: "select".to_string(),
            options: vec![
                PropertyOption::new("Hot", "Hot", 0),
                PropertyOption::new("Cold", "Cold", 1),
            ],
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["type"], "enumeration");
        assert_eq!(json["fieldType"], "select");
        assert_eq!(json["options"].as_array().unwrap().len(), 2);
        assert_eq!(json["options"][1]["value"], "Cold");
        assert_eq!(json["options"][1]["displayOrder"], 1);
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_empty_options_are_omitted() {
        let property = NewProperty {
            name: "industry".to_string(),
            label: "Industry".to_string(),
            property_type: HubSpotType::String,
            field_type: "text".to_string(),
            group_name: "companyinformation".to_string(),
            description: String::new(),
            options: Vec::new(),
        };

        let json = serde_json::to_value(&property).unwrap();
        assert!(json.get("options").is_none());
    }
}
