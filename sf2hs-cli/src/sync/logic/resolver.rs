//! Mapping resolution
//!
//! Cross-references the configured field mappings of one object against the
//! Salesforce describe result and the existing HubSpot properties, deciding
//! for every mapping whether to create, update or skip.

use std::collections::HashMap;

use crate::api::metadata::{FieldDescriptor, PropertyDescriptor};
use crate::config::{ConfigError, ObjectMapping};
use crate::sync::types::{Decision, ResolvedItem};

pub const REASON_MISSING_SOURCE: &str = "source field not found";
pub const REASON_READ_ONLY: &str = "target property is read-only";
pub const REASON_UNCHANGED: &str = "property already matches";

/// Resolve every field mapping of `object`, in declaration order
///
/// Fails without a partial plan when two mappings target the same property.
/// All other problems are reported per item.
pub fn resolve(
    object: &ObjectMapping,
    source_fields: &[FieldDescriptor],
    target_properties: &[PropertyDescriptor],
) -> Result<Vec<ResolvedItem>, ConfigError> {
    let duplicates = object.duplicate_targets();
    if !duplicates.is_empty() {
        return Err(ConfigError::DuplicateTargets {
            object: object.name.clone(),
            duplicates,
        });
    }

    // First occurrence wins should a schema ever list a name twice
    let mut fields_by_name: HashMap<&str, &FieldDescriptor> = HashMap::new();
    for field in source_fields {
        fields_by_name.entry(field.name.as_str()).or_insert(field);
    }
    let mut properties_by_name: HashMap<&str, &PropertyDescriptor> = HashMap::new();
    for property in target_properties {
        properties_by_name.entry(property.name.as_str()).or_insert(property);
    }

    let items = object
        .fields
        .iter()
        .map(|mapping| {
            let target_name = mapping.target_name().to_string();

            let Some(field) = fields_by_name.get(mapping.name.as_str()).copied() else {
                return ResolvedItem {
                    mapping: mapping.clone(),
                    source_field: None,
                    target_property: None,
                    target_name,
                    decision: Decision::ErrorMissingSource,
                    reason: REASON_MISSING_SOURCE.to_string(),
                };
            };

            let property = properties_by_name.get(target_name.as_str()).copied();
            let (decision, reason) = decide(field, property);

            ResolvedItem {
                mapping: mapping.clone(),
                source_field: Some(field.clone()),
                target_property: property.cloned(),
                target_name,
                decision,
                reason,
            }
        })
        .collect();

    Ok(items)
}

/// Decision for a mapping whose source field exists
fn decide(field: &FieldDescriptor, property: Option<&PropertyDescriptor>) -> (Decision, String) {
    if let Some(cause) = field.migration.block_reason() {
        return (Decision::SkipUnmigratable, format!("not migratable: {}", cause));
    }

    let desired = field.hubspot_type();

    match property {
        None => (
            Decision::Create,
            format!("property does not exist; create as {}", desired),
        ),
        Some(property) if property.read_only => {
            (Decision::SkipUnmigratable, REASON_READ_ONLY.to_string())
        }
        Some(property) if property.property_type != desired => (
            Decision::Update,
            format!(
                "type mismatch: HubSpot has {}, {} field needs {}",
                property.property_type, field.field_type, desired
            ),
        ),
        Some(_) => (Decision::SkipUnchanged, REASON_UNCHANGED.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::metadata::{BlockReason, HubSpotType, Migratability, SalesforceType};
    use crate::config::FieldMapping;
    use crate::sync::logic::test_support::{field, property};

    fn account(fields: Vec<FieldMapping>) -> ObjectMapping {
        ObjectMapping {
            name: "Account".to_string(),
            hubspot_object: "companies".to_string(),
            fields,
        }
    }

    fn decisions(items: &[ResolvedItem]) -> Vec<Decision> {
        items.iter().map(|i| i.decision).collect()
    }

    #[test]
    fn test_picklist_with_empty_target_is_created_under_source_name() {
        let object = account(vec![FieldMapping::new("Type")]);
        let source = vec![field("Type", SalesforceType::Picklist)];

        let items = resolve(&object, &source, &[]).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].decision, Decision::Create);
        assert_eq!(items[0].target_name, "Type");
        assert!(items[0].reason.contains("enumeration"));
        assert_eq!(items[0].desired_type(), Some(HubSpotType::Enumeration));
    }

    #[test]
    fn test_missing_source_field() {
        let object = account(vec![FieldMapping::to_property("Ghost__c", "ghost")]);
        // A property with the target name exists; it must not be consulted
        let target = vec![property("ghost", HubSpotType::String)];

        let items = resolve(&object, &[], &target).unwrap();

        assert_eq!(items[0].decision, Decision::ErrorMissingSource);
        assert_eq!(items[0].reason, REASON_MISSING_SOURCE);
        assert!(items[0].source_field.is_none());
        assert!(items[0].target_property.is_none());
    }

    #[test]
    fn test_unmigratable_source_is_skipped_regardless_of_target() {
        let mut last_modified = field("LastModifiedDate", SalesforceType::DateTime);
        last_modified.migration = Migratability::Blocked(BlockReason::SystemField);
        let object = account(vec![FieldMapping::new("LastModifiedDate")]);

        let target_sets = vec![
            vec![],
            vec![property("LastModifiedDate", HubSpotType::Date)],
            vec![property("LastModifiedDate", HubSpotType::String)],
        ];

        for target in target_sets {
            let items = resolve(&object, std::slice::from_ref(&last_modified), &target).unwrap();
            assert_eq!(items[0].decision, Decision::SkipUnmigratable);
            assert_eq!(items[0].reason, "not migratable: system field");
        }
    }

    #[test]
    fn test_formula_cause_is_reported() {
        let mut formula = field("Score__c", SalesforceType::Double);
        formula.migration = Migratability::Blocked(BlockReason::FormulaField);
        let object = account(vec![FieldMapping::new("Score__c")]);

        let items = resolve(&object, &[formula], &[]).unwrap();
        assert!(items[0].reason.contains("formula field"));
    }

    #[test]
    fn test_type_mismatch_is_updated() {
        let object = account(vec![FieldMapping::to_property("AnnualRevenue", "annualrevenue")]);
        let source = vec![field("AnnualRevenue", SalesforceType::Currency)];
        let target = vec![property("annualrevenue", HubSpotType::String)];

        let items = resolve(&object, &source, &target).unwrap();

        assert_eq!(items[0].decision, Decision::Update);
        assert!(items[0].reason.starts_with("type mismatch"));
        assert_eq!(items[0].target_property.as_ref().unwrap().name, "annualrevenue");
    }

    #[test]
    fn test_read_only_target_is_skipped_even_with_mismatched_type() {
        let object = account(vec![FieldMapping::to_property("CreatedById", "hs_created_by_user_id")]);
        let source = vec![field("CreatedById", SalesforceType::Reference)];

        for property_type in [HubSpotType::String, HubSpotType::Number] {
            let mut locked = property("hs_created_by_user_id", property_type);
            locked.read_only = true;

            let items = resolve(&object, &source, &[locked]).unwrap();
            assert_eq!(items[0].decision, Decision::SkipUnmigratable);
            assert_eq!(items[0].reason, REASON_READ_ONLY);
        }
    }

    #[test]
    fn test_matching_property_is_unchanged() {
        let object = account(vec![FieldMapping::to_property("Name", "name")]);
        let source = vec![field("Name", SalesforceType::String)];
        let target = vec![property("name", HubSpotType::String)];

        let items = resolve(&object, &source, &target).unwrap();
        assert_eq!(items[0].decision, Decision::SkipUnchanged);
    }

    #[test]
    fn test_names_match_exactly() {
        let object = account(vec![FieldMapping::new("Industry")]);
        let source = vec![field("industry", SalesforceType::String)];

        let items = resolve(&object, &source, &[]).unwrap();
        assert_eq!(items[0].decision, Decision::ErrorMissingSource);

        let source = vec![field("Industry", SalesforceType::String)];
        let target = vec![property("industry", HubSpotType::String)];
        let items = resolve(&object, &source, &target).unwrap();
        assert_eq!(items[0].decision, Decision::Create);
        assert_eq!(items[0].target_name, "Industry");
    }

    #[test]
    fn test_duplicate_targets_fail_without_partial_plan() {
        let object = account(vec![
            FieldMapping::new("Name"),
            FieldMapping::to_property("Industry", "industry"),
            FieldMapping::to_property("Sector__c", "industry"),
        ]);
        let source = vec![
            field("Name", SalesforceType::String),
            field("Industry", SalesforceType::Picklist),
            field("Sector__c", SalesforceType::Picklist),
        ];

        let err = resolve(&object, &source, &[]).unwrap_err();
        match err {
            ConfigError::DuplicateTargets { object, duplicates } => {
                assert_eq!(object, "Account");
                assert_eq!(duplicates.len(), 1);
                assert_eq!(duplicates[0].target, "industry");
                assert_eq!(duplicates[0].source_fields, vec!["Industry", "Sector__c"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_implicit_and_explicit_targets_collide() {
        let object = account(vec![
            FieldMapping::new("name"),
            FieldMapping::to_property("Name", "name"),
        ]);
        assert!(matches!(
            resolve(&object, &[], &[]),
            Err(ConfigError::DuplicateTargets { .. })
        ));
    }

    #[test]
    fn test_order_is_preserved_and_resolution_is_repeatable() {
        let object = account(vec![
            FieldMapping::new("Website"),
            FieldMapping::new("Missing__c"),
            FieldMapping::to_property("NumberOfEmployees", "numberofemployees"),
            FieldMapping::new("Active__c"),
            FieldMapping::to_property("Name", "name"),
        ]);
        let source = vec![
            field("Name", SalesforceType::String),
            field("Active__c", SalesforceType::Boolean),
            field("NumberOfEmployees", SalesforceType::Int),
            field("Website", SalesforceType::Url),
        ];
        let target = vec![
            property("name", HubSpotType::String),
            property("numberofemployees", HubSpotType::String),
        ];

        let first = resolve(&object, &source, &target).unwrap();
        let second = resolve(&object, &source, &target).unwrap();

        assert_eq!(first, second);
        let names: Vec<_> = first.iter().map(|i| i.source_name()).collect();
        assert_eq!(names, vec!["Website", "Missing__c", "NumberOfEmployees", "Active__c", "Name"]);
        assert_eq!(
            decisions(&first),
            vec![
                Decision::Create,
                Decision::ErrorMissingSource,
                Decision::Update,
                Decision::Create,
                Decision::SkipUnchanged,
            ]
        );
    }

    #[test]
    fn test_one_item_per_mapping() {
        let object = account(vec![
            FieldMapping::new("A"),
            FieldMapping::new("B"),
            FieldMapping::new("C"),
        ]);
        let source = vec![field("A", SalesforceType::String), field("C", SalesforceType::Date)];

        let items = resolve(&object, &source, &[]).unwrap();
        assert_eq!(items.len(), object.fields.len());
    }
}
