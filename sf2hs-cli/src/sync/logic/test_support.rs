//! In-memory schema fakes shared by the sync tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::metadata::{
    FieldDescriptor, HubSpotType, Migratability, NewProperty, PropertyDescriptor, PropertyUpdate,
    SalesforceType,
};
use crate::api::schema::{SourceSchema, TargetSchema};

pub fn field(name: &str, field_type: SalesforceType) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        label: name.replace("__c", "").replace('_', " "),
        field_type,
        migration: Migratability::Direct,
        required: false,
        unique: false,
        updateable: true,
        createable: true,
        length: None,
        precision: None,
        scale: None,
        reference_to: Vec::new(),
        picklist_values: Vec::new(),
    }
}

pub fn property(name: &str, property_type: HubSpotType) -> PropertyDescriptor {
    let field_type = property_type.default_field_type(None).to_string();
    PropertyDescriptor {
        name: name.to_string(),
        label: name.to_string(),
        property_type,
        field_type,
        read_only: false,
        group_name: None,
        description: None,
    }
}

#[derive(Default)]
pub struct FakeSource {
    objects: HashMap<String, Vec<FieldDescriptor>>,
    broken: HashMap<String, String>,
}

impl FakeSource {
    pub fn with_object(mut self, name: &str, fields: Vec<FieldDescriptor>) -> Self {
        self.objects.insert(name.to_string(), fields);
        self
    }

    /// Describe calls for `name` fail with a server error
    pub fn with_broken_object(mut self, name: &str, message: &str) -> Self {
        self.broken.insert(name.to_string(), message.to_string());
        self
    }
}

#[async_trait]
impl SourceSchema for FakeSource {
    async fn describe_object(&self, object_name: &str) -> Result<Vec<FieldDescriptor>, ApiError> {
        if let Some(message) = self.broken.get(object_name) {
            return Err(ApiError::from_status(500, message, None));
        }
        self.objects
            .get(object_name)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, "NOT_FOUND: The requested resource does not exist", None))
    }
}

/// Mutable HubSpot stand-in: applies creates and updates to its own schema
#[derive(Default)]
pub struct FakeTarget {
    properties: Mutex<HashMap<String, Vec<PropertyDescriptor>>>,
    scripted_errors: Mutex<HashMap<String, VecDeque<ApiError>>>,
    calls: Mutex<Vec<String>>,
    updates: Mutex<Vec<(String, PropertyUpdate)>>,
    unreachable: bool,
}

impl FakeTarget {
    pub fn with_properties(self, object_type: &str, properties: Vec<PropertyDescriptor>) -> Self {
        self.properties
            .lock()
            .unwrap()
            .insert(object_type.to_string(), properties);
        self
    }

    /// Calls touching `property` fail with these errors, in order, before succeeding
    pub fn failing(self, property: &str, errors: Vec<ApiError>) -> Self {
        self.scripted_errors
            .lock()
            .unwrap()
            .insert(property.to_string(), errors.into());
        self
    }

    /// Every list call fails as if the API were down
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Update payloads received, keyed by property name
    pub fn updates(&self) -> Vec<(String, PropertyUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn snapshot(&self, object_type: &str) -> Vec<PropertyDescriptor> {
        self.properties
            .lock()
            .unwrap()
            .get(object_type)
            .cloned()
            .unwrap_or_default()
    }

    fn next_error(&self, property: &str) -> Option<ApiError> {
        self.scripted_errors
            .lock()
            .unwrap()
            .get_mut(property)
            .and_then(|queue| queue.pop_front())
    }
}

#[async_trait]
impl TargetSchema for FakeTarget {
    async fn list_properties(&self, object_type: &str) -> Result<Vec<PropertyDescriptor>, ApiError> {
        self.calls.lock().unwrap().push(format!("list {}", object_type));
        if self.unreachable {
            return Err(ApiError::transient("connection refused"));
        }
        Ok(self.snapshot(object_type))
    }

    async fn create_property(&self, object_type: &str, new: &NewProperty) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create {}.{}", object_type, new.name));
        if let Some(err) = self.next_error(&new.name) {
            return Err(err);
        }

        self.properties
            .lock()
            .unwrap()
            .entry(object_type.to_string())
            .or_default()
            .push(PropertyDescriptor {
                name: new.name.clone(),
                label: new.label.clone(),
                property_type: new.property_type.clone(),
                field_type: new.field_type.clone(),
                read_only: false,
                group_name: Some(new.group_name.clone()),
                description: Some(new.description.clone()),
            });
        Ok(())
    }

    async fn update_property(
        &self,
        object_type: &str,
        name: &str,
        update: &PropertyUpdate,
    ) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("update {}.{}", object_type, name));
        if let Some(err) = self.next_error(name) {
            return Err(err);
        }

        self.updates
            .lock()
            .unwrap()
            .push((name.to_string(), update.clone()));

        let mut properties = self.properties.lock().unwrap();
        let existing = properties
            .get_mut(object_type)
            .and_then(|list| list.iter_mut().find(|p| p.name == name))
            .ok_or_else(|| ApiError::from_status(404, "property not found", None))?;
        existing.property_type = update.property_type.clone();
        existing.field_type = update.field_type.clone();
        Ok(())
    }
}
