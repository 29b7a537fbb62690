//! Serve saved field metadata in place of a live Salesforce describe

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::metadata::FieldDescriptor;
use crate::api::schema::SourceSchema;

use super::records::FieldsFile;

#[derive(Debug, Clone)]
pub struct FieldsFileSource {
    file: FieldsFile,
}

impl FieldsFileSource {
    pub fn new(file: FieldsFile) -> Self {
        Self { file }
    }
}

#[async_trait]
impl SourceSchema for FieldsFileSource {
    async fn describe_object(&self, object_name: &str) -> Result<Vec<FieldDescriptor>, ApiError> {
        match self.file.find(object_name) {
            Some(object) => Ok(object.fields.iter().map(|r| r.to_descriptor()).collect()),
            None => Err(ApiError::Permanent {
                status: Some(404),
                message: format!("object '{}' is not in the fields file", object_name),
            }),
        }
    }
}
