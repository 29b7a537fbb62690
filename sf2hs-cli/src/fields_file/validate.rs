//! Structural validation of loaded fields files
//!
//! Runs on the untyped rows so every problem in the file is reported at
//! once instead of stopping at the first deserialization error.

use anyhow::{Result, bail};
use serde_json::Value;

use super::records::{BOOL_COLUMNS, FieldRecord, FieldsFile, ObjectFields, REQUIRED_COLUMNS};

/// Rows of one object as read from disk, before typing
#[derive(Debug, Clone, PartialEq)]
pub struct RawObject {
    pub object: String,
    pub rows: Vec<Value>,
}

/// Every structural problem in `objects`; empty when the data is usable
pub fn validate_field_data(objects: &[RawObject]) -> Vec<String> {
    let mut errors = Vec::new();

    for raw in objects {
        if raw.rows.is_empty() {
            errors.push(format!("No fields found for object '{}'", raw.object));
            continue;
        }

        for (i, row) in raw.rows.iter().enumerate() {
            let position = format!("Object '{}', field {}", raw.object, i + 1);

            let Some(record) = row.as_object() else {
                errors.push(format!("{}: Field entry must be an object", position));
                continue;
            };

            let missing: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|col| record.get(*col).is_none_or(Value::is_null))
                .collect();
            if !missing.is_empty() {
                errors.push(format!(
                    "{}: Missing required fields: {}",
                    position,
                    missing.join(", ")
                ));
            }

            if record.get("name").is_some_and(|name| !name.is_string()) {
                errors.push(format!("{}: Field name must be a string", position));
            }

            for col in BOOL_COLUMNS {
                if record
                    .get(*col)
                    .is_some_and(|value| !value.is_null() && !value.is_boolean())
                {
                    errors.push(format!("{}: {} must be a boolean", position, col));
                }
            }

            let is_picklist = record
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| matches!(t.to_ascii_lowercase().as_str(), "picklist" | "multipicklist" | "combobox"));
            if is_picklist {
                errors.extend(picklist_errors(&position, record.get("picklist_values")));
            }
        }
    }

    errors
}

fn picklist_errors(position: &str, values: Option<&Value>) -> Vec<String> {
    let values = match values {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(values)) => values,
        Some(_) => return vec![format!("{}: picklist_values must be a list", position)],
    };

    values
        .iter()
        .enumerate()
        .filter(|(_, value)| {
            !value
                .as_object()
                .is_some_and(|v| v.get("label").is_some() && v.get("value").is_some())
        })
        .map(|(j, _)| {
            format!(
                "{}, picklist value {}: Must have 'label' and 'value' keys",
                position,
                j + 1
            )
        })
        .collect()
}

/// Validate, then type the rows
pub fn into_fields_file(objects: Vec<RawObject>) -> Result<FieldsFile> {
    let errors = validate_field_data(&objects);
    if !errors.is_empty() {
        bail!(
            "Validation errors found:\n{}",
            errors
                .iter()
                .map(|e| format!("- {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    let mut file = FieldsFile::default();
    for raw in objects {
        let mut fields = Vec::with_capacity(raw.rows.len());
        for (i, row) in raw.rows.into_iter().enumerate() {
            let record: FieldRecord = serde_json::from_value(row).map_err(|e| {
                anyhow::anyhow!("Object '{}', field {}: {}", raw.object, i + 1, e)
            })?;
            fields.push(record);
        }
        file.objects.push(ObjectFields {
            object: raw.object,
            fields,
        });
    }

    Ok(file)
}
