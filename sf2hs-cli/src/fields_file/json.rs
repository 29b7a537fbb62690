//! JSON I/O for fields files: `{ "<object>": [ <field>, ... ], ... }`

use std::fs;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use super::records::FieldsFile;
use super::validate::RawObject;

pub fn write_fields_json(file: &FieldsFile, path: &str) -> Result<()> {
    let content = serde_json::to_string_pretty(file).context("Failed to serialize fields")?;
    fs::write(path, content).with_context(|| format!("Failed to write JSON file: {}", path))?;
    log::info!("Fields written to {}", path);
    Ok(())
}

pub fn read_fields_json(path: &str) -> Result<Vec<RawObject>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read JSON file: {}", path))?;
    parse_fields_json(&content).with_context(|| format!("Invalid fields file: {}", path))
}

pub fn parse_fields_json(content: &str) -> Result<Vec<RawObject>> {
    let value: Value = serde_json::from_str(content).context("Failed to parse JSON")?;

    let Value::Object(objects) = value else {
        bail!("Top level must be an object mapping object names to field lists");
    };

    objects
        .into_iter()
        .map(|(object, fields)| match fields {
            Value::Array(rows) => Ok(RawObject { object, rows }),
            Value::Null => Ok(RawObject {
                object,
                rows: Vec::new(),
            }),
            _ => bail!("Fields of object '{}' must be a list", object),
        })
        .collect()
}
