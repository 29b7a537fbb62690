//! CSV export of fields: one row per field, prefixed with the object name

use anyhow::{Context, Result};
use csv::Writer;

use super::records::{COLUMNS, FieldsFile};

pub fn write_fields_csv(file: &FieldsFile, path: &str) -> Result<()> {
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path))?;

    let mut header = vec!["object"];
    header.extend_from_slice(COLUMNS);
    wtr.write_record(&header).context("Failed to write CSV header")?;

    for object in &file.objects {
        for record in &object.fields {
            let picklist = match &record.picklist_values {
                Some(values) => serde_json::to_string(values)?,
                None => String::new(),
            };
            let row = [
                object.object.clone(),
                record.name.clone(),
                record.label.clone(),
                record.field_type.clone(),
                record.length.map(|l| l.to_string()).unwrap_or_default(),
                record.precision.map(|p| p.to_string()).unwrap_or_default(),
                record.scale.map(|s| s.to_string()).unwrap_or_default(),
                record.required.to_string(),
                record.unique.to_string(),
                record.updateable.to_string(),
                record.createable.to_string(),
                record.reference_to.join(", "),
                picklist,
                record.can_migrate.to_string(),
                record.migration_type.clone(),
                record.migration_notes.join("\n"),
                record.hubspot_property.clone().unwrap_or_default(),
            ];
            wtr.write_record(&row)
                .with_context(|| format!("Failed to write field: {}.{}", object.object, record.name))?;
        }
    }

    wtr.flush().context("Failed to flush CSV writer")?;

    log::info!("CSV file exported to: {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::metadata::{BlockReason, FieldDescriptor, Migratability, SalesforceType};
    use crate::fields_file::records::ObjectFields;

    #[test]
    fn test_csv_has_object_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.csv");
        let path = path.to_str().unwrap();

        let formula = FieldDescriptor {
            name: "Score__c".to_string(),
            label: "Score".to_string(),
            field_type: SalesforceType::Double,
            migration: Migratability::Blocked(BlockReason::FormulaField),
            required: false,
            unique: false,
            updateable: false,
            createable: false,
            length: None,
            precision: Some(5),
            scale: Some(2),
            reference_to: Vec::new(),
            picklist_values: Vec::new(),
        };
        let file = FieldsFile {
            objects: vec![ObjectFields::from_descriptors("Account", &[formula])],
        };

        write_fields_csv(&file, path).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "object");
        assert_eq!(headers.len(), COLUMNS.len() + 1);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Account");
        assert_eq!(&rows[0][1], "Score__c");
        assert_eq!(&rows[0][5], "5");
        assert_eq!(&rows[0][6], "2");
        assert_eq!(&rows[0][13], "false");
        assert_eq!(&rows[0][14], "formula_field");
    }
}
