//! Write a fields file as an Excel workbook, one sheet per object

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::fields_file::records::{COLUMNS, FieldRecord, FieldsFile};
use crate::report::formatting::{create_blocked_format, create_header_format};

use super::cols;

pub fn write_fields_excel(file: &FieldsFile, path: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = create_header_format();
    let blocked_format = create_blocked_format();

    for object in &file.objects {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&object.object)
            .with_context(|| format!("Invalid sheet name for object '{}'", object.object))?;

        write_header(sheet, &header_format)?;
        for (i, record) in object.fields.iter().enumerate() {
            let row = (i + 1) as u32;
            let format = (!record.can_migrate).then_some(&blocked_format);
            write_record(sheet, row, record, format)?;
        }

        sheet.set_freeze_panes(1, 0)?;
        sheet.autofit();
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path))?;

    log::info!("Fields written to {}", path);
    Ok(())
}

fn write_header(sheet: &mut Worksheet, format: &Format) -> Result<()> {
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, format)?;
    }
    Ok(())
}

fn write_record(sheet: &mut Worksheet, row: u32, record: &FieldRecord, format: Option<&Format>) -> Result<()> {
    let picklist = match &record.picklist_values {
        Some(values) => serde_json::to_string(values)?,
        None => String::new(),
    };

    write_text(sheet, row, cols::NAME, &record.name, format)?;
    write_text(sheet, row, cols::LABEL, &record.label, format)?;
    write_text(sheet, row, cols::TYPE, &record.field_type, format)?;
    if let Some(length) = record.length {
        sheet.write_number(row, cols::LENGTH, length as f64)?;
    }
    if let Some(precision) = record.precision {
        sheet.write_number(row, cols::PRECISION, precision as f64)?;
    }
    if let Some(scale) = record.scale {
        sheet.write_number(row, cols::SCALE, scale as f64)?;
    }
    sheet.write_boolean(row, cols::REQUIRED, record.required)?;
    sheet.write_boolean(row, cols::UNIQUE, record.unique)?;
    sheet.write_boolean(row, cols::UPDATEABLE, record.updateable)?;
    sheet.write_boolean(row, cols::CREATEABLE, record.createable)?;
    write_text(sheet, row, cols::REFERENCE_TO, &record.reference_to.join(", "), format)?;
    write_text(sheet, row, cols::PICKLIST_VALUES, &picklist, format)?;
    sheet.write_boolean(row, cols::CAN_MIGRATE, record.can_migrate)?;
    write_text(sheet, row, cols::MIGRATION_TYPE, &record.migration_type, format)?;
    write_text(sheet, row, cols::MIGRATION_NOTES, &record.migration_notes.join("\n"), format)?;
    write_text(
        sheet,
        row,
        cols::HUBSPOT_PROPERTY,
        record.hubspot_property.as_deref().unwrap_or(""),
        format,
    )?;
    Ok(())
}

fn write_text(sheet: &mut Worksheet, row: u32, col: u16, text: &str, format: Option<&Format>) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    match format {
        Some(format) => sheet.write_string_with_format(row, col, text, format)?,
        None => sheet.write_string(row, col, text)?,
    };
    Ok(())
}
