//! Read a fields workbook back into untyped rows

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use serde_json::{Map, Value};

use crate::fields_file::records::BOOL_COLUMNS;
use crate::fields_file::validate::RawObject;

/// Read every sheet of the workbook; the sheet name is the object name
pub fn read_fields_excel(path: &str) -> Result<Vec<RawObject>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("Failed to open Excel file: {}", path))?;

    let mut objects = Vec::new();
    for (sheet_name, range) in workbook.worksheets() {
        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(|c| get_cell_string(Some(c))).collect(),
            None => Vec::new(),
        };

        let records: Vec<Value> = rows
            .filter(|row| row.iter().any(|c| !get_cell_string(Some(c)).trim().is_empty()))
            .map(|row| Value::Object(row_to_record(&headers, row)))
            .collect();

        log::debug!("Read {} field(s) from sheet '{}'", records.len(), sheet_name);
        objects.push(RawObject {
            object: sheet_name,
            rows: records,
        });
    }

    Ok(objects)
}

fn row_to_record(headers: &[String], row: &[Data]) -> Map<String, Value> {
    let mut record = Map::new();

    for (col, header) in headers.iter().enumerate() {
        let header = header.trim();
        if header.is_empty() {
            continue;
        }
        if let Some(value) = cell_value(header, row.get(col)) {
            record.insert(header.to_string(), value);
        }
    }

    record
}

/// Column-aware conversion; `None` leaves the key out of the record
fn cell_value(column: &str, cell: Option<&Data>) -> Option<Value> {
    let text = get_cell_string(cell);
    let text = text.trim();

    if BOOL_COLUMNS.contains(&column) {
        return match cell {
            Some(Data::Bool(b)) => Some(Value::Bool(*b)),
            _ if text.is_empty() => None,
            _ => match text.to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => Some(Value::String(text.to_string())),
            },
        };
    }

    match column {
        "length" | "precision" | "scale" => get_cell_int(cell).map(Value::from),
        "picklist_values" if text.is_empty() => None,
        "picklist_values" => {
            Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
        }
        "migration_notes" => Some(Value::Array(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| Value::String(l.to_string()))
                .collect(),
        )),
        "reference_to" => Some(Value::Array(
            text.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        )),
        "hubspot_property" if text.is_empty() => None,
        _ => Some(Value::String(text.to_string())),
    }
}

fn get_cell_string(cell: Option<&Data>) -> String {
    cell.map(|c| match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    })
    .unwrap_or_default()
}

fn get_cell_int(cell: Option<&Data>) -> Option<i64> {
    cell.and_then(|c| match c {
        Data::Int(i) => Some(*i),
        Data::Float(f) => Some(*f as i64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
