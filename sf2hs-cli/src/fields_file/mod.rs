//! Saved Salesforce field metadata
//!
//! `save-fields` writes describe results to Excel, JSON or CSV;
//! `load-fields` and `sync --fields-file` read Excel or JSON back.

pub mod csv_writer;
pub mod excel;
pub mod json;
pub mod records;
pub mod source;
pub mod validate;

use std::path::Path;

use anyhow::{Result, bail};
use clap::ValueEnum;

pub use records::{FieldRecord, FieldsFile, ObjectFields};
pub use source::FieldsFileSource;
pub use validate::{RawObject, validate_field_data};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    Excel,
    Json,
    Csv,
}

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Guess from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xls" => Some(Self::Excel),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

pub fn save_fields(file: &FieldsFile, format: FileFormat, path: &str) -> Result<()> {
    match format {
        FileFormat::Excel => excel::write_fields_excel(file, path),
        FileFormat::Json => json::write_fields_json(file, path),
        FileFormat::Csv => csv_writer::write_fields_csv(file, path),
    }
}

/// Untyped rows, for validation
pub fn read_raw(path: &str, format: FileFormat) -> Result<Vec<RawObject>> {
    match format {
        FileFormat::Excel => excel::read_fields_excel(path),
        FileFormat::Json => json::read_fields_json(path),
        FileFormat::Csv => bail!("Loading fields from CSV is not supported; use excel or json"),
    }
}

/// Read, validate and type a fields file
pub fn load_fields(path: &str, format: FileFormat) -> Result<FieldsFile> {
    validate::into_fields_file(read_raw(path, format)?)
}
