//! `load-fields`: read a saved fields file and check its structure

use std::path::PathBuf;

use anyhow::Result;
use colored::*;

use super::Status;
use super::sync::resolve_format;
use crate::cli::display::{print_error, print_fields_file_summary, print_success};
use crate::fields_file::validate::into_fields_file;
use crate::fields_file::{FileFormat, read_raw, validate_field_data};

pub fn handle_load_fields(input: PathBuf, format: Option<FileFormat>, validate_only: bool) -> Result<Status> {
    if !input.exists() {
        anyhow::bail!("Fields file does not exist: {}", input.display());
    }

    let format = resolve_format(&input, format)?;
    let raw = read_raw(&input.to_string_lossy(), format)?;

    let errors = validate_field_data(&raw);
    if !errors.is_empty() {
        print_error(&format!("{} validation error(s) in {}", errors.len(), input.display()));
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Ok(Status::Problems);
    }

    let file = into_fields_file(raw)?;
    if !validate_only {
        print_fields_file_summary(&file);
    }
    print_success(&format!(
        "{} is valid: {} field(s) across {} object(s)",
        input.display().to_string().cyan(),
        file.field_count(),
        file.objects.len()
    ));

    Ok(Status::Clean)
}
