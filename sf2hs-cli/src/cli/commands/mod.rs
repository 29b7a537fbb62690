//! Command handlers

pub mod context;
pub mod list;
pub mod load;
pub mod save;
pub mod sync;
pub mod validate;

use std::process::ExitCode;

use anyhow::Result;

use super::Commands;

/// How a command finished when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Clean,
    /// The command ran to completion but found failed items or checks
    Problems,
}

impl Status {
    pub fn from_problems(has_problems: bool) -> Self {
        if has_problems { Self::Problems } else { Self::Clean }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::SUCCESS,
            Self::Problems => ExitCode::from(1),
        }
    }
}

pub async fn dispatch(command: Commands) -> Result<Status> {
    match command {
        Commands::ListFields {
            common,
            migratable_only,
            plan,
        } => list::handle_list_fields(common, migratable_only, plan).await,
        Commands::SaveFields {
            common,
            output,
            format,
            migratable_only,
            plan,
        } => save::handle_save_fields(common, output, format, migratable_only, plan).await,
        Commands::LoadFields {
            input,
            format,
            validate_only,
        } => load::handle_load_fields(input, format, validate_only),
        Commands::Validate { common } => validate::handle_validate(common).await,
        Commands::Sync {
            common,
            fields_file,
            fields_format,
            dry_run,
            report,
        } => sync::handle_sync(common, fields_file, fields_format, dry_run, report).await,
    }
}

/// Objects a command works on: `--object`, else every configured object
pub(crate) fn target_objects(object: Option<&str>, config: &crate::config::Config) -> Result<Vec<String>> {
    match object {
        Some(object) => Ok(vec![object.to_string()]),
        None if !config.objects.is_empty() => Ok(config.objects.iter().map(|o| o.name.clone()).collect()),
        None => anyhow::bail!("Please specify a Salesforce object using --object or configure objects in --config"),
    }
}
