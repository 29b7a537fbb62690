//! Command-line interface definitions

pub mod commands;
pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::fields_file::FileFormat;

#[derive(Debug, Parser)]
#[command(
    name = "sf2hs",
    version,
    about = "Map Salesforce object fields onto HubSpot properties and keep them in sync"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the fields of a Salesforce object with their migration status
    ListFields {
        #[command(flatten)]
        common: CommonArgs,

        /// Hide fields that cannot be migrated
        #[arg(long)]
        migratable_only: bool,

        /// Print the resolved plan for the configured objects instead
        #[arg(long)]
        plan: bool,
    },

    /// Save Salesforce field metadata (or the resolved plan) to a file
    SaveFields {
        #[command(flatten)]
        common: CommonArgs,

        /// Output file (defaults to <object>_fields.<ext>)
        #[arg(long = "output", short = 'O')]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "excel")]
        format: FileFormat,

        /// Only save fields that can be migrated
        #[arg(long)]
        migratable_only: bool,

        /// Save the resolved plan instead of the field metadata
        #[arg(long)]
        plan: bool,
    },

    /// Load a saved fields file and check its structure
    LoadFields {
        /// Fields file to load
        input: PathBuf,

        /// File format (guessed from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FileFormat>,

        /// Only report errors, do not print the loaded fields
        #[arg(long)]
        validate_only: bool,
    },

    /// Check configuration, credentials and connectivity without changing anything
    Validate {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Create or update HubSpot properties for the configured field mappings
    Sync {
        #[command(flatten)]
        common: CommonArgs,

        /// Resolve against a saved fields file instead of a live describe
        #[arg(long)]
        fields_file: Option<PathBuf>,

        /// Format of the fields file (guessed from the extension when omitted)
        #[arg(long, value_enum)]
        fields_format: Option<FileFormat>,

        /// Resolve and print the plan without changing HubSpot
        #[arg(long)]
        dry_run: bool,

        /// Write the plan and results to an Excel report
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

/// Options shared by the commands that talk to Salesforce or HubSpot
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File with SF_USERNAME, SF_PASSWORD, SF_SECURITY_TOKEN and HUBSPOT_ACCESS_TOKEN
    #[arg(short, long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Restrict to one Salesforce object
    #[arg(short, long)]
    pub object: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sync() {
        let cli = Cli::try_parse_from([
            "sf2hs",
            "--no-color",
            "sync",
            "-c",
            "config.yaml",
            "-o",
            "Account",
            "--dry-run",
            "--report",
            "out.xlsx",
        ])
        .unwrap();

        assert!(cli.no_color);
        match cli.command {
            Commands::Sync {
                common,
                dry_run,
                report,
                fields_file,
                ..
            } => {
                assert_eq!(common.config, Some(PathBuf::from("config.yaml")));
                assert_eq!(common.env_file, PathBuf::from(".env"));
                assert_eq!(common.object.as_deref(), Some("Account"));
                assert!(dry_run);
                assert_eq!(report, Some(PathBuf::from("out.xlsx")));
                assert!(fields_file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_save_fields_format() {
        let cli = Cli::try_parse_from(["sf2hs", "save-fields", "-o", "Contact", "-f", "json"]).unwrap();

        match cli.command {
            Commands::SaveFields { format, output, .. } => {
                assert_eq!(format, FileFormat::Json);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
