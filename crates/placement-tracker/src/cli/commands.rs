//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::application::{NewApplication, Outcome, Stage};

/// Add command arguments.
///
/// Every field is optional on the command line so that a missing one is
/// reported the same way as a blank one.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Company name
    #[arg(long)]
    pub company: Option<String>,

    /// Role applied for
    #[arg(short, long)]
    pub role: Option<String>,

    /// Current stage
    #[arg(short, long, value_enum)]
    pub stage: Option<StageArg>,

    /// Outcome of the current stage
    #[arg(long = "result", value_enum)]
    pub result: Option<OutcomeArg>,

    /// Date applied (YYYY-MM-DD), defaults to today
    #[arg(short, long, value_name = "DATE")]
    pub date: Option<NaiveDate>,
}

impl AddCommand {
    /// Build the application form, defaulting the date to `today`.
    #[must_use]
    pub fn into_form(self, today: NaiveDate) -> NewApplication {
        NewApplication {
            company_name: self.company.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            stage: self.stage.map(Stage::from),
            result: self.result.map(Outcome::from),
            applied_date: Some(self.date.unwrap_or(today)),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// ID of the application to delete
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Stage argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    /// Applied
    Applied,
    /// Online Assessment (OA)
    #[value(name = "oa", alias = "online-assessment")]
    Oa,
    /// Interview
    Interview,
    /// Offer
    Offer,
    /// Rejected
    Rejected,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Applied => Self::Applied,
            StageArg::Oa => Self::OnlineAssessment,
            StageArg::Interview => Self::Interview,
            StageArg::Offer => Self::Offer,
            StageArg::Rejected => Self::Rejected,
        }
    }
}

/// Result argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutcomeArg {
    /// Pending
    Pending,
    /// Cleared
    Cleared,
    /// Rejected
    Rejected,
}

impl From<OutcomeArg> for Outcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Pending => Self::Pending,
            OutcomeArg::Cleared => Self::Cleared,
            OutcomeArg::Rejected => Self::Rejected,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain tab-separated output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
