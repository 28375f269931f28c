//! Command-line interface for placement-tracker.
//!
//! This module provides the CLI structure for the `placetrack` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, ListCommand, OutcomeArg, OutputFormat,
    ResetCommand, StageArg, SummaryCommand,
};

/// placetrack - Keep track of your placement applications
///
/// Record where each application stands, list them, and see how the
/// pipeline is going at a glance.
#[derive(Debug, Parser)]
#[command(name = "placetrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the tracker database, overriding the configuration
    #[arg(long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Keep applications in memory only for this run
    #[arg(long, global = true, conflicts_with = "database")]
    pub ephemeral: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new application
    Add(AddCommand),

    /// List applications in the order they were added
    #[command(visible_alias = "ls")]
    List(ListCommand),

    /// Delete an application by ID
    #[command(visible_alias = "rm")]
    Delete(DeleteCommand),

    /// Show application counts
    Summary(SummaryCommand),

    /// Remove all applications; the examples are seeded again next run
    Reset(ResetCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}
