//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Revenda API - Vehicle classifieds advertisement engine
#[derive(Parser, Debug)]
#[command(name = "revenda-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Bulk-import advertisements from a semicolon-separated file
    Import(ImportArgs),

    /// Print one of the aggregate reports
    Report(ReportArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the import command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Path of the import file
    pub file: PathBuf,

    /// Code of the user owning the imported advertisements
    #[arg(short, long)]
    pub user: i64,
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub kind: ReportKind,
}

/// Available reports
#[derive(Subcommand, Debug)]
pub enum ReportKind {
    /// Views-per-contact ratio (all users when --user is omitted)
    Views {
        #[arg(short, long)]
        user: Option<i64>,
    },
    /// Advertisement count per status
    Status,
    /// Sold percentage for one user
    Sold {
        #[arg(short, long)]
        user: i64,
    },
    /// Most frequent sold attributes (all users when --user is omitted)
    Categories {
        #[arg(short, long)]
        user: Option<i64>,
    },
    /// Average time in listing for one user
    Time {
        #[arg(short, long)]
        user: i64,
    },
}
