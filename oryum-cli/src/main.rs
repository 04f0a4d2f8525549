//! Oryum CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use oryum_cli::commands::{CommandContext, MakeCommand, NewCommand};
use oryum_cli::i18n::{Catalog, Locale};
use oryum_cli::observability;
use oryum_cli::project::MarkerLocator;
use oryum_cli::report::ConsoleReporter;

#[derive(Parser)]
#[command(name = "oryum")]
#[command(version)]
#[command(about = "Scaffolding for Flask/SQLAlchemy projects", long_about = None)]
struct Cli {
    /// Interface language
    #[arg(long, global = true, value_enum, default_value_t = Locale::En)]
    lang: Locale,

    /// Increase log verbosity (-v info, -vv debug); `RUST_LOG` overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Oryum project
    New {
        /// Project directory; its last component is the project name
        path: PathBuf,
    },
    /// Generate a SQLAlchemy model
    #[command(name = "make-model", alias = "make:model")]
    MakeModel {
        /// Model name (e.g. `Produto`)
        name: String,
        /// Field definitions (e.g. `nome:string,preco:float:nullable`)
        #[arg(short, long)]
        fields: Option<String>,
        /// Relationship definitions (e.g. `categorias:Categoria:many`)
        #[arg(short, long)]
        relationships: Option<String>,
        /// Add `created_at`/`updated_at` columns
        #[arg(long, overrides_with = "no_timestamps")]
        timestamps: bool,
        /// Omit `created_at`/`updated_at` columns
        #[arg(long, overrides_with = "timestamps")]
        no_timestamps: bool,
    },
    /// Generate a Flask controller
    #[command(name = "make-controller", alias = "make:controller")]
    MakeController {
        /// Model name the controller manages
        name: String,
        /// Field definitions handled by the forms
        #[arg(short, long)]
        fields: Option<String>,
    },
}

const fn timestamps_flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    let workdir = std::env::current_dir().context("Failed to read the current directory")?;
    let reporter = ConsoleReporter::new();
    let catalog = Catalog::new(cli.lang);
    let ctx = CommandContext {
        workdir,
        locator: &MarkerLocator,
        reporter: &reporter,
        translator: &catalog,
    };

    let outcome = match cli.command {
        Commands::New { path } => NewCommand::new(path).execute(&ctx),
        Commands::MakeModel {
            name,
            fields,
            relationships,
            timestamps,
            no_timestamps,
        } => MakeCommand::model(name)
            .with_fields(fields)
            .with_relationships(relationships)
            .with_timestamps(timestamps_flag(timestamps, no_timestamps))
            .execute(&ctx),
        Commands::MakeController { name, fields } => {
            MakeCommand::controller(name).with_fields(fields).execute(&ctx)
        }
    };

    Ok(ExitCode::from(outcome.exit_code()))
}
