//! Oryum CLI library
//!
//! Scaffolding for Flask/SQLAlchemy projects: parses compact field and
//! relationship descriptions, renders minijinja templates from them and
//! writes the results into a project without ever overwriting a file.
//!
//! ```rust,no_run
//! use oryum_cli::commands::{CommandContext, MakeCommand};
//! use oryum_cli::i18n::Catalog;
//! use oryum_cli::project::MarkerLocator;
//! use oryum_cli::report::ConsoleReporter;
//!
//! let reporter = ConsoleReporter::new();
//! let ctx = CommandContext {
//!     workdir: std::env::current_dir().unwrap(),
//!     locator: &MarkerLocator,
//!     reporter: &reporter,
//!     translator: &Catalog::default(),
//! };
//! let outcome = MakeCommand::model("Produto")
//!     .with_fields(Some("nome:string,preco:float".to_string()))
//!     .execute(&ctx);
//! assert!(outcome.is_success());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod error;
pub mod i18n;
pub mod observability;
pub mod project;
pub mod report;
pub mod scaffold;
pub mod templates;

pub use commands::Outcome;
pub use error::{FailureKind, ScaffoldError, SpecError};
pub use scaffold::{ArtifactKind, EntityName, FieldType, ScaffoldGenerator, TemplateHelpers};
pub use templates::TemplateRenderer;
