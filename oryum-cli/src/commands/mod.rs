//! CLI command implementations
//!
//! Commands never print or exit on their own. They report through the
//! [`CommandContext`] and return an [`Outcome`], which `main` turns into an
//! exit code.

use std::path::PathBuf;

use crate::error::{FailureKind, ScaffoldError};
use crate::i18n::Translator;
use crate::project::ProjectLocator;
use crate::report::Reporter;

pub mod make;
pub mod new;

pub use make::MakeCommand;
pub use new::NewCommand;

/// Result of running one command
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command wrote `path`
    Success {
        /// Primary file or directory created
        path: PathBuf,
    },
    /// The command failed and reported why
    Failure {
        /// Failure category
        kind: FailureKind,
        /// User-facing detail
        message: String,
    },
}

impl Outcome {
    /// Whether the command succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Process exit status: `0` on success, `1` on any failure
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Success { .. } => 0,
            Self::Failure { .. } => 1,
        }
    }
}

/// Collaborators injected into every command
pub struct CommandContext<'a> {
    /// Directory the command runs from
    pub workdir: PathBuf,
    /// Project root detection
    pub locator: &'a dyn ProjectLocator,
    /// Message sink
    pub reporter: &'a dyn Reporter,
    /// User-facing text lookup
    pub translator: &'a dyn Translator,
}

impl CommandContext<'_> {
    /// Report `err` and convert it into an [`Outcome::Failure`]
    pub fn fail(&self, err: &ScaffoldError) -> Outcome {
        let kind = err.kind();
        let message = err.to_string();
        tracing::debug!(kind = ?kind, error = %message, "command failed");

        self.reporter.failure(
            self.translator.lookup(kind.label()),
            self.translator.lookup(&message),
        );
        Outcome::Failure { kind, message }
    }
}
