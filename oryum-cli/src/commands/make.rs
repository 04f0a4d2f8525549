//! `make-model` / `make-controller`

use std::fmt;

use crate::error::ScaffoldError;
use crate::project::Project;
use crate::scaffold::{
    materialize, parse_fields, parse_relationships, ArtifactKind, EntityName, GeneratedArtifact,
    GenerationRequest, Materialized, ScaffoldGenerator,
};

use super::{CommandContext, Outcome};

/// Generate a model or controller inside the current project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeCommand {
    kind: ArtifactKind,
    name: String,
    fields: Option<String>,
    relationships: Option<String>,
    timestamps: Option<bool>,
}

/// Orchestrator states, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    ValidatingContext,
    Parsing,
    Rendering,
    Writing,
    Reporting,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

struct Generated {
    artifact: GeneratedArtifact,
    written: Materialized,
}

impl MakeCommand {
    /// `make-model <name>`
    #[must_use]
    pub fn model(name: impl Into<String>) -> Self {
        Self::new(ArtifactKind::Model, name)
    }

    /// `make-controller <name>`
    #[must_use]
    pub fn controller(name: impl Into<String>) -> Self {
        Self::new(ArtifactKind::Controller, name)
    }

    fn new(kind: ArtifactKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            fields: None,
            relationships: None,
            timestamps: None,
        }
    }

    /// Field spec, e.g. `nome:string,preco:float`
    #[must_use]
    pub fn with_fields(mut self, spec: Option<String>) -> Self {
        self.fields = spec;
        self
    }

    /// Relationship spec, e.g. `categorias:Categoria:many`
    #[must_use]
    pub fn with_relationships(mut self, spec: Option<String>) -> Self {
        self.relationships = spec;
        self
    }

    /// Force timestamps on or off; `None` uses the project setting
    #[must_use]
    pub const fn with_timestamps(mut self, timestamps: Option<bool>) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Run the command and report its result once
    pub fn execute(&self, ctx: &CommandContext<'_>) -> Outcome {
        let mut state = State::Idle;
        let kind = ctx.translator.lookup(self.kind.label());
        ctx.reporter.progress(&ctx.translator.text(
            "Generating {kind} {name}...",
            &[("kind", kind), ("name", self.name.trim())],
        ));

        let result = self.run(ctx, &mut state);
        let failed_in = state;
        advance(&mut state, State::Reporting);

        match result {
            Ok(Generated { artifact, written }) => {
                let path = artifact.path.display().to_string();
                let aggregator = artifact.aggregator.display().to_string();
                let registration = if written.registered {
                    "Registered in {aggregator}"
                } else {
                    "Already registered in {aggregator}"
                };

                ctx.reporter.success(
                    &ctx.translator.text(
                        "Created {kind} {name} in {path}",
                        &[("kind", kind), ("name", &self.display_name()), ("path", &path)],
                    ),
                    &[ctx.translator.text(registration, &[("aggregator", &aggregator)])],
                );
                Outcome::Success { path: written.path }
            }
            Err(err) => {
                tracing::debug!(state = %failed_in, "aborted");
                ctx.fail(&err)
            }
        }
    }

    fn run(&self, ctx: &CommandContext<'_>, state: &mut State) -> Result<Generated, ScaffoldError> {
        advance(state, State::ValidatingContext);
        let project = Project::discover(ctx.locator, &ctx.workdir)?;

        advance(state, State::Parsing);
        let entity = EntityName::parse(&self.name)?;
        let fields = parse_fields(self.fields.as_deref())?;
        let relationships = parse_relationships(self.relationships.as_deref())?;
        let timestamps = self
            .timestamps
            .unwrap_or(project.settings().generator.timestamps);
        let request = GenerationRequest::new(entity, fields, relationships, timestamps);

        advance(state, State::Rendering);
        let artifact = ScaffoldGenerator::new(project.renderer()).generate(self.kind, &request)?;

        advance(state, State::Writing);
        let written = materialize(project.root(), &artifact)?;

        Ok(Generated { artifact, written })
    }

    /// Class name for messages, falling back to the raw input
    fn display_name(&self) -> String {
        EntityName::parse(&self.name).map_or_else(
            |_| self.name.trim().to_string(),
            |entity| self.kind.class_name(&entity),
        )
    }

    /// Target file kind
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }
}

fn advance(state: &mut State, next: State) {
    tracing::debug!(from = %state, to = %next, "state transition");
    *state = next;
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::FailureKind;
    use crate::i18n::{Catalog, Locale};
    use crate::project::{MarkerLocator, MARKER_FILE};
    use crate::report::{Event, MemoryReporter};
    use tempfile::tempdir;

    fn run(workdir: &std::path::Path, cmd: &MakeCommand, reporter: &MemoryReporter) -> Outcome {
        let catalog = Catalog::new(Locale::En);
        let ctx = CommandContext {
            workdir: workdir.to_path_buf(),
            locator: &MarkerLocator,
            reporter,
            translator: &catalog,
        };
        cmd.execute(&ctx)
    }

    #[test]
    fn test_reports_success_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MARKER_FILE), "{}").unwrap();
        let reporter = MemoryReporter::new();

        let cmd = MakeCommand::model("produto").with_fields(Some("nome:string".to_string()));
        let outcome = run(dir.path(), &cmd, &reporter);

        assert_eq!(
            outcome,
            Outcome::Success {
                path: dir.path().join("models").join("produto.py")
            }
        );
        assert_eq!(
            reporter.results(),
            vec![Event::Success {
                message: format!("Created model Produto in {}", std::path::Path::new("models").join("produto.py").display()),
                details: vec![format!(
                    "Registered in {}",
                    std::path::Path::new("models").join("__init__.py").display()
                )],
            }]
        );
    }

    #[test]
    fn test_parse_error_writes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MARKER_FILE), "{}").unwrap();
        let reporter = MemoryReporter::new();

        let cmd = MakeCommand::model("Produto").with_fields(Some("nome:strng".to_string()));
        let outcome = run(dir.path(), &cmd, &reporter);

        assert!(matches!(outcome, Outcome::Failure { kind: FailureKind::Parse, .. }));
        assert!(!dir.path().join("models").exists());
        match reporter.results().as_slice() {
            [Event::Failure { label, detail }] => {
                assert_eq!(label, "Invalid input");
                assert!(detail.contains("strng"));
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn test_outside_project() {
        let dir = tempdir().unwrap();
        let reporter = MemoryReporter::new();

        let outcome = run(dir.path(), &MakeCommand::model("Produto"), &reporter);

        assert!(matches!(outcome, Outcome::Failure { kind: FailureKind::NotAProject, .. }));
        assert_eq!(outcome.exit_code(), 1);
        assert!(!dir.path().join("models").exists());
    }

    #[test]
    fn test_timestamps_follow_project_setting() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MARKER_FILE),
            r#"{ "generator": { "timestamps": false } }"#,
        )
        .unwrap();
        let reporter = MemoryReporter::new();

        assert!(run(dir.path(), &MakeCommand::model("Tag"), &reporter).is_success());
        let content = fs::read_to_string(dir.path().join("models/tag.py")).unwrap();
        assert!(!content.contains("created_at"));

        let cmd = MakeCommand::model("Nota").with_timestamps(Some(true));
        assert!(run(dir.path(), &cmd, &reporter).is_success());
        let content = fs::read_to_string(dir.path().join("models/nota.py")).unwrap();
        assert!(content.contains("created_at"));
    }

    #[test]
    fn test_controller() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MARKER_FILE), "{}").unwrap();
        let reporter = MemoryReporter::new();

        let cmd = MakeCommand::controller("produto");
        assert_eq!(cmd.kind(), ArtifactKind::Controller);
        assert!(run(dir.path(), &cmd, &reporter).is_success());
        assert_eq!(
            fs::read_to_string(dir.path().join("controllers/__init__.py")).unwrap(),
            "from .produto_controller import ProdutoController\n"
        );
    }
}
