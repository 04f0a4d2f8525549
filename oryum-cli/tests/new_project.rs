//! Integration tests for `oryum new`

use std::fs;

use oryum_cli::commands::{CommandContext, MakeCommand, NewCommand, Outcome};
use oryum_cli::i18n::Catalog;
use oryum_cli::project::{MarkerLocator, Project, MARKER_FILE};
use oryum_cli::report::MemoryReporter;
use oryum_cli::FailureKind;
use tempfile::TempDir;

fn context<'a>(workdir: &std::path::Path, reporter: &'a MemoryReporter, catalog: &'a Catalog) -> CommandContext<'a> {
    CommandContext {
        workdir: workdir.to_path_buf(),
        locator: &MarkerLocator,
        reporter,
        translator: catalog,
    }
}

#[test]
fn test_new_then_make_model() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = MemoryReporter::new();
    let catalog = Catalog::default();

    let outcome = NewCommand::new("loja").execute(&context(temp_dir.path(), &reporter, &catalog));
    let root = temp_dir.path().join("loja");
    assert_eq!(outcome, Outcome::Success { path: root.clone() });

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join(MARKER_FILE)).unwrap()).unwrap();
    assert_eq!(manifest["name"], "loja");
    assert_eq!(manifest["generator"]["timestamps"], true);

    let outcome = MakeCommand::model("Produto")
        .with_fields(Some("nome:string,preco:decimal:default=0".to_string()))
        .execute(&context(&root, &reporter, &catalog));
    assert!(outcome.is_success());

    assert_eq!(
        fs::read_to_string(root.join("models/__init__.py")).unwrap(),
        "from .base import Base, db\nfrom .produto import Produto\n"
    );
    let model = fs::read_to_string(root.join("models/produto.py")).unwrap();
    assert!(model.contains("from .base import Base\n"));
    assert!(model.contains("preco = Column(Numeric(10, 2), nullable=False, default=0)"));
}

#[test]
fn test_new_with_nested_path() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = MemoryReporter::new();
    let catalog = Catalog::default();

    let outcome = NewCommand::new("apps/painel_admin")
        .execute(&context(temp_dir.path(), &reporter, &catalog));
    assert!(outcome.is_success());

    let root = temp_dir.path().join("apps/painel_admin");
    let project = Project::load(&root).unwrap();
    assert_eq!(project.settings().name, "painel_admin");
    assert!(fs::read_to_string(root.join("templates/index.html"))
        .unwrap()
        .contains("<title>painel_admin</title>"));
}

#[test]
fn test_new_refuses_existing_project() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = MemoryReporter::new();
    let catalog = Catalog::default();
    let ctx = context(temp_dir.path(), &reporter, &catalog);

    assert!(NewCommand::new("loja").execute(&ctx).is_success());
    let app_before = fs::read(temp_dir.path().join("loja/app.py")).unwrap();

    let outcome = NewCommand::new("loja").execute(&ctx);
    assert!(matches!(
        outcome,
        Outcome::Failure { kind: FailureKind::AlreadyExists, .. }
    ));
    assert_eq!(fs::read(temp_dir.path().join("loja/app.py")).unwrap(), app_before);
}
