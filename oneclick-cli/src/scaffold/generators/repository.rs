//! Repository layer: shared base plus entity interface and implementation

use serde::Serialize;
use serde_json::json;

use super::provider::Binding;
use super::{ensure_absent, return_type_imports, write_shared, Generator};
use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::naming::EntityNames;
use crate::scaffold::report::{Step, StepReport};
use crate::scaffold::run::GenerationRun;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::repository::{
    BASE_IMPL_NAME, BASE_INTERFACE_NAME, IMPL_NAME, INTERFACE_NAME,
};

#[derive(Serialize)]
struct MethodContext {
    signature: String,
    body: &'static str,
}

#[derive(Serialize)]
struct RepositoryContext<'a> {
    entity: &'a EntityNames,
    imports: Vec<&'static str>,
    methods: Vec<MethodContext>,
}

/// Writes `BaseRepository`, `{Entity}Repository` and `{Entity}RepositoryImpl`
pub struct RepositoryGenerator;

impl Generator for RepositoryGenerator {
    fn step(&self) -> Step {
        Step::Repository
    }

    fn generate(
        &self,
        workspace: &Workspace,
        run: &GenerationRun,
        _prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<()> {
        let layout = workspace.layout();
        let interfaces = layout.repository_interfaces();
        let implementations = layout.repository_implementations();
        workspace.ensure_dir(&interfaces, report)?;
        workspace.ensure_dir(&implementations, report)?;

        write_shared(
            workspace,
            &[
                GeneratedFile::new(
                    interfaces.join("BaseRepository.php"),
                    workspace.render(BASE_INTERFACE_NAME, json!({}))?,
                    "shared repository contract",
                ),
                GeneratedFile::new(
                    implementations.join("BaseRepositoryImpl.php"),
                    workspace.render(BASE_IMPL_NAME, json!({}))?,
                    "shared repository implementation",
                ),
            ],
            report,
        )?;

        let entity = run.entity();
        let context = RepositoryContext {
            entity,
            imports: return_type_imports(run.methods().iter()),
            methods: run
                .methods()
                .iter()
                .map(|method| MethodContext {
                    signature: method.signature(),
                    body: method.return_type.repository_stub(),
                })
                .collect(),
        };

        let interface = GeneratedFile::new(
            interfaces.join(format!("{}Repository.php", entity.class)),
            workspace.render(INTERFACE_NAME, &context)?,
            format!("{} repository contract", entity.class),
        );
        let implementation = GeneratedFile::new(
            implementations.join(format!("{}RepositoryImpl.php", entity.class)),
            workspace.render(IMPL_NAME, &context)?,
            format!("{} repository", entity.class),
        );
        ensure_absent(workspace, &[&interface.path, &implementation.path])?;
        workspace.create(&interface, report)?;
        workspace.create(&implementation, report)?;

        Binding::repository(&entity.class).register(workspace, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaffoldConfig;
    use crate::error::ScaffoldError;
    use crate::prompt::ScriptedPrompter;
    use crate::scaffold::attribute::AttributeSet;
    use crate::scaffold::fsutil;
    use crate::scaffold::method::{CustomMethod, ReturnType};
    use tempfile::tempdir;

    fn run(methods: Vec<CustomMethod>) -> GenerationRun {
        GenerationRun::new(EntityNames::new("Post").unwrap(), AttributeSet::new(), methods)
    }

    #[test]
    fn test_generates_layer_with_custom_methods() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut report = StepReport::new(Step::Repository);
        let run = run(vec![
            CustomMethod::new("findByEmail", ReturnType::Model, "string $email", true),
            CustomMethod::new("countDrafts", ReturnType::Int, "", false),
        ]);

        RepositoryGenerator
            .generate(&workspace, &run, &mut ScriptedPrompter::new(), &mut report)
            .unwrap();

        let layout = workspace.layout();
        let interface =
            fsutil::read(&layout.repository_interfaces().join("PostRepository.php")).unwrap();
        assert!(interface.contains("use Illuminate\\Database\\Eloquent\\Model;"));
        assert!(interface.contains("interface PostRepository extends BaseRepository\n{\n    public function findByEmail(string $email): ?Model;\n\n    public function countDrafts(): int;\n}\n"));

        let implementation = fsutil::read(
            &layout
                .repository_implementations()
                .join("PostRepositoryImpl.php"),
        )
        .unwrap();
        assert!(implementation
            .contains("class PostRepositoryImpl extends BaseRepositoryImpl implements PostRepository"));
        assert!(implementation.contains(
            "    public function findByEmail(string $email): ?Model\n    {\n        return $this->model->first();\n    }\n"
        ));
        assert!(implementation.contains("        return 0;\n"));

        let base = fsutil::read(&layout.repository_interfaces().join("BaseRepository.php")).unwrap();
        assert!(base.contains("public function findWhere(array $criteria);"));
        assert!(layout.provider("RepositoryServiceProvider").exists());
    }

    #[test]
    fn test_no_custom_methods() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut report = StepReport::new(Step::Repository);
        RepositoryGenerator
            .generate(&workspace, &run(vec![]), &mut ScriptedPrompter::new(), &mut report)
            .unwrap();

        let interface = fsutil::read(
            &workspace
                .layout()
                .repository_interfaces()
                .join("PostRepository.php"),
        )
        .unwrap();
        assert!(interface.starts_with("<?php\n\nnamespace App\\Repositories\\Interfaces;\n\ninterface PostRepository"));
        assert!(interface.contains("    // Entity specific queries go here\n"));
    }

    #[test]
    fn test_shared_base_written_once_and_entity_refused() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut first = StepReport::new(Step::Repository);
        RepositoryGenerator
            .generate(&workspace, &run(vec![]), &mut ScriptedPrompter::new(), &mut first)
            .unwrap();

        let mut second = StepReport::new(Step::Repository);
        let err = RepositoryGenerator
            .generate(&workspace, &run(vec![]), &mut ScriptedPrompter::new(), &mut second)
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Collision { .. }));
        assert_eq!(second.warnings().len(), 2);
    }
}
