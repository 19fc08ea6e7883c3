//! API resource transformer

use serde_json::json;

use super::{ensure_absent, Generator};
use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::report::{Step, StepReport};
use crate::scaffold::run::GenerationRun;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::http::RESOURCE_NAME;

/// Writes `app/Http/Resources/{Entity}Resource.php`
pub struct ResourceGenerator;

impl Generator for ResourceGenerator {
    fn step(&self) -> Step {
        Step::Resource
    }

    fn generate(
        &self,
        workspace: &Workspace,
        run: &GenerationRun,
        _prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<()> {
        let entity = run.entity();
        let path = workspace
            .layout()
            .resources_dir()
            .join(format!("{}Resource.php", entity.class));
        ensure_absent(workspace, &[&path])?;

        let mut fields = Vec::with_capacity(run.attributes().len());
        for attribute in run.attributes() {
            if attribute.has_valid_name() {
                fields.push(attribute.name.as_str());
            } else {
                report.error(format!(
                    "Attribute '{}' has an invalid name and was left out of the resource",
                    attribute.name
                ));
            }
        }

        let content = workspace.render(RESOURCE_NAME, json!({ "entity": entity, "fields": fields }))?;
        workspace.create(
            &GeneratedFile::new(path, content, format!("{} resource", entity.class)),
            report,
        )
    }
}
