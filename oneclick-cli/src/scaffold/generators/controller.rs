//! HTTP controller delegating to the entity service

use serde_json::json;

use super::Generator;
use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::report::{Step, StepReport};
use crate::scaffold::run::GenerationRun;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::http::CONTROLLER_NAME;

/// Writes `app/Http/Controllers/{Entity}Controller.php`, replacing any previous one
pub struct ControllerGenerator;

impl Generator for ControllerGenerator {
    fn step(&self) -> Step {
        Step::Controller
    }

    fn generate(
        &self,
        workspace: &Workspace,
        run: &GenerationRun,
        _prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<()> {
        let entity = run.entity();
        let content = workspace.render(
            CONTROLLER_NAME,
            json!({
                "entity": entity,
                "default_page_size": workspace.settings().default_page_size,
            }),
        )?;
        workspace.create_or_overwrite(
            &GeneratedFile::new(
                workspace.layout().controller(&entity.class),
                content,
                format!("{} controller", entity.class),
            ),
            report,
        )
    }
}
