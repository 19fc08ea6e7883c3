//! Service layer: shared base plus entity interface and implementation

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
use crate::templates::service::{BASE_IMPL_NAME, BASE_INTERFACE_NAME, IMPL_NAME, INTERFACE_NAME};

#[derive(Serialize)]
struct MethodContext {
    signature: String,
    body: String,
}

#[derive(Serialize)]
struct ImageContext<'a> {
    name: &'a str,
    variable: String,
}

#[derive(Serialize)]
struct FieldContext<'a> {
    name: &'a str,
    value: String,
}

#[derive(Serialize)]
struct ServiceContext<'a> {
    entity: &'a EntityNames,
    needs_model: bool,
    imports: Vec<&'static str>,
    image: Option<ImageContext<'a>>,
    fields: Vec<FieldContext<'a>>,
    methods: Vec<MethodContext>,
}

/// Writes `BaseService`, `{Entity}Service` and `{Entity}ServiceImpl`
pub struct ServiceGenerator;

impl ServiceGenerator {
    fn context<'a>(
        workspace: &Workspace,
        run: &'a GenerationRun,
        report: &mut StepReport,
    ) -> ServiceContext<'a> {
        let entity = run.entity();
        let image = run
            .attributes()
            .first_named_in(&workspace.settings().image_fields)
            .filter(|attribute| attribute.has_valid_name())
            .map(|attribute| ImageContext {
                name: &attribute.name,
                variable: format!("{}Image", entity.variable),
            });

        let mut fields = Vec::with_capacity(run.attributes().len());
        for attribute in run.attributes() {
            if !attribute.has_valid_name() {
                report.error(format!(
                    "Attribute '{}' has an invalid name and was left out of the service",
                    attribute.name
                ));
                continue;
            }
            let value = match &image {
                Some(image) if image.name == attribute.name => format!("${}", image.variable),
                _ => format!("$request->{}", attribute.name),
            };
            fields.push(FieldContext {
                name: &attribute.name,
                value,
            });
        }

        ServiceContext {
            entity,
            needs_model: run.service_methods().any(|method| method.return_type.needs_model()),
            imports: return_type_imports(run.service_methods()),
            image,
            fields,
            methods: run
                .service_methods()
                .map(|method| MethodContext {
                    signature: method.signature(),
                    body: method.return_type.service_stub(&entity.class),
                })
                .collect(),
        }
    }
}

impl Generator for ServiceGenerator {
    fn step(&self) -> Step {
        Step::Service
    }

    fn generate(
        &self,
        workspace: &Workspace,
        run: &GenerationRun,
        _prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<()> {
        let layout = workspace.layout();
        let interfaces = layout.service_interfaces();
        let implementations = layout.service_implementations();
        workspace.ensure_dir(&interfaces, report)?;
        workspace.ensure_dir(&implementations, report)?;

        write_shared(
            workspace,
            &[
                GeneratedFile::new(
                    interfaces.join("BaseService.php"),
                    workspace.render(BASE_INTERFACE_NAME, json!({}))?,
                    "shared service contract",
                ),
                GeneratedFile::new(
                    implementations.join("BaseServiceImpl.php"),
                    workspace.render(BASE_IMPL_NAME, json!({}))?,
                    "shared service base class",
                ),
            ],
            report,
        )?;

        let entity = run.entity();
        let interface_path = interfaces.join(format!("{}Service.php", entity.class));
        let implementation_path = implementations.join(format!("{}ServiceImpl.php", entity.class));
        ensure_absent(workspace, &[&interface_path, &implementation_path])?;

        let context = Self::context(workspace, run, report);
        if let Some(image) = &context.image {
            tracing::debug!(step = %report.step(), field = image.name, "image upload handling");
        }
        workspace.create(
            &GeneratedFile::new(
                interface_path,
                workspace.render(INTERFACE_NAME, &context)?,
                format!("{} service contract", entity.class),
            ),
            report,
        )?;
        workspace.create(
            &GeneratedFile::new(
                implementation_path,
                workspace.render(IMPL_NAME, &context)?,
                format!("{} service", entity.class),
            ),
            report,
        )?;

        Binding::service(&entity.class).register(workspace, report)
    }
}
