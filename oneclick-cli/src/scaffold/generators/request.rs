//! Store and update form requests

use serde::Serialize;
use serde_json::json;

use super::Generator;
use crate::config::GeneratorSettings;
use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::attribute::{Attribute, ColumnType};
use crate::scaffold::report::{Step, StepReport};
use crate::scaffold::run::GenerationRun;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::http::REQUEST_NAME;

/// Which request class a rule is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `Store{Entity}Request`
    Store,
    /// `Update{Entity}Request`
    Update,
}

impl RequestKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Store => "Store",
            Self::Update => "Update",
        }
    }
}

#[derive(Serialize)]
struct Rule<'a> {
    name: &'a str,
    rule: String,
}

/// Writes `Store{Entity}Request` and `Update{Entity}Request`, replacing previous ones
pub struct RequestGenerator;

impl RequestGenerator {
    /// Validation rule string for one attribute
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::config::GeneratorSettings;
    /// # use oneclick_cli_lib::scaffold::attribute::Attribute;
    /// # use oneclick_cli_lib::scaffold::generators::request::{RequestGenerator, RequestKind};
    /// let settings = GeneratorSettings::default();
    /// let title = Attribute::parse("title:string").unwrap();
    /// assert_eq!(RequestGenerator::rule(&title, RequestKind::Store, &settings), "required|string|max:255");
    /// assert_eq!(RequestGenerator::rule(&title, RequestKind::Update, &settings), "sometimes|string|max:255");
    /// ```
    #[must_use]
    pub fn rule(
        attribute: &Attribute,
        kind: RequestKind,
        settings: &GeneratorSettings,
    ) -> String {
        let presence = match kind {
            RequestKind::Store if attribute.nullable => "nullable",
            RequestKind::Store => "required",
            RequestKind::Update => "sometimes",
        };

        if settings.image_fields.iter().any(|field| *field == attribute.name) {
            let max_kb = match kind {
                RequestKind::Store => settings.store_image_max_kb,
                RequestKind::Update => settings.update_image_max_kb,
            };
            return format!("{presence}|image|mimes:jpeg,png,jpg,gif,svg|max:{max_kb}");
        }

        match attribute.column_type {
            ColumnType::String => format!("{presence}|string|max:255"),
            ColumnType::Integer => format!("{presence}|integer"),
            ColumnType::Boolean => format!("{presence}|boolean"),
            ColumnType::ForeignId => {
                format!("{presence}|numeric|exists:{},id", attribute.referenced_table())
            }
            ty if ty.is_date_like() => format!("{presence}|date"),
            _ => presence.to_string(),
        }
    }
}

impl Generator for RequestGenerator {
    fn step(&self) -> Step {
        Step::Requests
    }

    fn generate(
        &self,
        workspace: &Workspace,
        run: &GenerationRun,
        _prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<()> {
        let entity = run.entity();
        if run.attributes().is_empty() {
            report.warn("No attributes, the form requests have no rules");
        }

        let valid: Vec<&Attribute> = run
            .attributes()
            .iter()
            .filter(|attribute| {
                let valid = attribute.has_valid_name();
                if !valid {
                    report.error(format!(
                        "Attribute '{}' has an invalid name and has no validation rule",
                        attribute.name
                    ));
                }
                valid
            })
            .collect();

        let directory = workspace.layout().requests_dir();
        workspace.ensure_dir(&directory, report)?;

        for kind in [RequestKind::Store, RequestKind::Update] {
            let class_name = format!("{}{}Request", kind.prefix(), entity.class);
            let rules: Vec<Rule<'_>> = valid
                .iter()
                .map(|attribute| Rule {
                    name: &attribute.name,
                    rule: Self::rule(attribute, kind, workspace.settings()),
                })
                .collect();
            let content =
                workspace.render(REQUEST_NAME, json!({ "class_name": class_name, "rules": rules }))?;
            workspace.create_or_overwrite(
                &GeneratedFile::new(
                    directory.join(format!("{class_name}.php")),
                    content,
                    format!("{} validation", kind.prefix().to_lowercase()),
                ),
                report,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaffoldConfig;
    use crate::prompt::ScriptedPrompter;
    use crate::scaffold::attribute::AttributeSet;
    use crate::scaffold::fsutil;
    use crate::scaffold::naming::EntityNames;
    use tempfile::tempdir;

    fn rule(definition: &str, kind: RequestKind) -> String {
        RequestGenerator::rule(
            &Attribute::parse(definition).unwrap(),
            kind,
            &GeneratorSettings::default(),
        )
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(rule("views:integer", RequestKind::Store), "required|integer");
        assert_eq!(rule("active:boolean", RequestKind::Update), "sometimes|boolean");
        assert_eq!(rule("published_at:timestamp", RequestKind::Store), "required|date");
        assert_eq!(rule("born_on:date", RequestKind::Store), "required|date");
        assert_eq!(
            rule("author_id:foreignId", RequestKind::Store),
            "required|numeric|exists:authors,id"
        );
        assert_eq!(rule("body:text", RequestKind::Store), "required");
        assert_eq!(rule("price:decimal", RequestKind::Update), "sometimes");
        assert_eq!(rule("subtitle:string:nullable", RequestKind::Store), "nullable|string|max:255");
        assert_eq!(rule("subtitle:string:nullable", RequestKind::Update), "sometimes|string|max:255");
    }

    #[test]
    fn test_image_rule_limits() {
        assert_eq!(
            rule("photo:string", RequestKind::Store),
            "required|image|mimes:jpeg,png,jpg,gif,svg|max:5120"
        );
        assert_eq!(
            rule("icon:string", RequestKind::Update),
            "sometimes|image|mimes:jpeg,png,jpg,gif,svg|max:10240"
        );
    }

    #[test]
    fn test_writes_both_requests() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let run = GenerationRun::new(
            EntityNames::new("Post").unwrap(),
            AttributeSet::parse_all(&["title:string", "author_id:foreignId"]).unwrap(),
            vec![],
        );
        let mut report = StepReport::new(Step::Requests);

        RequestGenerator
            .generate(&workspace, &run, &mut ScriptedPrompter::new(), &mut report)
            .unwrap();

        let requests = workspace.layout().requests_dir();
        let store = fsutil::read(&requests.join("StorePostRequest.php")).unwrap();
        assert!(store.contains("class StorePostRequest extends FormRequest"));
        assert!(store.contains(
            "        return [\n            'title' => 'required|string|max:255',\n            'author_id' => 'required|numeric|exists:authors,id',\n        ];\n"
        ));
        let update = fsutil::read(&requests.join("UpdatePostRequest.php")).unwrap();
        assert!(update.contains("            'title' => 'sometimes|string|max:255',\n"));
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_empty_attributes_warn() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let run = GenerationRun::new(EntityNames::new("Tag").unwrap(), AttributeSet::new(), vec![]);
        let mut report = StepReport::new(Step::Requests);

        RequestGenerator
            .generate(&workspace, &run, &mut ScriptedPrompter::new(), &mut report)
            .unwrap();

        let store =
            fsutil::read(&workspace.layout().requests_dir().join("StoreTagRequest.php")).unwrap();
        assert!(store.contains("        return [\n        ];\n"));
        assert_eq!(report.warnings().len(), 1);
    }
}
