//! Model generation, the only hard gate of a run

use regex::Regex;
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::attribute::AttributeSet;
use crate::scaffold::collect::AttributeCollector;
use crate::scaffold::naming::{EntityNames, TemplateHelpers};
use crate::scaffold::patch::{Anchor, InsertAfter};
use crate::scaffold::report::StepReport;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::model::{MEMBERS_NAME, MINIMAL_NAME};

/// Where the entity's attributes come from
#[derive(Debug, Clone)]
pub enum AttributeSource {
    /// Ask interactively once the model file exists
    Interactive,
    /// Already parsed, for example from `--field` definitions
    Provided(AttributeSet),
}

#[derive(Serialize)]
struct Relation {
    method: String,
    model: String,
}

#[derive(Serialize)]
struct MembersContext<'a> {
    fillable: Vec<&'a str>,
    relations: Vec<Relation>,
}

/// Writes the model and collects the attributes every later step uses
pub struct ModelGenerator;

impl ModelGenerator {
    /// Create the model, gather attributes, then inject fillable and relations
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScaffoldError::Collision`] when the model already
    /// exists (nothing is written or asked), or any rendering, patching or
    /// prompt failure.
    pub fn generate(
        workspace: &Workspace,
        entity: &EntityNames,
        source: AttributeSource,
        prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<AttributeSet> {
        let path = workspace.layout().model(&entity.class);
        let minimal = workspace.render(MINIMAL_NAME, json!({ "entity": entity }))?;
        workspace.create(
            &GeneratedFile::new(path.clone(), minimal, format!("{} model", entity.class)),
            report,
        )?;

        let attributes = match source {
            AttributeSource::Interactive => AttributeCollector::collect(prompter)?,
            AttributeSource::Provided(attributes) => attributes,
        };

        let members = workspace.render(MEMBERS_NAME, Self::members(&attributes))?;
        let anchor = Regex::new(&format!(
            r"class\s+{}\s+extends\s+Model\s*\{{\s*(use\s+[^;]+;)?",
            regex::escape(&entity.class)
        ))?;
        let rule = InsertAfter::new(
            "fillable and relations",
            Anchor::Pattern(anchor),
            format!("\n\n{}", members.trim_end()),
            "protected $fillable",
        );
        workspace.patch_file(&path, &[&rule], "fillable attributes and relations", report)?;

        Ok(attributes)
    }

    fn members(attributes: &AttributeSet) -> MembersContext<'_> {
        MembersContext {
            fillable: attributes.names(),
            relations: attributes
                .foreign_keys()
                .map(|attribute| Relation {
                    method: TemplateHelpers::to_relation_method(&attribute.name),
                    model: TemplateHelpers::to_related_model(&attribute.name),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaffoldConfig;
    use crate::error::ScaffoldError;
    use crate::prompt::ScriptedPrompter;
    use crate::scaffold::fsutil;
    use crate::scaffold::report::Step;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn generate(
        workspace: &Workspace,
        name: &str,
        source: AttributeSource,
        prompter: &mut ScriptedPrompter,
    ) -> Result<AttributeSet> {
        let mut report = StepReport::new(Step::Model);
        ModelGenerator::generate(
            workspace,
            &EntityNames::new(name).unwrap(),
            source,
            prompter,
            &mut report,
        )
    }

    #[test]
    fn test_fillable_and_relations() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let attributes =
            AttributeSet::parse_all(&["title:string", "body:text", "author_id:foreignId"])
                .unwrap();

        generate(
            &workspace,
            "Post",
            AttributeSource::Provided(attributes),
            &mut ScriptedPrompter::new(),
        )
        .unwrap();

        let model = fsutil::read(&workspace.layout().model("Post")).unwrap();
        assert!(model.contains(
            "    use HasFactory;\n\n    protected $fillable = [\n        'title',\n        'body',\n        'author_id',\n    ];\n\n    public function author()\n    {\n        return $this->belongsTo(Author::class);\n    }\n}\n"
        ));
    }

    #[test]
    fn test_interactive_attributes() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut prompter = ScriptedPrompter::new()
            .text("name")
            .pick("string")
            .accept_default()
            .text("done");

        let attributes =
            generate(&workspace, "Tag", AttributeSource::Interactive, &mut prompter).unwrap();
        assert_eq!(attributes.names(), vec!["name"]);
    }

    #[test]
    fn test_existing_model_is_refused_before_prompting() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let path = workspace.layout().model("Post");
        fsutil::write(&path, "<?php // mine\n").unwrap();

        let mut prompter = ScriptedPrompter::new();
        let err = generate(&workspace, "Post", AttributeSource::Interactive, &mut prompter)
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Collision { .. }));
        assert_eq!(fsutil::read(&path).unwrap(), "<?php // mine\n");
    }

    fn column_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set("[a-z][a-z0-9_]{0,12}", 1..8)
            .prop_map(|names| names.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    }

    fn fillable(model: &str) -> Vec<String> {
        let start = model.find("protected $fillable = [").unwrap();
        let end = start + model[start..].find("];").unwrap();
        model[start..end]
            .lines()
            .filter_map(|line| line.trim().strip_prefix('\'')?.strip_suffix("',"))
            .map(ToString::to_string)
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_fillable_follows_insertion_order(names in column_names()) {
            let dir = tempdir().unwrap();
            let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
            let definitions: Vec<String> = names.iter().map(|name| format!("{name}:string")).collect();

            generate(
                &workspace,
                "Post",
                AttributeSource::Provided(AttributeSet::parse_all(&definitions).unwrap()),
                &mut ScriptedPrompter::new(),
            )
            .unwrap();

            let model = fsutil::read(&workspace.layout().model("Post")).unwrap();
            prop_assert_eq!(fillable(&model), names);
        }
    }
}
