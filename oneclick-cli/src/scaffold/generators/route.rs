//! Per-entity route file and its include in `routes/api.php`

use serde::Serialize;
use serde_json::json;

use super::{ensure_absent, Generator};
use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::patch::{Anchor, InsertAfter};
use crate::scaffold::report::{Step, StepReport};
use crate::scaffold::run::GenerationRun;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::routes::ENTITY_NAME;
use crate::templates::support::{API_ROUTES, ROUTE_INCLUDE, ROUTE_INCLUDE_MARKER};

/// Controller action exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `GET /{uri}`
    Index,
    /// `GET /{uri}/{param}`
    Show,
    /// `POST /{uri}`
    Store,
    /// `PATCH /{uri}/{param}`
    Update,
    /// `DELETE /{uri}/{param}`
    Destroy,
}

impl Action {
    /// Every action, in route file order
    pub const ALL: [Self; 5] = [
        Self::Index,
        Self::Show,
        Self::Store,
        Self::Update,
        Self::Destroy,
    ];

    /// Controller method name
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Store => "store",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }

    /// `Route::` facade verb
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Index | Self::Show => "get",
            Self::Store => "post",
            Self::Update => "patch",
            Self::Destroy => "delete",
        }
    }

    const fn takes_parameter(self) -> bool {
        matches!(self, Self::Show | Self::Update | Self::Destroy)
    }
}

#[derive(Serialize)]
struct RouteContext {
    verb: &'static str,
    uri: String,
    action: &'static str,
}

/// Writes `routes/api/{entity}.php` and wires the include
pub struct RouteGenerator;

impl RouteGenerator {
    fn authenticated(workspace: &Workspace, prompter: &mut dyn Prompter) -> Result<Vec<Action>> {
        if !workspace.settings().ask_route_auth {
            return Ok(Action::ALL.to_vec());
        }
        let labels: Vec<&str> = Action::ALL.iter().map(|action| action.method()).collect();
        let chosen = prompter.multi_select(
            "Which routes require authentication? (none selected means all)",
            &labels,
        )?;
        if chosen.is_empty() {
            return Ok(Action::ALL.to_vec());
        }
        Ok(Action::ALL
            .into_iter()
            .enumerate()
            .filter(|(index, _)| chosen.contains(index))
            .map(|(_, action)| action)
            .collect())
    }

    fn route(run: &GenerationRun, action: Action) -> RouteContext {
        let entity = run.entity();
        let uri = if action.takes_parameter() {
            format!("{}/{{{}}}", entity.route_uri, entity.route_param)
        } else {
            entity.route_uri.clone()
        };
        RouteContext {
            verb: action.verb(),
            uri,
            action: action.method(),
        }
    }

    fn wire_include(workspace: &Workspace, report: &mut StepReport) -> Result<()> {
        let api_routes = workspace.layout().api_routes_file();
        workspace.create_if_absent(
            &GeneratedFile::new(api_routes.clone(), API_ROUTES, "API route entry point"),
            report,
        )?;
        let rule = InsertAfter::new(
            "route file include",
            Anchor::EndOfFile,
            ROUTE_INCLUDE,
            ROUTE_INCLUDE_MARKER,
        );
        workspace.patch_file(&api_routes, &[&rule], "include of routes/api/*.php", report)?;
        Ok(())
    }
}

impl Generator for RouteGenerator {
    fn step(&self) -> Step {
        Step::Routes
    }

    fn generate(
        &self,
        workspace: &Workspace,
        run: &GenerationRun,
        prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<()> {
        let layout = workspace.layout();
        let path = layout.entity_routes(&run.entity().snake);
        ensure_absent(workspace, &[&path])?;

        let authenticated = Self::authenticated(workspace, prompter)?;
        let (auth_routes, public_routes): (Vec<_>, Vec<_>) = Action::ALL
            .into_iter()
            .partition(|action| authenticated.contains(action));

        workspace.ensure_dir(&layout.api_controllers_dir(), report)?;
        workspace.ensure_dir(&layout.api_routes_dir(), report)?;

        let settings = workspace.settings();
        let middleware = settings
            .route_middleware
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let content = workspace.render(
            ENTITY_NAME,
            json!({
                "entity": run.entity(),
                "middleware": middleware,
                "prefix": settings.route_prefix,
                "public_routes": public_routes.iter().map(|&action| Self::route(run, action)).collect::<Vec<_>>(),
                "auth_routes": auth_routes.iter().map(|&action| Self::route(run, action)).collect::<Vec<_>>(),
                "auth_middleware": settings.auth_middleware,
            }),
        )?;
        workspace.create(
            &GeneratedFile::new(path, content, format!("{} routes", run.entity().class)),
            report,
        )?;

        Self::wire_include(workspace, report)
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
    use crate::scaffold::naming::EntityNames;
    use tempfile::tempdir;

    fn run(name: &str) -> GenerationRun {
        GenerationRun::new(EntityNames::new(name).unwrap(), AttributeSet::new(), vec![])
    }

    fn generate(workspace: &Workspace, name: &str, prompter: &mut ScriptedPrompter) -> Result<()> {
        RouteGenerator.generate(
            workspace,
            &run(name),
            prompter,
            &mut StepReport::new(Step::Routes),
        )
    }

    #[test]
    fn test_split_public_and_authenticated() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut prompter = ScriptedPrompter::new().pick_many(["store", "update", "destroy"]);

        generate(&workspace, "BlogPost", &mut prompter).unwrap();

        let content = fsutil::read(&workspace.layout().entity_routes("blog_post")).unwrap();
        assert_eq!(
            content,
            concat!(
                "<?php\n\n",
                "use App\\Http\\Controllers\\BlogPostController;\n",
                "use Illuminate\\Support\\Facades\\Route;\n\n",
                "Route::middleware(['cors', 'lang', 'throttle'])->prefix('v1/')->group(function () {\n",
                "    Route::get('blog-posts', [BlogPostController::class, 'index']);\n",
                "    Route::get('blog-posts/{blogPost}', [BlogPostController::class, 'show']);\n",
                "\n",
                "    Route::middleware(['auth:sanctum'])->group(function () {\n",
                "        Route::post('blog-posts', [BlogPostController::class, 'store']);\n",
                "        Route::patch('blog-posts/{blogPost}', [BlogPostController::class, 'update']);\n",
                "        Route::delete('blog-posts/{blogPost}', [BlogPostController::class, 'destroy']);\n",
                "    });\n",
                "});\n",
            )
        );
        assert!(workspace.layout().api_controllers_dir().is_dir());
    }

    #[test]
    fn test_empty_selection_protects_everything() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut prompter = ScriptedPrompter::new().accept_default();

        generate(&workspace, "Post", &mut prompter).unwrap();

        let content = fsutil::read(&workspace.layout().entity_routes("post")).unwrap();
        assert!(content.contains("->group(function () {\n    Route::middleware(['auth:sanctum'])"));
        assert_eq!(content.matches("        Route::").count(), 5);
    }

    #[test]
    fn test_include_appended_once() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        fsutil::write(
            &workspace.layout().api_routes_file(),
            "<?php\n\nuse Illuminate\\Support\\Facades\\Route;",
        )
        .unwrap();

        generate(&workspace, "Post", &mut ScriptedPrompter::new().accept_default()).unwrap();
        generate(&workspace, "Tag", &mut ScriptedPrompter::new().accept_default()).unwrap();

        let api = fsutil::read(&workspace.layout().api_routes_file()).unwrap();
        assert_eq!(api.matches(ROUTE_INCLUDE_MARKER).count(), 1);
        assert!(api.ends_with(
            "use Illuminate\\Support\\Facades\\Route;\n\n\\App\\Helpers\\Routes\\v1\\RouteHelper::includeRouteFiles(__DIR__ . '/api/');\n"
        ));
    }

    #[test]
    fn test_existing_route_file_refused_before_asking() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        fsutil::write(&workspace.layout().entity_routes("post"), "<?php\n").unwrap();

        let mut prompter = ScriptedPrompter::new();
        let err = generate(&workspace, "Post", &mut prompter).unwrap_err();
        assert!(matches!(err, ScaffoldError::Collision { .. }));
    }

    #[test]
    fn test_without_auth_question() {
        let dir = tempdir().unwrap();
        let mut config = ScaffoldConfig::default();
        config.generator.ask_route_auth = false;
        let workspace = Workspace::new(dir.path(), &config).unwrap();

        generate(&workspace, "Post", &mut ScriptedPrompter::new()).unwrap();

        let content = fsutil::read(&workspace.layout().entity_routes("post")).unwrap();
        assert_eq!(content.matches("        Route::").count(), 5);
    }
}
