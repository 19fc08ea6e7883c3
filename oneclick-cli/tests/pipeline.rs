//! End-to-end generation runs against a temporary Laravel project

mod common;

use common::Project;
use oneclick_cli_lib::scaffold::attribute::{Attribute, AttributeSet, ColumnType};
use oneclick_cli_lib::scaffold::report::{SilentReporter, Step};
use oneclick_cli_lib::scaffold::MethodSource;
use oneclick_cli_lib::{AttributeSource, Pipeline, RunSummary, ScaffoldError, ScriptedPrompter};

fn generate(project: &Project, name: &str, fields: &[&str]) -> Result<RunSummary, ScaffoldError> {
    let workspace = project.workspace();
    let mut prompter = ScriptedPrompter::new().accept_default();
    let mut reporter = SilentReporter;
    Pipeline::new(&workspace, &mut prompter, &mut reporter).run(
        name,
        AttributeSource::Provided(AttributeSet::parse_all(fields).unwrap()),
        MethodSource::Provided(vec![]),
    )
}

#[test]
fn test_post_generates_every_layer() {
    let project = Project::new();

    let summary = generate(&project, "Post", &["title:string", "body:text", "author_id:foreignId"])
        .unwrap();

    assert!(summary.failed_steps().is_empty(), "{:?}", summary.failed_steps());
    for path in [
        "app/Models/Post.php",
        "app/Repositories/Interfaces/PostRepository.php",
        "app/Repositories/Implementation/PostRepositoryImpl.php",
        "app/Services/Interfaces/PostService.php",
        "app/Services/Implementation/PostServiceImpl.php",
        "app/Http/Resources/PostResource.php",
        "app/Http/Controllers/PostController.php",
        "app/Http/Requests/StorePostRequest.php",
        "app/Http/Requests/UpdatePostRequest.php",
        "routes/api/post.php",
        "routes/api.php",
        "app/Traits/ResponseTrait.php",
        "app/Providers/RepositoryServiceProvider.php",
        "app/Providers/ServiceServiceProvider.php",
    ] {
        assert!(project.path(path).is_file(), "{path} was not written");
    }

    let migrations = project.migrations("posts");
    assert_eq!(migrations.len(), 1);
    let migration = project.read(&format!("database/migrations/{}", migrations[0]));
    assert!(migration.contains("$table->string('title');"));
    assert!(migration.contains("$table->text('body');"));
    assert!(migration.contains(
        "$table->foreignId('author_id')->constrained('authors')->cascadeOnDelete()->cascadeOnUpdate();"
    ));

    let model = project.read("app/Models/Post.php");
    assert!(model.contains("        'title',\n        'body',\n        'author_id',\n"));
    assert!(model.contains("return $this->belongsTo(Author::class);"));

    let store = project.read("app/Http/Requests/StorePostRequest.php");
    assert!(store.contains("'author_id' => 'required|numeric|exists:authors,id'"));

    let routes = project.read("routes/api/post.php");
    assert!(routes.contains("Route::get('posts/{post}', [PostController::class, 'show']);"));

    assert!(project.read("bootstrap/app.php").contains("->withRouting("));
    assert!(summary.bootstrap_patched());
}

#[test]
fn test_second_run_is_refused_and_changes_nothing() {
    let project = Project::new();
    generate(&project, "Post", &["title:string"]).unwrap();
    let before = project.snapshot();

    let err = generate(&project, "Post", &["title:string", "body:text"]).unwrap_err();

    assert!(matches!(err, ScaffoldError::Collision { .. }));
    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_invalid_entity_name_is_rejected() {
    let project = Project::new();
    let before = project.snapshot();

    let err = generate(&project, "123abc", &["title:string"]).unwrap_err();

    assert!(matches!(err, ScaffoldError::InvalidName { .. }));
    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_photo_field_is_handled_as_upload() {
    let project = Project::new();

    generate(&project, "Gallery", &["title:string", "photo:string:nullable"]).unwrap();

    let service = project.read("app/Services/Implementation/GalleryServiceImpl.php");
    assert!(service.contains("$galleryImage"));
    let store = project.read("app/Http/Requests/StoreGalleryRequest.php");
    assert!(store.contains("'photo' => 'nullable|image|mimes:jpeg,png,jpg,gif,svg|max:5120'"));
}

#[test]
fn test_empty_enum_degrades_with_warning() {
    let project = Project::new();
    let workspace = project.workspace();
    let mut attributes = AttributeSet::new();
    attributes
        .insert(Attribute::new("status", ColumnType::Enum))
        .unwrap();

    let mut prompter = ScriptedPrompter::new().accept_default();
    let summary = Pipeline::new(&workspace, &mut prompter, &mut SilentReporter)
        .run(
            "Order",
            AttributeSource::Provided(attributes),
            MethodSource::Provided(vec![]),
        )
        .unwrap();

    let migration = project.read(&format!(
        "database/migrations/{}",
        project.migrations("orders")[0]
    ));
    assert!(migration.contains("$table->string('status');"));
    let warnings = summary.step(Step::Migration).unwrap().warnings();
    assert!(warnings.iter().any(|warning| warning.contains("'status'")));
}

#[test]
fn test_two_entities_share_support_files() {
    let project = Project::new();

    generate(&project, "Post", &["title:string"]).unwrap();
    let summary = generate(&project, "BlogPost", &["title:string"]).unwrap();

    assert!(summary.step(Step::Setup).is_none());
    let provider = project.read("app/Providers/RepositoryServiceProvider.php");
    assert!(provider.contains("\\App\\Repositories\\Interfaces\\PostRepository::class"));
    assert!(provider.contains("\\App\\Repositories\\Interfaces\\BlogPostRepository::class"));
    let api = project.read("routes/api.php");
    assert_eq!(api.matches("includeRouteFiles").count(), 1);
    assert!(project.path("routes/api/blog_post.php").is_file());
}

#[test]
fn test_entity_name_is_kept_as_typed() {
    let project = Project::new();

    generate(&project, "HTTPRequest", &["url:string"]).unwrap();

    assert!(project.path("app/Models/HTTPRequest.php").is_file());
    assert!(project.path("app/Http/Controllers/HTTPRequestController.php").is_file());
    assert!(project
        .read("app/Models/HTTPRequest.php")
        .contains("class HTTPRequest extends Model"));
    assert_eq!(project.migrations("h_t_t_p_requests").len(), 1);
}

#[test]
fn test_digit_names_use_eloquent_table() {
    let project = Project::new();

    generate(&project, "Post2", &["title:string"]).unwrap();
    generate(&project, "Comment", &["post2_id:foreignId"]).unwrap();

    assert_eq!(project.migrations("post2s").len(), 1);
    assert!(project.migrations("post_2s").is_empty());
    assert!(project.path("routes/api/post2.php").is_file());
    let store = project.read("app/Http/Requests/StoreCommentRequest.php");
    assert!(store.contains("'post2_id' => 'required|numeric|exists:post2s,id'"));
}

#[test]
fn test_framework_class_name_is_rejected() {
    let project = Project::new();
    let before = project.snapshot();

    let err = generate(&project, "Request", &["title:string"]).unwrap_err();

    assert!(matches!(err, ScaffoldError::InvalidName { .. }));
    assert_eq!(project.snapshot(), before);
}
