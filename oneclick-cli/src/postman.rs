//! Postman collection export
//!
//! Reads the generated route files under `routes/api/` together with the
//! rule keys of their form requests and writes a collection in the v2.1
//! schema: one folder per resource, one item per route, sample form values
//! for store and update.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::PostmanSettings;
use crate::error::{Result, ScaffoldError};
use crate::scaffold::fsutil;
use crate::scaffold::layout::ProjectLayout;

const SCHEMA: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";
const GENERAL_FOLDER: &str = "General";

static ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Route::(get|post|put|patch|delete)\(\s*'([^']*)'\s*,\s*\[\s*\\?(?:[A-Za-z0-9_]+\\)*([A-Za-z0-9_]+)Controller::class\s*,\s*'([A-Za-z0-9_]+)'\s*\]",
    )
    .expect("route pattern is valid")
});

static PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"->prefix\(\s*'([^']*)'\s*\)").expect("prefix pattern is valid"));

static RULE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'([A-Za-z_][A-Za-z0-9_.*]*)'\s*=>\s*'").expect("rule key pattern is valid")
});

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(id|count|number)").expect("numeric pattern is valid"));
static TEXTUAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(name|title|description)").expect("textual pattern is valid"));
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)email").expect("email pattern is valid"));
static CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(code|slug)").expect("code pattern is valid"));

/// One `Route::verb(...)` line of a generated route file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    /// Upper-case HTTP method
    pub method: String,
    /// Full URI below the host, `api/v1/posts/{post}`
    pub uri: String,
    /// Entity class behind the controller (`Post` for `PostController`)
    pub entity: String,
    /// Controller action
    pub action: String,
}

impl RouteDefinition {
    /// Whether the URI carries a route parameter
    #[must_use]
    pub fn has_parameter(&self) -> bool {
        self.uri.contains('{')
    }

    /// Folder grouping this route: the first segment after `api/<version>`
    #[must_use]
    pub fn folder(&self) -> String {
        let segments: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["api", version, resource, ..] if version.starts_with('v') => resource.to_lowercase(),
            _ => GENERAL_FOLDER.to_string(),
        }
    }

    /// Item name shown in Postman
    #[must_use]
    pub fn item_name(&self) -> String {
        match self.method.as_str() {
            "GET" if self.has_parameter() => "get one".to_string(),
            "GET" => "get all".to_string(),
            "POST" => "store".to_string(),
            "PATCH" | "PUT" => "update".to_string(),
            "DELETE" => "delete".to_string(),
            _ => self.uri.clone(),
        }
    }
}

/// Parse one route file
///
/// # Examples
///
/// ```
/// # use oneclick_cli_lib::postman::parse_routes;
/// let source = "Route::middleware(['cors'])->prefix('v1/')->group(function () {\n    Route::get('posts', [PostController::class, 'index']);\n});";
/// let routes = parse_routes(source);
/// assert_eq!(routes[0].uri, "api/v1/posts");
/// assert_eq!(routes[0].entity, "Post");
/// ```
#[must_use]
pub fn parse_routes(source: &str) -> Vec<RouteDefinition> {
    let prefix = PREFIX
        .captures(source)
        .and_then(|captures| captures.get(1))
        .map_or("", |prefix| prefix.as_str());

    ROUTE
        .captures_iter(source)
        .map(|captures| {
            let uri = ["api", prefix, &captures[2]]
                .iter()
                .flat_map(|part| part.split('/'))
                .filter(|segment| !segment.is_empty())
                .collect::<Vec<_>>()
                .join("/");
            RouteDefinition {
                method: captures[1].to_uppercase(),
                uri,
                entity: captures[3].to_string(),
                action: captures[4].to_string(),
            }
        })
        .collect()
}

/// Keys of the `rules()` array of a form request
#[must_use]
pub fn parse_rule_keys(source: &str) -> Vec<String> {
    let Some(start) = source.find("function rules") else {
        return Vec::new();
    };
    RULE_KEY
        .captures_iter(&source[start..])
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Placeholder form value for a field
///
/// `prefix` is `sample` for store requests and `updated` for updates.
pub fn sample_value<R: Rng>(attribute: &str, prefix: &str, rng: &mut R) -> String {
    let value = format!("{prefix} {}", attribute.replace('_', " ").to_lowercase());
    if NUMERIC.is_match(attribute) {
        rng.gen_range(1..=100).to_string()
    } else if TEXTUAL.is_match(attribute) {
        value
    } else if EMAIL.is_match(attribute) {
        format!("{prefix}.email@example.com")
    } else if CODE.is_match(attribute) {
        let letters: String = value.chars().take(3).collect();
        format!("{}{}", letters.to_uppercase(), rng.gen_range(1..=999))
    } else {
        value
    }
}

/// Collection root
#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    /// Name and schema
    pub info: Info,
    /// Collection-wide authentication
    pub auth: Auth,
    /// One folder per resource
    pub item: Vec<Folder>,
}

/// Collection metadata
#[derive(Debug, Clone, Serialize)]
pub struct Info {
    /// Collection name
    pub name: String,
    /// Schema URL
    pub schema: &'static str,
}

/// Bearer authentication
#[derive(Debug, Clone, Serialize)]
pub struct Auth {
    /// Always `bearer`
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Token entries
    pub bearer: Vec<KeyValue>,
}

/// Generic key / value pair
#[derive(Debug, Clone, Serialize)]
pub struct KeyValue {
    /// Key
    pub key: String,
    /// Value
    pub value: String,
    /// Value type (`string`, `text`)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    /// Shown next to the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl KeyValue {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: None,
            description: None,
        }
    }

    fn typed(mut self, kind: &'static str) -> Self {
        self.kind = Some(kind);
        self
    }

    fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Resource folder
#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    /// Resource segment
    pub name: String,
    /// Requests in route file order
    pub item: Vec<Item>,
}

/// Single request
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    /// `get all`, `get one`, `store`, `update` or `delete`
    pub name: String,
    /// Request definition
    pub request: Request,
    /// Saved responses (always empty)
    pub response: Vec<serde_json::Value>,
}

/// Request definition
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// HTTP method
    pub method: String,
    /// Headers
    pub header: Vec<KeyValue>,
    /// Form body for store and update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    /// Target URL
    pub url: Url,
}

/// Form-data body
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    /// Always `formdata`
    pub mode: &'static str,
    /// Form fields
    pub formdata: Vec<KeyValue>,
}

/// Request URL
#[derive(Debug, Clone, Serialize)]
pub struct Url {
    /// Full URL with host variable
    pub raw: String,
    /// Host variable
    pub host: Vec<String>,
    /// Path segments
    pub path: Vec<String>,
    /// Query parameters
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<KeyValue>,
}

/// Builds and writes collections for a project
#[derive(Debug)]
pub struct PostmanExporter<'a> {
    layout: &'a ProjectLayout,
    settings: &'a PostmanSettings,
}

impl<'a> PostmanExporter<'a> {
    /// Exporter for the project described by `layout`
    #[must_use]
    pub const fn new(layout: &'a ProjectLayout, settings: &'a PostmanSettings) -> Self {
        Self { layout, settings }
    }

    /// Every route of every file below `routes/api/`, files in name order
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MissingFile`] when `routes/api/` does not
    /// exist, or [`ScaffoldError::Io`] if a route file cannot be read.
    pub fn routes(&self) -> Result<Vec<RouteDefinition>> {
        let dir = self.layout.api_routes_dir();
        if !dir.is_dir() {
            return Err(ScaffoldError::MissingFile {
                path: self.layout.display(&dir),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&dir)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "php"))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();

        let mut routes = Vec::new();
        for file in &files {
            let found = parse_routes(&fsutil::read(file)?);
            tracing::debug!(file = %self.layout.display(file).display(), routes = found.len(), "route file parsed");
            routes.extend(found);
        }
        Ok(routes)
    }

    fn rule_keys(&self, route: &RouteDefinition) -> Vec<String> {
        let class = match route.method.as_str() {
            "POST" => format!("Store{}Request.php", route.entity),
            "PATCH" | "PUT" => format!("Update{}Request.php", route.entity),
            _ => return Vec::new(),
        };
        let path = self.layout.requests_dir().join(class);
        match fsutil::read(&path) {
            Ok(source) => parse_rule_keys(&source),
            Err(err) => {
                tracing::warn!(uri = %route.uri, error = %err, "no validation rules for route");
                Vec::new()
            }
        }
    }

    fn item<R: Rng>(&self, route: &RouteDefinition, rng: &mut R) -> Item {
        let mut query = Vec::new();
        let mut body = None;
        match route.method.as_str() {
            "GET" if !route.has_parameter() => {
                query.push(KeyValue::new("per_page", "10").described("Items per page"));
                query.push(KeyValue::new("page", "1").described("Page number"));
            }
            "POST" | "PATCH" | "PUT" => {
                let (prefix, label) = if route.method == "POST" {
                    ("sample", "Sample")
                } else {
                    ("updated", "Updated")
                };
                let formdata: Vec<KeyValue> = self
                    .rule_keys(route)
                    .into_iter()
                    .map(|key| {
                        let value = sample_value(&key, prefix, rng);
                        let description = format!("{label} value for {key}");
                        KeyValue::new(key, value).typed("text").described(description)
                    })
                    .collect();
                if !formdata.is_empty() {
                    body = Some(Body {
                        mode: "formdata",
                        formdata,
                    });
                }
            }
            "DELETE" => {
                query.push(KeyValue::new("id", "1").described("Sample ID to delete"));
            }
            _ => {}
        }

        let base_url = &self.settings.base_url;
        Item {
            name: route.item_name(),
            request: Request {
                method: route.method.clone(),
                header: vec![
                    KeyValue::new("Accept", "application/json"),
                    KeyValue::new("Content-Type", "multipart/form-data"),
                ],
                body,
                url: Url {
                    raw: format!("{base_url}/{}", route.uri),
                    host: vec![base_url.clone()],
                    path: route.uri.split('/').map(ToString::to_string).collect(),
                    query,
                },
            },
            response: Vec::new(),
        }
    }

    /// Build the collection
    ///
    /// # Errors
    ///
    /// Same as [`PostmanExporter::routes`].
    pub fn collection<R: Rng>(&self, name: &str, rng: &mut R) -> Result<Collection> {
        let mut order = Vec::new();
        let mut folders: BTreeMap<String, Vec<Item>> = BTreeMap::new();
        for route in self.routes()? {
            let folder = route.folder();
            if !folders.contains_key(&folder) {
                order.push(folder.clone());
            }
            let item = self.item(&route, rng);
            folders.entry(folder).or_default().push(item);
        }

        Ok(Collection {
            info: Info {
                name: name.to_string(),
                schema: SCHEMA,
            },
            auth: Auth {
                kind: "bearer",
                bearer: vec![KeyValue::new("token", &self.settings.token).typed("string")],
            },
            item: order
                .into_iter()
                .map(|name| {
                    let item = folders.remove(&name).unwrap_or_default();
                    Folder { name, item }
                })
                .collect(),
        })
    }

    /// Write `postman_collection_<unix ts>.json` to the export directory
    ///
    /// # Errors
    ///
    /// Returns an error if the routes cannot be read, the collection cannot
    /// be serialized or the file cannot be written.
    pub fn export(&self, name: Option<&str>) -> Result<PathBuf> {
        let name = name.unwrap_or(&self.settings.collection_name);
        let collection = self.collection(name, &mut rand::thread_rng())?;
        let json = serde_json::to_string_pretty(&collection)?;

        let path = self.export_dir().join(format!(
            "postman_collection_{}.json",
            Utc::now().timestamp()
        ));
        fsutil::write(&path, &json)?;
        tracing::info!(path = %path.display(), folders = collection.item.len(), "collection exported");
        Ok(path)
    }

    fn export_dir(&self) -> PathBuf {
        let dir: &Path = &self.settings.export_dir;
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.layout.root().join(dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    const POST_ROUTES: &str = r"<?php

use App\Http\Controllers\PostController;
use Illuminate\Support\Facades\Route;

Route::middleware(['cors', 'lang', 'throttle'])->prefix('v1/')->group(function () {
    Route::get('posts', [PostController::class, 'index']);
    Route::get('posts/{post}', [PostController::class, 'show']);

    Route::middleware(['auth:sanctum'])->group(function () {
        Route::post('posts', [PostController::class, 'store']);
        Route::patch('posts/{post}', [PostController::class, 'update']);
        Route::delete('posts/{post}', [PostController::class, 'destroy']);
    });
});
";

    const STORE_REQUEST: &str = r"<?php

class StorePostRequest extends FormRequest
{
    public function rules(): array
    {
        return [
            'title' => 'required|string|max:255',
            'author_id' => 'required|numeric|exists:authors,id',
        ];
    }
}
";

    #[test]
    fn test_parse_routes() {
        let routes = parse_routes(POST_ROUTES);
        let summary: Vec<(&str, &str, String)> = routes
            .iter()
            .map(|route| (route.method.as_str(), route.uri.as_str(), route.item_name()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("GET", "api/v1/posts", "get all".to_string()),
                ("GET", "api/v1/posts/{post}", "get one".to_string()),
                ("POST", "api/v1/posts", "store".to_string()),
                ("PATCH", "api/v1/posts/{post}", "update".to_string()),
                ("DELETE", "api/v1/posts/{post}", "delete".to_string()),
            ]
        );
        assert!(routes.iter().all(|route| route.folder() == "posts"));
    }

    #[test]
    fn test_route_without_version_goes_to_general() {
        let routes = parse_routes("Route::get('health', [StatusController::class, 'show']);");
        assert_eq!(routes[0].uri, "api/health");
        assert_eq!(routes[0].folder(), "General");
    }

    #[test]
    fn test_rule_keys() {
        assert_eq!(parse_rule_keys(STORE_REQUEST), vec!["title", "author_id"]);
        assert!(parse_rule_keys("<?php class Nothing {}").is_empty());
    }

    #[test]
    fn test_sample_values() {
        let mut rng = StdRng::seed_from_u64(7);
        let id: u32 = sample_value("author_id", "sample", &mut rng).parse().unwrap();
        assert!((1..=100).contains(&id));
        assert_eq!(sample_value("title", "sample", &mut rng), "sample title");
        assert_eq!(sample_value("first_name", "updated", &mut rng), "updated first name");
        assert_eq!(
            sample_value("contact_email", "sample", &mut rng),
            "sample.email@example.com"
        );
        let code = sample_value("promo_code", "sample", &mut rng);
        assert!(code.starts_with("SAM"));
        assert!(code[3..].parse::<u32>().is_ok());
        assert_eq!(sample_value("body", "sample", &mut rng), "sample body");
    }

    #[test]
    fn test_collection_structure() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path(), LayoutSettings::default());
        fsutil::write(&layout.entity_routes("post"), POST_ROUTES).unwrap();
        fsutil::write(&layout.requests_dir().join("StorePostRequest.php"), STORE_REQUEST).unwrap();
        let settings = PostmanSettings::default();
        let exporter = PostmanExporter::new(&layout, &settings);

        let collection = exporter
            .collection("Blog", &mut StdRng::seed_from_u64(1))
            .unwrap();
        let json = serde_json::to_value(&collection).unwrap();

        assert_eq!(json["info"]["schema"], SCHEMA);
        assert_eq!(json["auth"]["type"], "bearer");
        assert_eq!(json["auth"]["bearer"][0]["value"], "{{api_token}}");
        let items = &json["item"][0]["item"];
        assert_eq!(json["item"][0]["name"], "posts");
        assert_eq!(items[0]["request"]["url"]["query"][0]["key"], "per_page");
        assert!(items[1]["request"]["url"].get("query").is_none());
        assert_eq!(items[2]["request"]["body"]["formdata"][0]["value"], "sample title");
        assert!(items[3]["request"].get("body").is_none());
        assert_eq!(items[4]["request"]["url"]["query"][0]["key"], "id");
        assert_eq!(items[4]["request"]["url"]["raw"], "{{base_url}}/api/v1/posts/{post}");
    }

    #[test]
    fn test_missing_route_directory() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path(), LayoutSettings::default());
        let settings = PostmanSettings::default();
        let err = PostmanExporter::new(&layout, &settings).routes().unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingFile { .. }));
    }
}
