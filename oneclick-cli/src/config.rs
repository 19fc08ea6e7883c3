//! Configuration management for oneclick
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `ONECLICK_` prefix, `__` for nesting)
//! 2. File passed with `--config`
//! 3. `<project root>/oneclick.toml`
//! 4. `~/.config/oneclick/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # oneclick.toml
//! [generator]
//! image_fields = ["image", "photo", "plan_image", "icon", "avatar"]
//! default_page_size = 25
//! ask_route_auth = false
//!
//! [postman]
//! collection_name = "Blog API"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = "oneclick.toml";

/// Host project directory layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Application source directory
    pub app_dir: PathBuf,

    /// Route files directory
    pub routes_dir: PathBuf,

    /// Migrations directory
    pub migrations_dir: PathBuf,

    /// Composition root patched during setup
    pub bootstrap_file: PathBuf,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            app_dir: PathBuf::from("app"),
            routes_dir: PathBuf::from("routes"),
            migrations_dir: PathBuf::from("database/migrations"),
            bootstrap_file: PathBuf::from("bootstrap/app.php"),
        }
    }
}

/// Generator behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Column names treated as uploaded images, first match wins
    pub image_fields: Vec<String>,

    /// `per_page` fallback used by generated controllers
    pub default_page_size: u32,

    /// Prefix of every generated route group
    pub route_prefix: String,

    /// Middleware applied to every generated route
    pub route_middleware: Vec<String>,

    /// Middleware guarding authenticated routes
    pub auth_middleware: String,

    /// Ask which actions need authentication (otherwise all do)
    pub ask_route_auth: bool,

    /// Upload limit in KB on store requests
    pub store_image_max_kb: u32,

    /// Upload limit in KB on update requests
    pub update_image_max_kb: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            image_fields: ["image", "photo", "plan_image", "icon"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_page_size: 10,
            route_prefix: "v1/".to_string(),
            route_middleware: ["cors", "lang", "throttle"]
                .into_iter()
                .map(String::from)
                .collect(),
            auth_middleware: "auth:sanctum".to_string(),
            ask_route_auth: true,
            store_image_max_kb: 5120,
            update_image_max_kb: 10240,
        }
    }
}

/// Postman export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostmanSettings {
    /// Collection name when none is given on the command line
    pub collection_name: String,

    /// Bearer token placed in the collection auth block
    pub token: String,

    /// Export directory, relative to the project root
    pub export_dir: PathBuf,

    /// Variable used as the host of every request
    pub base_url: String,
}

impl Default for PostmanSettings {
    fn default() -> Self {
        Self {
            collection_name: "Laravel API".to_string(),
            token: "{{api_token}}".to_string(),
            export_dir: PathBuf::from("storage/app"),
            base_url: "{{base_url}}".to_string(),
        }
    }
}

/// Complete oneclick configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScaffoldConfig {
    /// Project layout
    #[serde(default)]
    pub layout: LayoutSettings,

    /// Generator behaviour
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Postman export
    #[serde(default)]
    pub postman: PostmanSettings,
}

impl ScaffoldConfig {
    /// Load configuration for a project
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - `explicit` is given but does not exist
    /// - A configuration file contains invalid TOML
    /// - Values fail type conversion
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 5. Start with defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 4. User config: ~/.config/oneclick/config.toml
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                figment = figment.merge(Toml::file(&user_config));
            }
        }

        // 3. Project config: <root>/oneclick.toml
        let project_config = project_root.join(PROJECT_CONFIG_FILE);
        if project_config.exists() {
            figment = figment.merge(Toml::file(&project_config));
        }

        // 2. Explicit file
        if let Some(path) = explicit {
            anyhow::ensure!(
                path.exists(),
                "Configuration file {} does not exist",
                path.display()
            );
            figment = figment.merge(Toml::file(path));
        }

        // 1. Environment variables (highest priority, double underscore for nesting)
        figment = figment.merge(Env::prefixed("ONECLICK_").split("__").lowercase(true));

        let config = figment
            .extract()
            .context("Failed to load oneclick configuration")?;
        Ok(config)
    }

    /// XDG user configuration path
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("oneclick").join("config.toml"))
    }
}
