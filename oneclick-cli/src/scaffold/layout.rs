//! Where generated files live inside the host project

use std::path::{Path, PathBuf};

use crate::config::LayoutSettings;

/// Resolves every generated path against the project root
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    settings: LayoutSettings,
}

impl ProjectLayout {
    /// Layout rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, settings: LayoutSettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path under the application directory
    #[must_use]
    pub fn app(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(&self.settings.app_dir).join(relative)
    }

    /// `app/Models/{Class}.php`
    #[must_use]
    pub fn model(&self, class: &str) -> PathBuf {
        self.app(format!("Models/{class}.php"))
    }

    /// Migrations directory
    #[must_use]
    pub fn migrations_dir(&self) -> PathBuf {
        self.root.join(&self.settings.migrations_dir)
    }

    /// `app/Repositories/Interfaces`
    #[must_use]
    pub fn repository_interfaces(&self) -> PathBuf {
        self.app("Repositories/Interfaces")
    }

    /// `app/Repositories/Implementation`
    #[must_use]
    pub fn repository_implementations(&self) -> PathBuf {
        self.app("Repositories/Implementation")
    }

    /// `app/Services/Interfaces`
    #[must_use]
    pub fn service_interfaces(&self) -> PathBuf {
        self.app("Services/Interfaces")
    }

    /// `app/Services/Implementation`
    #[must_use]
    pub fn service_implementations(&self) -> PathBuf {
        self.app("Services/Implementation")
    }

    /// `app/Providers/{name}.php`
    #[must_use]
    pub fn provider(&self, name: &str) -> PathBuf {
        self.app(format!("Providers/{name}.php"))
    }

    /// `app/Http/Resources`
    #[must_use]
    pub fn resources_dir(&self) -> PathBuf {
        self.app("Http/Resources")
    }

    /// `app/Http/Controllers/{Class}Controller.php`
    #[must_use]
    pub fn controller(&self, class: &str) -> PathBuf {
        self.app(format!("Http/Controllers/{class}Controller.php"))
    }

    /// `app/Http/Controllers/Api`
    #[must_use]
    pub fn api_controllers_dir(&self) -> PathBuf {
        self.app("Http/Controllers/Api")
    }

    /// `app/Http/Requests`
    #[must_use]
    pub fn requests_dir(&self) -> PathBuf {
        self.app("Http/Requests")
    }

    /// `routes/api`
    #[must_use]
    pub fn api_routes_dir(&self) -> PathBuf {
        self.root.join(&self.settings.routes_dir).join("api")
    }

    /// `routes/api.php`
    #[must_use]
    pub fn api_routes_file(&self) -> PathBuf {
        self.root.join(&self.settings.routes_dir).join("api.php")
    }

    /// `routes/api/{snake}.php`
    #[must_use]
    pub fn entity_routes(&self, snake: &str) -> PathBuf {
        self.api_routes_dir().join(format!("{snake}.php"))
    }

    /// Composition root (`bootstrap/app.php`)
    #[must_use]
    pub fn bootstrap_file(&self) -> PathBuf {
        self.root.join(&self.settings.bootstrap_file)
    }

    /// Path relative to the root, for messages
    #[must_use]
    pub fn display(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}
