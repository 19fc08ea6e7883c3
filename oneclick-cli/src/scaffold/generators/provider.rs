//! Container bindings in the provider registries

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::error::Result;
use crate::scaffold::patch::{Anchor, InsertAfter};
use crate::scaffold::report::StepReport;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::providers::PROVIDER_NAME;

static REGISTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"public\s+function\s+register\s*\(\s*\)[^{]*\{")
        .expect("register pattern is valid")
});

/// Interface to implementation binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    provider: &'static str,
    interface: String,
    implementation: String,
}

impl Binding {
    /// Repository binding for an entity class
    #[must_use]
    pub fn repository(class: &str) -> Self {
        Self {
            provider: "RepositoryServiceProvider",
            interface: format!("App\\Repositories\\Interfaces\\{class}Repository"),
            implementation: format!("App\\Repositories\\Implementation\\{class}RepositoryImpl"),
        }
    }

    /// Service binding for an entity class
    #[must_use]
    pub fn service(class: &str) -> Self {
        Self {
            provider: "ServiceServiceProvider",
            interface: format!("App\\Services\\Interfaces\\{class}Service"),
            implementation: format!("App\\Services\\Implementation\\{class}ServiceImpl"),
        }
    }

    /// Provider class holding the binding
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// `$this->app->bind(...)` statement
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::generators::provider::Binding;
    /// assert_eq!(
    ///     Binding::service("Post").statement(),
    ///     "$this->app->bind(\\App\\Services\\Interfaces\\PostService::class, \\App\\Services\\Implementation\\PostServiceImpl::class);"
    /// );
    /// ```
    #[must_use]
    pub fn statement(&self) -> String {
        format!(
            "$this->app->bind(\\{}::class, \\{}::class);",
            self.interface, self.implementation
        )
    }

    /// Text proving the binding exists
    ///
    /// Fully qualified so `PostService` is not mistaken for `BlogPostService`.
    #[must_use]
    pub fn marker(&self) -> String {
        format!("\\{}::class", self.interface)
    }

    /// Create the provider with this binding, or add the binding when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be rendered, read or written,
    /// or has no `register()` method to insert into.
    pub fn register(&self, workspace: &Workspace, report: &mut StepReport) -> Result<()> {
        let path = workspace.layout().provider(self.provider);

        if !path.exists() {
            let content = workspace.render(
                PROVIDER_NAME,
                json!({ "name": self.provider, "binding": self.statement() }),
            )?;
            workspace.create(
                &GeneratedFile::new(path, content, format!("{} with first binding", self.provider)),
                report,
            )?;
            report.info(format!(
                "Register App\\Providers\\{} in bootstrap/providers.php",
                self.provider
            ));
            return Ok(());
        }

        let rule = InsertAfter::new(
            format!("{} binding", self.interface),
            Anchor::Pattern(REGISTER.clone()),
            format!("\n        {}", self.statement()),
            self.marker(),
        );
        workspace.patch_file(&path, &[&rule], "container binding", report)?;
        Ok(())
    }
}
