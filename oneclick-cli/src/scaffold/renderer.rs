//! Template rendering
//!
//! A single [`TemplateRenderer`] holds every embedded template. Generators
//! build a typed, serializable context and ask for a template by name.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::Result;
use crate::templates;

/// Renders the embedded PHP templates
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer with every template registered
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScaffoldError::Template`] if an embedded template fails
    /// to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();

        // Generating source code, not HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        for &(name, source) in templates::ALL {
            env.add_template(name, source)?;
        }

        Ok(Self { env })
    }

    /// Render a registered template
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScaffoldError::Template`] if the template is unknown or
    /// the context lacks a variable it uses.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("templates", &templates::ALL.len())
            .finish()
    }
}
