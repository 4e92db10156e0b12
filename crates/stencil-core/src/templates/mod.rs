//! Template rendering against the version-pin context
//!
//! Tera is the templating collaborator; stencil only supplies the context.

mod context;

pub use context::VersionContext;

use crate::error::Result;
use camino::Utf8Path;
use std::fs;
use tera::Tera;
use tracing::debug;

/// Renders template files with a [`VersionContext`]
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with autoescaping disabled
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        Self { tera }
    }

    /// Render a template held in memory
    pub fn render_str(
        &mut self,
        name: &str,
        template: &str,
        context: &VersionContext,
    ) -> Result<String> {
        debug!("Rendering template {} with {} pins", name, context.len());
        self.tera.add_raw_template(name, template)?;
        let rendered = self.tera.render(name, &context.to_tera_context()?)?;
        Ok(rendered)
    }

    /// Render a template file
    pub fn render_file(&mut self, path: &Utf8Path, context: &VersionContext) -> Result<String> {
        let template = fs::read_to_string(path)?;
        self.render_str(path.as_str(), &template, context)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
