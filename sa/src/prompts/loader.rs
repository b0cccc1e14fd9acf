//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::draft::SolutionContext;

/// Values available to every prompt template
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub solution_type: String,
    pub industry: String,
    pub customer: String,
    pub engagement: String,
}

impl From<&SolutionContext> for PromptContext {
    fn from(ctx: &SolutionContext) -> Self {
        Self {
            solution_type: ctx.solution_type.clone(),
            industry: ctx.industry.clone(),
            customer: ctx.customer.clone(),
            engagement: ctx.engagement.clone(),
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directories, searched in order
    dirs: Vec<PathBuf>,
}

impl PromptLoader {
    /// Create a loader rooted at a working directory
    ///
    /// Searches `.sowarchitect/prompts/` under `root`, then `extra_dir` if given.
    pub fn new(root: impl AsRef<Path>, extra_dir: Option<&Path>) -> Self {
        let root = root.as_ref();
        debug!(?root, ?extra_dir, "PromptLoader::new: called");
        let candidates = std::iter::once(root.join(".sowarchitect/prompts")).chain(extra_dir.map(Path::to_path_buf));

        let dirs: Vec<PathBuf> = candidates
            .filter(|dir| {
                let exists = dir.is_dir();
                debug!(?dir, %exists, "PromptLoader::new: checking directory");
                exists
            })
            .collect();

        Self {
            hbs: Self::engine(),
            dirs,
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            dirs: Vec::new(),
        }
    }

    // Prompts are plain text; HTML escaping would mangle "&" in solution names.
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks each override directory for `{name}.pmt`, then the embedded fallback.
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in &self.dirs {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
            debug!(?path, "PromptLoader::load_template: no override");
        }

        // Fall back to embedded
        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        info!("Rendering template '{}' for '{}'", template_name, context.solution_type);

        self.hbs
            .render_template(&template, context)
            .map(|rendered| rendered.trim().to_string())
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// The shared system instruction
    pub fn system_instruction(&self, context: &PromptContext) -> Result<String> {
        self.render("system", context)
    }
}
