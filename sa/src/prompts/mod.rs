//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files, one per generation phase
//! plus the shared system instruction.
//!
//! Template loading chain:
//! 1. `.sowarchitect/prompts/{name}.pmt` (local override)
//! 2. `{prompts.dir}/{name}.pmt` (configured override)
//! 3. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{PromptContext, PromptLoader};
