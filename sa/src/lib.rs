//! SOW Architect - Statement of Work drafting and export
//!
//! Drafts a Statement of Work in six schema-constrained generation phases,
//! keeps the result as an editable draft, and renders it as a Word-compatible
//! document and a paginated PDF.
//!
//! # Core Concepts
//!
//! - **Partial progress is kept**: every phase commits on its own, a failed
//!   phase is skipped and defaults fill the gap at export time
//! - **Absence, not errors**: the generation client answers with a value or
//!   nothing; retries and parsing stay inside it
//! - **Pure rendering**: the same fields always produce the same bytes
//!
//! # Modules
//!
//! - [`llm`] - structured generation client for the Gemini endpoint
//! - [`draft`] - draft model and session draft store
//! - [`orchestrator`] - the six generation phases
//! - [`prompts`] - prompt templates with file overrides
//! - [`render`] - document assembly (.doc markup, .pdf)
//! - [`catalog`] - solution, industry, engagement and ownership choices
//! - [`session`] - the YAML session file shared between commands
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod draft;
pub mod llm;
pub mod orchestrator;
pub mod prompts;
pub mod render;
pub mod session;

pub use config::Config;
pub use draft::{DraftStore, SolutionContext, SowDraft};
pub use llm::{GeminiClient, GenerationRequest, LlmError, StructuredGenerator};
pub use orchestrator::{DraftOrchestrator, Phase};
pub use render::{DocumentAssembler, ExportFormat, SowFields};
pub use session::SessionFile;
