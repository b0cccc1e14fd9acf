//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Shared system instruction for every phase
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

pub const OBJECTIVE: &str = include_str!("../../prompts/objective.pmt");

pub const STAKEHOLDERS: &str = include_str!("../../prompts/stakeholders.pmt");

pub const DEPENDENCIES: &str = include_str!("../../prompts/dependencies.pmt");

pub const SUCCESS_CRITERIA: &str = include_str!("../../prompts/success-criteria.pmt");

pub const ARCHITECTURE: &str = include_str!("../../prompts/architecture.pmt");

pub const TIMELINE: &str = include_str!("../../prompts/timeline.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "system" => Some(SYSTEM),
        "objective" => Some(OBJECTIVE),
        "stakeholders" => Some(STAKEHOLDERS),
        "dependencies" => Some(DEPENDENCIES),
        "success-criteria" => Some(SUCCESS_CRITERIA),
        "architecture" => Some(ARCHITECTURE),
        "timeline" => Some(TIMELINE),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
