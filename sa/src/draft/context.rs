//! The solution being written up

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{self, CatalogError};

/// What the SOW is about; drives prompts and the title block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionContext {
    pub solution_type: String,
    pub industry: String,
    pub customer: String,
    pub engagement: String,
}

impl SolutionContext {
    /// Build a context from catalog selections
    ///
    /// `*_other` carries the free-text value when the selection is "Other".
    pub fn from_selection(
        solution_type: &str,
        solution_type_other: Option<&str>,
        industry: &str,
        industry_other: Option<&str>,
        customer: &str,
        engagement: &str,
    ) -> Result<Self, CatalogError> {
        debug!(%solution_type, %industry, %customer, %engagement, "SolutionContext::from_selection: called");
        let solution_type =
            catalog::resolve_choice("solution type", catalog::SOLUTION_TYPES, solution_type, solution_type_other)?;
        let industry = catalog::resolve_choice("industry", catalog::INDUSTRIES, industry, industry_other)?;
        let engagement = catalog::resolve_choice("engagement", catalog::ENGAGEMENT_TYPES, engagement, None)?;
        let customer = customer.trim();
        if customer.is_empty() {
            return Err(CatalogError::Empty { field: "customer" });
        }

        Ok(Self {
            solution_type,
            industry,
            customer: customer.to_string(),
            engagement,
        })
    }

    /// Stem used for exported file names: spaces become underscores
    pub fn file_stem(&self) -> String {
        crate::render::file_stem(&self.customer)
    }
}
