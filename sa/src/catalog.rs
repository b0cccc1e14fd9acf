//! Selection lists offered when describing a solution

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Marker entry that asks for a free-text value instead
pub const OTHER: &str = "Other";

pub const SOLUTION_TYPES: &[&str] = &[
    "Multi Agent Store Advisor",
    "Intelligent Search",
    "Recommendation",
    "AI Agents Demand Forecasting",
    "Banner Audit using LLM",
    "Image Enhancement",
    "Virtual Try-On",
    "Agentic AI L1 Support",
    "Product Listing Standardization",
    "AI Agents Based Pricing Module",
    "Cost, Margin Visibility & Insights using LLM",
    "AI Trend Simulator",
    "Virtual Data Analyst (Text to SQL)",
    "Multilingual Call Analysis",
    "Customer Review Analysis",
    "Sales Co-Pilot",
    "Research Co-Pilot",
    "Product Copy Generator",
    "Multi-agent e-KYC & Onboarding",
    "Document / Report Audit",
    "RBI Circular Scraping & Insights Bot",
    "Visual Inspection",
    "AIoT based CCTV Surveillance",
    "Multilingual Voice Bot",
    "SOP Creation",
    OTHER,
];

pub const INDUSTRIES: &[&str] = &[
    "Retail / E-commerce",
    "BFSI",
    "Manufacturing",
    "Telecom",
    "Healthcare",
    "Energy / Utilities",
    "Logistics",
    "Media",
    "Government",
    OTHER,
];

pub const ENGAGEMENT_TYPES: &[&str] = &[
    "Proof of Concept (PoC)",
    "Pilot",
    "MVP",
    "Production Rollout",
    "Assessment / Discovery",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("'{field}' is set to Other but no custom value was given")]
    MissingCustomValue { field: &'static str },

    #[error("'{field}' must not be empty")]
    Empty { field: &'static str },
}

/// Turn a selection (plus optional free text for "Other") into the value to use
///
/// Values missing from `options` are accepted as custom entries.
pub fn resolve_choice(
    field: &'static str,
    options: &[&str],
    selected: &str,
    other: Option<&str>,
) -> Result<String, CatalogError> {
    debug!(%field, %selected, "resolve_choice: called");
    let selected = selected.trim();
    if selected.is_empty() {
        return Err(CatalogError::Empty { field });
    }

    if selected.eq_ignore_ascii_case(OTHER) {
        return other
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or(CatalogError::MissingCustomValue { field });
    }

    match options.iter().find(|o| o.eq_ignore_ascii_case(selected)) {
        Some(known) => Ok(known.to_string()),
        None => {
            warn!(%field, value = %selected, "resolve_choice: not in catalog, using as custom value");
            Ok(selected.to_string())
        }
    }
}

/// Who pays for the engagement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CostOwnership {
    #[default]
    FundedByAws,
    FundedByPartner,
    FundedByCustomer,
    Shared,
}

impl CostOwnership {
    pub const ALL: [CostOwnership; 4] = [
        CostOwnership::FundedByAws,
        CostOwnership::FundedByPartner,
        CostOwnership::FundedByCustomer,
        CostOwnership::Shared,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostOwnership::FundedByAws => "Funded by AWS",
            CostOwnership::FundedByPartner => "Funded by Partner",
            CostOwnership::FundedByCustomer => "Funded by Customer",
            CostOwnership::Shared => "Shared",
        }
    }
}

impl fmt::Display for CostOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes() {
        assert_eq!(SOLUTION_TYPES.len(), 26);
        assert_eq!(SOLUTION_TYPES.last(), Some(&OTHER));
        assert_eq!(INDUSTRIES.len(), 10);
        assert_eq!(INDUSTRIES.last(), Some(&OTHER));
        assert_eq!(ENGAGEMENT_TYPES[0], "Proof of Concept (PoC)");
    }

    #[test]
    fn test_resolve_known_choice_normalizes_case() {
        let got = resolve_choice("industry", INDUSTRIES, "bfsi", None).unwrap();
        assert_eq!(got, "BFSI");
    }

    #[test]
    fn test_resolve_other_requires_text() {
        assert_eq!(
            resolve_choice("solution type", SOLUTION_TYPES, "Other", None),
            Err(CatalogError::MissingCustomValue { field: "solution type" })
        );
        assert_eq!(
            resolve_choice("solution type", SOLUTION_TYPES, "Other", Some("  ")),
            Err(CatalogError::MissingCustomValue { field: "solution type" })
        );
        assert_eq!(
            resolve_choice("solution type", SOLUTION_TYPES, "other", Some("Fraud Scoring")).unwrap(),
            "Fraud Scoring"
        );
    }

    #[test]
    fn test_resolve_unknown_is_custom() {
        let got = resolve_choice("industry", INDUSTRIES, "Aerospace", None).unwrap();
        assert_eq!(got, "Aerospace");
    }

    #[test]
    fn test_resolve_empty_rejected() {
        assert_eq!(
            resolve_choice("industry", INDUSTRIES, "   ", None),
            Err(CatalogError::Empty { field: "industry" })
        );
    }

    #[test]
    fn test_cost_ownership_labels_and_serde() {
        assert_eq!(CostOwnership::default().to_string(), "Funded by AWS");
        assert_eq!(CostOwnership::Shared.label(), "Shared");
        let parsed: CostOwnership = serde_yaml::from_str("funded-by-customer").unwrap();
        assert_eq!(parsed, CostOwnership::FundedByCustomer);
    }
}
