//! Word-compatible HTML rendering

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::{ExportOptions, RenderError, SowFields};
use crate::draft::{Architecture, Stakeholder, TimelineEntry};

const TEMPLATE_NAME: &str = "sow";
const TEMPLATE: &str = include_str!("../../templates/sow.html.hbs");

#[derive(Serialize)]
struct MarkupContext<'a> {
    solution_type: &'a str,
    customer: &'a str,
    date: String,
    objective: &'a str,
    stakeholders: &'a [Stakeholder],
    dependencies: Vec<&'a str>,
    assumptions: Vec<&'a str>,
    success_criteria_html: String,
    timeline: &'a [TimelineEntry],
    architecture: &'a Architecture,
    ownership: &'static str,
    usage_users: u64,
    usage_requests: u64,
}

/// Renders the styled single-file document
pub struct MarkupRenderer {
    hbs: Handlebars<'static>,
}

impl MarkupRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut hbs = Handlebars::new();
        hbs.register_template_string(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| RenderError::Template(e.to_string()))?;
        Ok(Self { hbs })
    }

    /// Render the document; every user-supplied value is HTML-escaped
    pub fn render(&self, fields: &SowFields, options: &ExportOptions) -> Result<String, RenderError> {
        debug!(customer = %fields.customer, "MarkupRenderer::render: called");
        let context = MarkupContext {
            solution_type: &fields.solution_type,
            customer: &fields.customer,
            date: options.date_string(),
            objective: &fields.objective,
            stakeholders: &fields.stakeholders,
            dependencies: fields.dependency_items(),
            assumptions: fields.assumption_items(),
            success_criteria_html: handlebars::html_escape(&fields.success_criteria).replace('\n', "<br>"),
            timeline: &fields.timeline,
            architecture: &fields.architecture,
            ownership: fields.ownership.label(),
            usage_users: fields.usage_users,
            usage_requests: fields.usage_requests,
        };

        self.hbs
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| RenderError::Template(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CostOwnership;
    use chrono::NaiveDate;

    fn options() -> ExportOptions {
        ExportOptions::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    fn fields() -> SowFields {
        SowFields {
            solution_type: "Document Processing (IDP)".to_string(),
            customer: "Acme Global".to_string(),
            objective: "Extract invoice data.".to_string(),
            stakeholders: vec![Stakeholder::new("Dana Reyes", "CFO", "dana@acme.example")],
            dependencies: "Scanned invoices\n\n  \nERP access".to_string(),
            assumptions: "Sample set available".to_string(),
            success_criteria: "**Results**\n- 95% accuracy\n\n".to_string(),
            timeline: vec![TimelineEntry::new("Build", "Extraction pipeline", "3")],
            ownership: CostOwnership::FundedByPartner,
            usage_users: 40,
            usage_requests: 12,
            ..Default::default()
        }
    }

    #[test]
    fn test_sections_in_order() {
        let html = MarkupRenderer::new().unwrap().render(&fields(), &options()).unwrap();

        let order = [
            "<h1>Statement of Work: Document Processing (IDP)</h1>",
            "<strong>Customer:</strong> Acme Global",
            "<strong>Date:</strong> 2026-03-02",
            "<p>Extract invoice data.</p>",
            "<tr><td>Dana Reyes</td><td>CFO</td><td>dana@acme.example</td></tr>",
            "<h4>Dependencies</h4>",
            "<h4>Assumptions</h4>",
            "1.4 PoC SUCCESS CRITERIA",
            "<tr><td>Build</td><td>Extraction pipeline</td><td>3</td></tr>",
            "<strong>Compute:</strong> AWS Lambda, Step Functions",
            "<strong>Ownership:</strong> Funded by Partner",
            "<strong>Estimates:</strong> 40 users, 12 requests/day",
        ];
        let mut cursor = 0;
        for needle in order {
            let at = html[cursor..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {}", needle));
            cursor += at + needle.len();
        }
    }

    #[test]
    fn test_blank_lines_do_not_become_bullets() {
        let html = MarkupRenderer::new().unwrap().render(&fields(), &options()).unwrap();
        assert!(html.contains("<ul><li>Scanned invoices</li><li>ERP access</li></ul>"));
        assert!(html.contains("<ul><li>Sample set available</li></ul>"));
    }

    #[test]
    fn test_success_criteria_newlines_become_breaks() {
        let html = MarkupRenderer::new().unwrap().render(&fields(), &options()).unwrap();
        assert!(html.contains("**Results**<br>- 95% accuracy<br><br>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut f = fields();
        f.objective = "<script>alert(1)</script> & more".to_string();
        f.stakeholders = vec![Stakeholder::new("R&D <Lead>", "T", "e")];
        f.success_criteria = "**A < B**".to_string();
        let html = MarkupRenderer::new().unwrap().render(&f, &options()).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("R&amp;D &lt;Lead&gt;"));
        assert!(html.contains("**A &lt; B**"));
    }

    #[test]
    fn test_long_title_kept_intact() {
        let mut f = fields();
        f.stakeholders = vec![Stakeholder::new("Dana", "T".repeat(50), "e")];
        let html = MarkupRenderer::new().unwrap().render(&f, &options()).unwrap();
        assert!(html.contains(&format!("<td>{}</td>", "T".repeat(50))));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = MarkupRenderer::new().unwrap();
        let a = renderer.render(&fields(), &options()).unwrap();
        let b = renderer.render(&fields(), &options()).unwrap();
        assert_eq!(a, b);
    }
}
