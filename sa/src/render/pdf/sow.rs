//! Statement of Work page layout

use tracing::debug;

use super::document::{Align, Next, PageDecorator, PdfDocument};
use super::fonts::Font;
use crate::render::text::truncate_chars;
use crate::render::{ExportOptions, PaginatedRenderer, RenderError, SowFields};

const HEADER_TITLE: &str = "Statement of Work (SOW)";

const STAKEHOLDER_COLUMNS: [f64; 3] = [60.0, 60.0, 60.0];
const STAKEHOLDER_CELL_CHARS: usize = 35;

const TIMELINE_COLUMNS: [f64; 3] = [30.0, 130.0, 20.0];
const TIMELINE_CELL_CHARS: [usize; 3] = [15, 70, 5];

const ROW_HEIGHT: f64 = 7.0;

struct SowDecorator;

impl PageDecorator for SowDecorator {
    fn header(&self, doc: &mut PdfDocument) {
        doc.set_font(Font::HelveticaBold, 15.0);
        doc.cell(0.0, 10.0, HEADER_TITLE, false, Next::NewLine, Align::Center, false);
        doc.ln(Some(10.0));
    }

    fn footer(&self, doc: &mut PdfDocument) {
        doc.set_y(-15.0);
        doc.set_font(Font::HelveticaOblique, 8.0);
        let label = format!("Page {}", doc.page_no());
        doc.cell(0.0, 10.0, &label, false, Next::Right, Align::Center, false);
    }
}

/// Paginated renderer producing an A4 PDF
#[derive(Debug, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl PaginatedRenderer for PdfRenderer {
    fn is_available(&self) -> bool {
        true
    }

    fn render(&self, fields: &SowFields, _options: &ExportOptions) -> Result<Vec<u8>, RenderError> {
        debug!(customer = %fields.customer, "PdfRenderer::render: called");
        let mut doc = PdfDocument::new(format!("Statement of Work: {}", fields.solution_type));
        doc.set_decorator(Box::new(SowDecorator));
        doc.add_page();

        section_bar(&mut doc, "1. PROJECT OVERVIEW");
        subheading(&mut doc, 11.0, 8.0, "1.1 OBJECTIVE");
        doc.set_font(Font::Helvetica, 10.0);
        doc.multi_cell(0.0, 5.0, &fields.objective);
        doc.ln(Some(5.0));

        subheading(&mut doc, 11.0, 8.0, "1.2 STAKEHOLDERS");
        table_row(&mut doc, Font::HelveticaBold, &STAKEHOLDER_COLUMNS, &["Name", "Title", "Contact/Email"]);
        for s in &fields.stakeholders {
            let cells = [
                truncate_chars(&s.name, STAKEHOLDER_CELL_CHARS),
                truncate_chars(&s.title, STAKEHOLDER_CELL_CHARS),
                truncate_chars(&s.email, STAKEHOLDER_CELL_CHARS),
            ];
            table_row(&mut doc, Font::Helvetica, &STAKEHOLDER_COLUMNS, &cells);
        }
        doc.ln(Some(5.0));

        section_bar(&mut doc, "2. SCOPE OF WORK");
        subheading(&mut doc, 10.0, 6.0, "2.1 ARCHITECTURE");
        doc.set_font(Font::Helvetica, 10.0);
        let arch = &fields.architecture;
        let summary = format!(
            "Compute: {}\nStorage: {}\nML: {}\nUI: {}",
            arch.compute, arch.storage, arch.ml_services, arch.ui
        );
        doc.multi_cell(0.0, 5.0, &summary);
        doc.ln(Some(5.0));

        subheading(&mut doc, 10.0, 6.0, "2.2 TIMELINES");
        table_row(&mut doc, Font::HelveticaBold, &TIMELINE_COLUMNS, &["Phase", "Task", "Wks"]);
        for entry in &fields.timeline {
            let cells = [
                truncate_chars(&entry.phase, TIMELINE_CELL_CHARS[0]),
                truncate_chars(&entry.task, TIMELINE_CELL_CHARS[1]),
                truncate_chars(&entry.weeks, TIMELINE_CELL_CHARS[2]),
            ];
            table_row(&mut doc, Font::Helvetica, &TIMELINE_COLUMNS, &cells);
        }

        Ok(doc.finish())
    }
}

/// Full-width shaded section title
fn section_bar(doc: &mut PdfDocument, title: &str) {
    doc.set_font(Font::HelveticaBold, 12.0);
    doc.set_fill_gray(230);
    doc.cell(0.0, 10.0, title, false, Next::NewLine, Align::Left, true);
    doc.ln(Some(4.0));
}

fn subheading(doc: &mut PdfDocument, size_pt: f64, h: f64, title: &str) {
    doc.set_font(Font::HelveticaBold, size_pt);
    doc.cell(0.0, h, title, false, Next::NewLine, Align::Left, false);
}

/// Bordered cells across the given columns, then a new line
fn table_row(doc: &mut PdfDocument, font: Font, columns: &[f64], cells: &[&str]) {
    doc.set_font(font, 9.0);
    let last = columns.len().saturating_sub(1);
    for (i, (width, text)) in columns.iter().zip(cells).enumerate() {
        let next = if i == last { Next::NewLine } else { Next::Right };
        doc.cell(*width, ROW_HEIGHT, text, true, next, Align::Left, false);
    }
}
