//! Millimetre-based page layout
//!
//! A small cursor model: cells are placed at the current position, the cursor
//! moves right or down, and a page break is inserted automatically when a cell
//! would cross the bottom margin. Page content is collected as raw content
//! stream operators and serialized by [`super::writer`].

use tracing::debug;

use super::fonts::Font;
use super::writer;
use crate::render::text;

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Points per millimetre
pub const SCALE: f64 = 72.0 / 25.4;

const MARGIN_MM: f64 = 10.0;
const CELL_MARGIN_MM: f64 = 1.0;
const BREAK_MARGIN_MM: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Where the cursor goes after a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// To the right of the cell
    Right,
    /// Start of the next line
    NewLine,
    /// Directly below the cell
    Below,
}

/// Draws running headers and footers
pub trait PageDecorator {
    fn header(&self, doc: &mut PdfDocument);
    fn footer(&self, doc: &mut PdfDocument);
}

#[derive(Debug, Clone, Copy)]
struct FontState {
    font: Font,
    size_pt: f64,
}

pub struct PdfDocument {
    title: String,
    pages: Vec<String>,
    x: f64,
    y: f64,
    font: FontState,
    fill_gray: u8,
    last_height: f64,
    decorating: bool,
    decorator: Option<Box<dyn PageDecorator>>,
}

impl PdfDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
            x: MARGIN_MM,
            y: MARGIN_MM,
            font: FontState {
                font: Font::Helvetica,
                size_pt: 12.0,
            },
            fill_gray: 255,
            last_height: 0.0,
            decorating: false,
            decorator: None,
        }
    }

    pub fn set_decorator(&mut self, decorator: Box<dyn PageDecorator>) {
        self.decorator = Some(decorator);
    }

    /// Close the current page (footer) and open a new one (header)
    pub fn add_page(&mut self) {
        debug!(page = self.pages.len() + 1, "PdfDocument::add_page: called");
        if !self.pages.is_empty() {
            self.decorate(|d, doc| d.footer(doc));
        }
        self.pages.push(String::new());
        self.x = MARGIN_MM;
        self.y = MARGIN_MM;
        self.decorate(|d, doc| d.header(doc));
    }

    /// Run a decorator callback, keeping the body's font and page breaks intact
    fn decorate(&mut self, draw: impl FnOnce(&dyn PageDecorator, &mut PdfDocument)) {
        if let Some(decorator) = self.decorator.take() {
            let saved = self.font;
            self.decorating = true;
            draw(decorator.as_ref(), self);
            self.decorating = false;
            self.font = saved;
            self.decorator = Some(decorator);
        }
    }

    pub fn page_no(&self) -> usize {
        self.pages.len()
    }

    pub fn set_font(&mut self, font: Font, size_pt: f64) {
        self.font = FontState { font, size_pt };
    }

    /// Fill colour as a gray level, 0 black to 255 white
    pub fn set_fill_gray(&mut self, gray: u8) {
        self.fill_gray = gray;
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Move to `y`; negative values are measured from the bottom edge
    pub fn set_y(&mut self, y: f64) {
        self.x = MARGIN_MM;
        self.y = if y >= 0.0 { y } else { PAGE_HEIGHT_MM + y };
    }

    /// Line break of `h`, or the height of the last cell
    pub fn ln(&mut self, h: Option<f64>) {
        self.x = MARGIN_MM;
        self.y += h.unwrap_or(self.last_height);
    }

    /// Width of `text` in millimetres at the current font
    pub fn string_width(&self, text: &str) -> f64 {
        self.bytes_width(&text::encode_latin1(text))
    }

    fn bytes_width(&self, bytes: &[u8]) -> f64 {
        self.font.font.string_width_pt(bytes, self.font.size_pt) / SCALE
    }

    fn page_break_trigger(&self) -> f64 {
        PAGE_HEIGHT_MM - BREAK_MARGIN_MM
    }

    /// Single-line cell; `w` of 0 extends to the right margin
    #[allow(clippy::too_many_arguments)]
    pub fn cell(&mut self, w: f64, h: f64, text: &str, border: bool, next: Next, align: Align, fill: bool) {
        let bytes = text::encode_latin1(text);
        self.cell_bytes(w, h, &bytes, border, next, align, fill);
    }

    #[allow(clippy::too_many_arguments)]
    fn cell_bytes(&mut self, w: f64, h: f64, bytes: &[u8], border: bool, next: Next, align: Align, fill: bool) {
        if self.pages.is_empty() {
            self.add_page();
        }
        if !self.decorating && self.y + h > self.page_break_trigger() {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let w = if w <= 0.0 { PAGE_WIDTH_MM - MARGIN_MM - self.x } else { w };
        let mut ops = String::new();

        if fill || border {
            let paint = match (fill, border) {
                (true, true) => "B",
                (true, false) => "f",
                _ => "S",
            };
            let rect = format!(
                "{:.2} {:.2} {:.2} {:.2} re {}",
                self.x * SCALE,
                (PAGE_HEIGHT_MM - self.y) * SCALE,
                w * SCALE,
                -h * SCALE,
                paint
            );
            if fill {
                ops.push_str(&format!("q {:.3} g {} Q\n", self.fill_gray as f64 / 255.0, rect));
            } else {
                ops.push_str(&rect);
                ops.push('\n');
            }
        }

        if !bytes.is_empty() {
            let dx = match align {
                Align::Left => CELL_MARGIN_MM,
                Align::Center => (w - self.bytes_width(bytes)) / 2.0,
            };
            let size_mm = self.font.size_pt / SCALE;
            ops.push_str(&format!(
                "BT /{} {:.2} Tf {:.2} {:.2} Td ({}) Tj ET\n",
                self.font.font.resource_name(),
                self.font.size_pt,
                (self.x + dx) * SCALE,
                (PAGE_HEIGHT_MM - (self.y + 0.5 * h + 0.3 * size_mm)) * SCALE,
                writer::escape_string(bytes)
            ));
        }

        if let Some(page) = self.pages.last_mut() {
            page.push_str(&ops);
        }

        self.last_height = h;
        match next {
            Next::Right => self.x += w,
            Next::NewLine => {
                self.x = MARGIN_MM;
                self.y += h;
            }
            Next::Below => self.y += h,
        }
    }

    /// Word-wrapped text block; explicit newlines start new lines
    pub fn multi_cell(&mut self, w: f64, h: f64, text: &str) {
        let w = if w <= 0.0 { PAGE_WIDTH_MM - MARGIN_MM - self.x } else { w };
        let max = w - 2.0 * CELL_MARGIN_MM;
        let bytes = text::encode_latin1(text);

        for paragraph in bytes.split(|b| *b == b'\n') {
            for line in self.wrap(paragraph, max) {
                self.cell_bytes(w, h, &line, false, Next::Below, Align::Left, false);
            }
        }
        self.x = MARGIN_MM;
    }

    /// Greedy word wrap; words wider than a line are split by character
    fn wrap(&self, paragraph: &[u8], max: f64) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        let mut line: Vec<u8> = Vec::new();

        for word in paragraph.split(|b| *b == b' ').filter(|w| !w.is_empty()) {
            let mut candidate = line.clone();
            if !candidate.is_empty() {
                candidate.push(b' ');
            }
            candidate.extend_from_slice(word);
            if self.bytes_width(&candidate) <= max {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            for byte in word {
                line.push(*byte);
                if self.bytes_width(&line) > max && line.len() > 1 {
                    let last = line.pop().unwrap_or(b' ');
                    lines.push(std::mem::replace(&mut line, vec![last]));
                }
            }
        }

        if !line.is_empty() || lines.is_empty() {
            lines.push(line);
        }
        lines
    }

    /// Close the last page and serialize the document
    pub fn finish(mut self) -> Vec<u8> {
        debug!(pages = self.pages.len(), "PdfDocument::finish: called");
        if self.pages.is_empty() {
            self.add_page();
        }
        self.decorate(|d, doc| d.footer(doc));
        writer::write_document(&self.title, &self.pages)
    }
}
