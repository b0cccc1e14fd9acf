//! PDF 1.4 serialization
//!
//! Fixed object layout: 1 catalog, 2 page tree, 3-5 fonts, 6 shared
//! resources, 7 info, then a page object and its content stream per page.
//! Nothing time-dependent is written, so equal input gives equal bytes.

use super::document::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM, SCALE};
use super::fonts::Font;
use crate::render::text;

const FIRST_PAGE_OBJECT: usize = 8;

/// Escape a byte string for a literal `( )` string
pub fn escape_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\r' => out.push_str("\\r"),
            // Latin-1 bytes map to the same code points
            b => out.push(*b as char),
        }
    }
    out
}

struct ObjectWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl ObjectWriter {
    fn new() -> Self {
        let mut buf = b"%PDF-1.4\n".to_vec();
        buf.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, body: &[u8]) {
        self.offsets.push(self.buf.len());
        let number = self.offsets.len();
        self.buf.extend_from_slice(format!("{} 0 obj\n", number).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn text_object(&mut self, body: &str) {
        self.object(&latin1_bytes(body));
    }

    fn stream(&mut self, data: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.object(&body);
    }

    fn finish(mut self) -> Vec<u8> {
        let startxref = self.buf.len();
        let size = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for offset in &self.offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R /Info 7 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, startxref
        ));
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

/// Content streams hold Latin-1 text built as `char`s; write them back as bytes
fn latin1_bytes(s: &str) -> Vec<u8> {
    s.chars().map(|c| c as u32 as u8).collect()
}

/// Serialize a document from its page content streams
pub fn write_document(title: &str, pages: &[String]) -> Vec<u8> {
    let mut writer = ObjectWriter::new();

    writer.text_object("<< /Type /Catalog /Pages 2 0 R >>");

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJECT + 2 * i))
        .collect();
    writer.text_object(&format!(
        "<< /Type /Pages /Kids [{}] /Count {} /MediaBox [0 0 {:.2} {:.2}] >>",
        kids.join(" "),
        pages.len(),
        PAGE_WIDTH_MM * SCALE,
        PAGE_HEIGHT_MM * SCALE
    ));

    for font in Font::ALL {
        writer.text_object(&format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
            font.base_font()
        ));
    }

    let font_refs: Vec<String> = Font::ALL
        .iter()
        .enumerate()
        .map(|(i, f)| format!("/{} {} 0 R", f.resource_name(), 3 + i))
        .collect();
    writer.text_object(&format!(
        "<< /ProcSet [/PDF /Text] /Font << {} >> >>",
        font_refs.join(" ")
    ));

    writer.text_object(&format!(
        "<< /Producer (sowarchitect) /Title ({}) >>",
        escape_string(&text::encode_latin1(title))
    ));

    for (i, content) in pages.iter().enumerate() {
        writer.text_object(&format!(
            "<< /Type /Page /Parent 2 0 R /Resources 6 0 R /Contents {} 0 R >>",
            FIRST_PAGE_OBJECT + 2 * i + 1
        ));
        writer.stream(&latin1_bytes(content));
    }

    writer.finish()
}
