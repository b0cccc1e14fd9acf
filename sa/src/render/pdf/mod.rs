//! PDF output
//!
//! A minimal PDF 1.4 producer built on the standard Type1 fonts, enough for
//! the Statement of Work layout: cells, wrapped paragraphs, bordered tables,
//! shaded bars, running header and footer.

pub mod document;
pub mod fonts;
mod sow;
pub mod writer;

pub use sow::PdfRenderer;
