//! Document assembly
//!
//! Turns a finalized [`SowFields`] set into downloadable artifacts:
//!
//! - [`MarkupRenderer`] - styled HTML that word processors open as `.doc`
//! - [`PaginatedRenderer`] - optional fixed-layout output (`.pdf`), available
//!   when the crate is built with the `pdf` feature
//!
//! Both are pure: the same fields and options always give the same bytes.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

mod fields;
mod markup;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod text;

pub use fields::{SowFields, bullet_lines, success_criteria_text};
pub use markup::MarkupRenderer;
#[cfg(feature = "pdf")]
pub use pdf::PdfRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("Paginated export is not available in this build")]
    Unavailable,

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Doc,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Doc => "doc",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Doc => "application/msword",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Options that are not part of the field set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub date: NaiveDate,
}

impl ExportOptions {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Options dated with the local calendar day
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// File name stem for a customer
///
/// Whitespace, path separators and characters invalid in file names become
/// underscores, and `..` never survives, so the name stays inside its directory.
pub fn file_stem(customer: &str) -> String {
    let mut stem: String = customer
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect();
    while stem.contains("..") {
        stem = stem.replace("..", "_");
    }
    format!("{}_SOW", stem)
}

/// A rendered document ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(format: ExportFormat, customer: &str, bytes: Vec<u8>) -> Self {
        Self {
            format,
            file_name: format!("{}.{}", file_stem(customer), format.extension()),
            mime_type: format.mime_type(),
            bytes,
        }
    }

    /// Write into `dir`, returning the full path
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Fixed-layout rendering capability
pub trait PaginatedRenderer: Send + Sync {
    /// Whether this build can produce paginated output at all
    fn is_available(&self) -> bool;

    fn render(&self, fields: &SowFields, options: &ExportOptions) -> Result<Vec<u8>, RenderError>;
}

/// Stand-in used when the `pdf` feature is off
#[derive(Debug, Default)]
pub struct UnavailableRenderer;

impl PaginatedRenderer for UnavailableRenderer {
    fn is_available(&self) -> bool {
        false
    }

    fn render(&self, _fields: &SowFields, _options: &ExportOptions) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Unavailable)
    }
}

/// The paginated renderer this build provides
pub fn paginated_renderer() -> Box<dyn PaginatedRenderer> {
    #[cfg(feature = "pdf")]
    {
        Box::new(PdfRenderer::new())
    }
    #[cfg(not(feature = "pdf"))]
    {
        Box::new(UnavailableRenderer)
    }
}

/// A format that could not be produced
#[derive(Debug)]
pub struct ExportFailure {
    pub format: ExportFormat,
    pub error: RenderError,
}

/// Outcome of a multi-format export
#[derive(Debug, Default)]
pub struct ExportReport {
    pub artifacts: Vec<Artifact>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn artifact(&self, format: ExportFormat) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.format == format)
    }
}

/// Renders a field set into every requested format
pub struct DocumentAssembler {
    markup: MarkupRenderer,
    paginated: Box<dyn PaginatedRenderer>,
}

impl DocumentAssembler {
    /// Assembler using this build's paginated renderer
    pub fn new() -> Result<Self, RenderError> {
        Self::with_paginated(paginated_renderer())
    }

    pub fn with_paginated(paginated: Box<dyn PaginatedRenderer>) -> Result<Self, RenderError> {
        Ok(Self {
            markup: MarkupRenderer::new()?,
            paginated,
        })
    }

    pub fn paginated_available(&self) -> bool {
        self.paginated.is_available()
    }

    /// Render a single format
    pub fn render(
        &self,
        format: ExportFormat,
        fields: &SowFields,
        options: &ExportOptions,
    ) -> Result<Artifact, RenderError> {
        debug!(%format, "DocumentAssembler::render: called");
        let bytes = match format {
            ExportFormat::Doc => self.markup.render(fields, options)?.into_bytes(),
            ExportFormat::Pdf => self.paginated.render(fields, options)?,
        };
        Ok(Artifact::new(format, &fields.customer, bytes))
    }

    /// Render every requested format; one failing never blocks the others
    pub fn export(&self, formats: &[ExportFormat], fields: &SowFields, options: &ExportOptions) -> ExportReport {
        debug!(?formats, "DocumentAssembler::export: called");
        let mut report = ExportReport::default();
        for format in formats {
            match self.render(*format, fields, options) {
                Ok(artifact) => {
                    info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "Rendered artifact");
                    report.artifacts.push(artifact);
                }
                Err(error) => {
                    warn!(%format, %error, "Export failed");
                    report.failures.push(ExportFailure { format: *format, error });
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenRenderer;

    impl PaginatedRenderer for BrokenRenderer {
        fn is_available(&self) -> bool {
            true
        }

        fn render(&self, _fields: &SowFields, _options: &ExportOptions) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::Pdf("font table missing".to_string()))
        }
    }

    fn fields() -> SowFields {
        SowFields {
            customer: "Acme Global Ltd".to_string(),
            ..Default::default()
        }
    }

    fn options() -> ExportOptions {
        ExportOptions::new(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
    }

    #[test]
    fn test_artifact_names_and_types() {
        let doc = Artifact::new(ExportFormat::Doc, "Acme Global Ltd", vec![]);
        assert_eq!(doc.file_name, "Acme_Global_Ltd_SOW.doc");
        assert_eq!(doc.mime_type, "application/msword");

        let pdf = Artifact::new(ExportFormat::Pdf, "Acme", vec![]);
        assert_eq!(pdf.file_name, "Acme_SOW.pdf");
        assert_eq!(pdf.mime_type, "application/pdf");
    }

    #[test]
    fn test_unavailable_paginated_does_not_block_doc() {
        let assembler = DocumentAssembler::with_paginated(Box::new(UnavailableRenderer)).unwrap();
        assert!(!assembler.paginated_available());

        let report = assembler.export(&[ExportFormat::Doc, ExportFormat::Pdf], &fields(), &options());

        assert_eq!(report.artifacts.len(), 1);
        assert!(report.artifact(ExportFormat::Doc).is_some());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].format, ExportFormat::Pdf);
        assert!(matches!(report.failures[0].error, RenderError::Unavailable));
    }

    #[test]
    fn test_paginated_failure_is_reported_per_artifact() {
        let assembler = DocumentAssembler::with_paginated(Box::new(BrokenRenderer)).unwrap();
        let report = assembler.export(&[ExportFormat::Pdf, ExportFormat::Doc], &fields(), &options());

        assert!(report.artifact(ExportFormat::Doc).is_some());
        assert!(report.artifact(ExportFormat::Pdf).is_none());
        assert!(matches!(report.failures[0].error, RenderError::Pdf(_)));
    }

    #[test]
    fn test_export_twice_is_identical() {
        let assembler = DocumentAssembler::new().unwrap();
        let formats = [ExportFormat::Doc, ExportFormat::Pdf];
        let first = assembler.export(&formats, &fields(), &options());
        let second = assembler.export(&formats, &fields(), &options());
        assert_eq!(first.artifacts, second.artifacts);
        assert_eq!(first.failures.len(), second.failures.len());
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_default_build_exports_pdf() {
        let assembler = DocumentAssembler::new().unwrap();
        assert!(assembler.paginated_available());
        let report = assembler.export(&[ExportFormat::Pdf], &fields(), &options());
        let pdf = report.artifact(ExportFormat::Pdf).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF-1.4"));
        assert!(pdf.bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_file_stem_strips_path_characters() {
        assert_eq!(file_stem("Acme Global"), "Acme_Global_SOW");
        assert_eq!(file_stem("../escaped"), "__escaped_SOW");
        assert_eq!(file_stem("Acme/EMEA"), "Acme_EMEA_SOW");
        assert_eq!(file_stem("a\\b:c*d"), "a_b_c_d_SOW");
        assert_eq!(file_stem("...."), "___SOW");
        assert_eq!(file_stem("Acme Inc."), "Acme_Inc._SOW");
    }

    #[test]
    fn test_write_to_stays_in_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();

        let artifact = Artifact::new(ExportFormat::Doc, "../escaped", b"x".to_vec());
        let path = artifact.write_to(&out).unwrap();

        assert_eq!(path.parent(), Some(out.as_path()));
        assert!(path.exists());
        assert!(!dir.path().join("escaped_SOW.doc").exists());
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact = Artifact::new(ExportFormat::Doc, "Acme", b"<html></html>".to_vec());
        let path = artifact.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("Acme_SOW.doc"));
        assert_eq!(std::fs::read(path).unwrap(), b"<html></html>");
    }

    #[test]
    fn test_format_serde_and_display() {
        let formats: Vec<ExportFormat> = serde_yaml::from_str("[doc, pdf]").unwrap();
        assert_eq!(formats, vec![ExportFormat::Doc, ExportFormat::Pdf]);
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }
}
