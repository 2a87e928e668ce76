//! Export coordinator: pick a renderer, produce an artifact.

use crate::config::ExportConfig;
use crate::converters::{LatexConverter, LatexOptions};
use crate::error::{Error, Result};
use crate::layout::{LayoutEngine, PageDrawOps};
use crate::resume::ResumeRecord;
use crate::warning::ExportWarning;
use crate::writer::{DocumentInfo, PdfBackend, RenderBackend};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

lazy_static! {
    /// Runs of whitespace in a name
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Characters not allowed in file names on common platforms
    static ref RE_UNSAFE_FILENAME: Regex = Regex::new(r#"[/\\:*?"<>|\x00-\x1F]"#).unwrap();
}

/// Output format selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Paginated visual document (PDF)
    Pdf,
    /// Markup source (LaTeX)
    Latex,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Latex => "tex",
        }
    }

    /// MIME type of the artifact.
    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Latex => "application/x-tex",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Latex => write!(f, "latex"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" | "visual" => Ok(ExportFormat::Pdf),
            "latex" | "tex" | "markup" => Ok(ExportFormat::Latex),
            other => Err(Error::Config(format!("unknown export format '{}'", other))),
        }
    }
}

/// Artifact payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactContent {
    /// Binary document
    Binary(Vec<u8>),
    /// Text document
    Text(String),
}

/// A finished export, ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// Document content
    pub content: ArtifactContent,
    /// Suggested file name, including the extension
    pub filename: String,
    /// Format the artifact was rendered in
    pub format: ExportFormat,
    /// Best-effort adjustments made while rendering
    pub warnings: Vec<ExportWarning>,
}

impl Artifact {
    /// Raw bytes of the document.
    pub fn bytes(&self) -> &[u8] {
        match &self.content {
            ArtifactContent::Binary(bytes) => bytes,
            ArtifactContent::Text(text) => text.as_bytes(),
        }
    }

    /// Text content, for text artifacts.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ArtifactContent::Text(text) => Some(text),
            ArtifactContent::Binary(_) => None,
        }
    }

    /// MIME type of the document.
    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }

    /// Write the artifact into `dir` under its suggested name.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, self.bytes())?;
        log::info!("saved {} ({} bytes)", path.display(), self.bytes().len());
        Ok(path)
    }
}

/// File name for a resume export.
///
/// The name is trimmed, whitespace runs become `_`, and characters unsafe
/// in file names are replaced before `_Resume.<ext>` is appended. A blank
/// name yields `Resume.<ext>`.
pub fn suggested_filename(name: &str, format: ExportFormat) -> String {
    let stem = RE_WHITESPACE.replace_all(name.trim(), "_");
    let stem = RE_UNSAFE_FILENAME.replace_all(&stem, "_");
    if stem.is_empty() {
        format!("Resume.{}", format.extension())
    } else {
        format!("{}_Resume.{}", stem, format.extension())
    }
}

/// Renders resumes in either format.
///
/// Holds no per-export state; one exporter can serve many threads.
#[derive(Debug, Clone)]
pub struct Exporter<B: RenderBackend = PdfBackend> {
    config: ExportConfig,
    backend: B,
}

impl Default for Exporter<PdfBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter<PdfBackend> {
    /// Exporter with the default config and PDF backend.
    pub fn new() -> Self {
        Self::with_config(ExportConfig::default())
    }

    /// Exporter with a PDF backend configured from `config`.
    pub fn with_config(config: ExportConfig) -> Self {
        let backend = PdfBackend::new()
            .with_compress(config.compress)
            .with_creator(config.creator.clone())
            .with_timestamp(config.timestamp);
        Self { config, backend }
    }
}

impl<B: RenderBackend> Exporter<B> {
    /// Exporter with a custom rendering backend.
    pub fn with_backend(config: ExportConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Active configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Rendering backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Lay out `resume` without rendering it.
    pub fn layout(&self, resume: &ResumeRecord) -> Result<PageDrawOps> {
        self.config.validate()?;
        let engine = LayoutEngine::with_measure(self.backend.measure(), self.config.geometry())
            .with_family(self.config.font_family);
        Ok(engine.render_pages(resume))
    }

    /// Export `resume` in `format`.
    pub fn export(&self, resume: &ResumeRecord, format: ExportFormat) -> Result<Artifact> {
        let filename = suggested_filename(&resume.name, format);

        let (content, warnings) = match format {
            ExportFormat::Pdf => {
                let layout = self.layout(resume)?;
                let bytes = self
                    .backend
                    .render(&layout, &DocumentInfo::for_resume(resume))?;
                if bytes.is_empty() {
                    return Err(Error::Render("backend produced an empty document".to_string()));
                }
                log::debug!("{} page(s) rendered for {}", layout.page_count(), filename);
                (ArtifactContent::Binary(bytes), layout.warnings)
            },
            ExportFormat::Latex => {
                let converter = LatexConverter::with_options(LatexOptions {
                    link_contacts: self.config.link_contacts,
                });
                (ArtifactContent::Text(converter.convert(resume)), Vec::new())
            },
        };

        let artifact = Artifact {
            content,
            filename,
            format,
            warnings,
        };
        log::info!(
            "exported {} ({} bytes, {} warning(s))",
            artifact.filename,
            artifact.bytes().len(),
            artifact.warnings.len()
        );
        Ok(artifact)
    }
}

/// Export `resume` in `format` with default settings.
pub fn export(resume: &ResumeRecord, format: ExportFormat) -> Result<Artifact> {
    Exporter::new().export(resume, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename() {
        assert_eq!(
            suggested_filename("Ada Lovelace", ExportFormat::Pdf),
            "Ada_Lovelace_Resume.pdf"
        );
        assert_eq!(
            suggested_filename("Grace  Brewster\tHopper", ExportFormat::Latex),
            "Grace_Brewster_Hopper_Resume.tex"
        );
        assert_eq!(suggested_filename("  ", ExportFormat::Pdf), "Resume.pdf");
        assert_eq!(suggested_filename("../etc/passwd", ExportFormat::Pdf), ".._etc_passwd_Resume.pdf");
        assert_eq!(suggested_filename("José Núñez", ExportFormat::Pdf), "José_Núñez_Resume.pdf");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("markup".parse::<ExportFormat>().unwrap(), ExportFormat::Latex);
        assert!(matches!("docx".parse::<ExportFormat>(), Err(Error::Config(_))));
        assert_eq!(ExportFormat::Latex.to_string(), "latex");
        assert_eq!(ExportFormat::Latex.extension(), "tex");
    }

    #[test]
    fn test_latex_artifact() {
        let resume = ResumeRecord::new("Ada Lovelace", "ada@example.com");
        let artifact = export(&resume, ExportFormat::Latex).unwrap();
        assert_eq!(artifact.filename, "Ada_Lovelace_Resume.tex");
        assert_eq!(artifact.media_type(), "application/x-tex");
        assert!(artifact.text().unwrap().starts_with("\\documentclass"));
        assert!(artifact.warnings.is_empty());
    }

    #[test]
    fn test_pdf_artifact() {
        let resume = ResumeRecord::new("Ada Lovelace", "ada@example.com");
        let artifact = export(&resume, ExportFormat::Pdf).unwrap();
        assert_eq!(artifact.filename, "Ada_Lovelace_Resume.pdf");
        assert!(artifact.bytes().starts_with(b"%PDF-"));
        assert!(artifact.text().is_none());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let exporter = Exporter::with_config(ExportConfig::new().with_margin(1000.0));
        let resume = ResumeRecord::new("Ada", "");
        assert!(matches!(
            exporter.export(&resume, ExportFormat::Pdf),
            Err(Error::Config(_))
        ));
        // LaTeX output has no page geometry to validate
        assert!(exporter.export(&resume, ExportFormat::Latex).is_ok());
    }

    #[test]
    fn test_save_to() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = export(&ResumeRecord::new("Ada", ""), ExportFormat::Latex).unwrap();
        let path = artifact.save_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "Ada_Resume.tex");
        assert_eq!(std::fs::read(path).unwrap(), artifact.bytes());
    }

    #[test]
    fn test_exporter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Exporter>();
    }
}
