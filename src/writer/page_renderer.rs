//! Rendering backends: draw ops in, document bytes out.

use super::font_manager::FontManager;
use super::pdf_writer::{PdfWriter, PdfWriterConfig};
use crate::error::Result;
use crate::layout::{PageDrawOps, TextMeasure};
use crate::resume::ResumeRecord;
use chrono::Utc;

/// Document-level metadata handed to a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Document title
    pub title: String,
    /// Document author
    pub author: String,
}

impl DocumentInfo {
    /// Metadata for a resume: `"<name> Resume"` by `<name>`.
    pub fn for_resume(resume: &ResumeRecord) -> Self {
        let name = resume.name.trim();
        let title = if name.is_empty() {
            "Resume".to_string()
        } else {
            format!("{} Resume", name)
        };
        Self {
            title,
            author: name.to_string(),
        }
    }
}

/// Consumer of a finished layout.
///
/// The backend also supplies the glyph measurement the layout engine wraps
/// with, so that wrapping matches what gets drawn.
pub trait RenderBackend: Send + Sync {
    /// Measurement used by the layout engine.
    type Measure: TextMeasure;

    /// Glyph metrics of this backend.
    fn measure(&self) -> &Self::Measure;

    /// Produce document bytes for `layout`.
    fn render(&self, layout: &PageDrawOps, info: &DocumentInfo) -> Result<Vec<u8>>;
}

/// Backend writing PDF with base-14 fonts.
#[derive(Debug, Clone)]
pub struct PdfBackend {
    fonts: FontManager,
    compress: bool,
    creator: Option<String>,
    timestamp: bool,
}

impl Default for PdfBackend {
    fn default() -> Self {
        Self {
            fonts: FontManager::new(),
            compress: false,
            creator: PdfWriterConfig::default().creator,
            timestamp: false,
        }
    }
}

impl PdfBackend {
    /// Backend with default settings: uncompressed, no timestamp.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compress content streams with FlateDecode.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set or clear the `/Creator` entry.
    pub fn with_creator(mut self, creator: Option<String>) -> Self {
        self.creator = creator;
        self
    }

    /// Stamp `/CreationDate` with the current time.
    ///
    /// Makes the output differ between runs.
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    fn writer_config(&self, info: &DocumentInfo) -> PdfWriterConfig {
        let mut config = PdfWriterConfig::default()
            .with_title(info.title.clone())
            .with_creator(self.creator.clone())
            .with_compress(self.compress);
        if !info.author.is_empty() {
            config = config.with_author(info.author.clone());
        }
        if self.timestamp {
            config = config.with_creation_date(Utc::now());
        }
        config
    }
}

impl RenderBackend for PdfBackend {
    type Measure = FontManager;

    fn measure(&self) -> &FontManager {
        &self.fonts
    }

    fn render(&self, layout: &PageDrawOps, info: &DocumentInfo) -> Result<Vec<u8>> {
        let geometry = layout.geometry;
        geometry.validate()?;
        let mut writer = PdfWriter::with_config(self.writer_config(info));

        for ops in layout.pages() {
            let mut page = writer.add_page(geometry.width, geometry.height);
            for op in ops {
                // Layout measures y down from the top; PDF user space grows up.
                page.add_text(&op.text, op.x, geometry.height - op.y, &op.font, op.size);
            }
            page.finish();
        }

        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DrawOp, PageGeometry, TextOp};

    fn layout(ops: Vec<DrawOp>) -> PageDrawOps {
        PageDrawOps {
            geometry: PageGeometry::letter(),
            ops,
            warnings: Vec::new(),
        }
    }

    fn text(page_index: usize, text: &str, y: f32) -> DrawOp {
        DrawOp::Text(TextOp {
            page_index,
            text: text.to_string(),
            x: 56.693,
            y,
            font: "Helvetica".to_string(),
            size: 10.0,
            width: 20.0,
        })
    }

    fn info() -> DocumentInfo {
        DocumentInfo::for_resume(&ResumeRecord::new("Ada Lovelace", ""))
    }

    #[test]
    fn test_document_info() {
        assert_eq!(info().title, "Ada Lovelace Resume");
        assert_eq!(info().author, "Ada Lovelace");
        assert_eq!(DocumentInfo::for_resume(&ResumeRecord::new("  ", "")).title, "Resume");
    }

    #[test]
    fn test_flips_y_axis() {
        let bytes = PdfBackend::new()
            .render(&layout(vec![text(0, "Top", 100.0)]), &info())
            .unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("1 0 0 1 56.693 692 Tm"));
        assert!(content.contains("(Top) Tj"));
    }

    #[test]
    fn test_one_pdf_page_per_layout_page() {
        let ops = vec![
            text(0, "one", 60.0),
            DrawOp::PageBreak { page_index: 1 },
            text(1, "two", 60.0),
        ];
        let bytes = PdfBackend::new().render(&layout(ops), &info()).unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 2"));
        assert!(content.contains("/Title (Ada Lovelace Resume)"));
        assert!(!content.contains("/CreationDate"));
    }

    #[test]
    fn test_timestamp_adds_creation_date() {
        let backend = PdfBackend::new().with_timestamp(true).with_creator(None);
        let bytes = backend.render(&layout(Vec::new()), &info()).unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/CreationDate (D:"));
        assert!(!content.contains("/Creator"));
    }
}
