//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer. Output is byte-for-byte
//! reproducible unless a creation date is configured.

use super::content_stream::ContentStreamBuilder;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Dict, Object, ObjectRef};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Value for `/CreationDate`; omitted when `None`
    pub creation_date: Option<DateTime<Utc>>,
    /// Whether to compress streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            creator: Some(concat!("resume_export ", env!("CARGO_PKG_VERSION")).to_string()),
            creation_date: None,
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set or clear the creator application.
    pub fn with_creator(mut self, creator: Option<String>) -> Self {
        self.creator = creator;
        self
    }

    /// Stamp the document with a creation date.
    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams are compressed using FlateDecode
    /// (zlib/deflate) to reduce file size.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
///
/// Returns compressed bytes suitable for FlateDecode filter.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Format a date as a PDF date string (PDF spec 7.9.4).
pub fn pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Add text with its baseline at `(x, y)` in PDF user space.
    ///
    /// `font_name` is a base-14 font name; the writer assigns it a resource
    /// name the first time it is used.
    pub fn add_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_name: &str,
        font_size: f32,
    ) -> &mut Self {
        let resource = self.writer.font_resource(font_name);
        let page = &mut self.writer.pages[self.page_index];
        page.content_builder
            .begin_text()
            .set_font(&resource, font_size)
            .text(text, x, y);
        self
    }

    /// Finish building this page and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        let page = &mut self.writer.pages[self.page_index];
        page.content_builder.end_text();
        self.writer
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, fonts, and content.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    /// Base font name -> resource name, in first-use order
    fonts: IndexMap<String, String>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            fonts: IndexMap::new(),
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Add a US Letter sized page (8.5" x 11").
    pub fn add_letter_page(&mut self) -> PageBuilder<'_> {
        self.add_page(612.0, 792.0)
    }

    /// Resource name (`F1`, `F2`, ...) for a base font.
    fn font_resource(&mut self, font_name: &str) -> String {
        if let Some(resource) = self.fonts.get(font_name) {
            return resource.clone();
        }
        let resource = format!("F{}", self.fonts.len() + 1);
        self.fonts.insert(font_name.to_string(), resource.clone());
        resource
    }

    fn info_dict(&self) -> Object {
        let mut entries = Vec::new();
        if let Some(title) = &self.config.title {
            entries.push(("Title", ObjectSerializer::text_string(title)));
        }
        if let Some(author) = &self.config.author {
            entries.push(("Author", ObjectSerializer::text_string(author)));
        }
        if let Some(creator) = &self.config.creator {
            entries.push(("Creator", ObjectSerializer::text_string(creator)));
        }
        entries.push(("Producer", ObjectSerializer::text_string("resume_export")));
        if let Some(date) = &self.config.creation_date {
            entries.push(("CreationDate", ObjectSerializer::text_string(&pdf_date(date))));
        }
        ObjectSerializer::dict(entries)
    }

    /// Build the complete PDF document.
    ///
    /// Objects are numbered catalog, page tree, fonts, then one page and
    /// content stream pair per page, and finally the info dictionary.
    pub fn finish(self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut objects: Vec<Object> = Vec::new();

        let catalog_ref = ObjectRef::new(1, 0);
        let pages_ref = ObjectRef::new(2, 0);
        let first_font_id = 3;
        let first_page_id = first_font_id + self.fonts.len() as u32;
        let info_ref = ObjectRef::new(first_page_id + 2 * self.pages.len() as u32, 0);

        let font_resources: Dict = self
            .fonts
            .values()
            .enumerate()
            .map(|(i, resource)| {
                let font_ref = ObjectRef::new(first_font_id + i as u32, 0);
                (resource.clone(), ObjectSerializer::reference(font_ref))
            })
            .collect();

        let page_refs: Vec<Object> = (0..self.pages.len())
            .map(|i| ObjectSerializer::reference(ObjectRef::new(first_page_id + 2 * i as u32, 0)))
            .collect();

        objects.push(ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_ref)),
        ]));
        objects.push(ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", ObjectSerializer::array(page_refs)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]));

        for base_font in self.fonts.keys() {
            objects.push(ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(base_font)),
                ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
            ]));
        }

        for (i, page_data) in self.pages.iter().enumerate() {
            let content_ref = ObjectRef::new(first_page_id + 2 * i as u32 + 1, 0);

            let raw_content = page_data.content_builder.build()?;
            let mut content_dict = Dict::new();
            let content_bytes = if self.config.compress {
                content_dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                compress_data(&raw_content)?
            } else {
                raw_content
            };

            objects.push(ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_ref)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(0.0, 0.0, page_data.width as f64, page_data.height as f64),
                ),
                ("Contents", ObjectSerializer::reference(content_ref)),
                (
                    "Resources",
                    ObjectSerializer::dict(vec![("Font", Object::Dictionary(font_resources.clone()))]),
                ),
            ]));
            objects.push(Object::Stream {
                dict: content_dict,
                data: bytes::Bytes::from(content_bytes),
            });
        }

        objects.push(self.info_dict());

        let mut output = Vec::new();
        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut xref_offsets = Vec::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            xref_offsets.push(output.len());
            serializer.write_indirect(&mut output, i as u32 + 1, 0, obj)?;
        }

        let size = objects.len() as i64 + 1;
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size)),
            ("Root", ObjectSerializer::reference(catalog_ref)),
            ("Info", ObjectSerializer::reference(info_ref)),
        ]);

        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "wrote PDF: {} page(s), {} font(s), {} bytes",
            self.pages.len(),
            self.fonts.len(),
            output.len()
        );
        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
