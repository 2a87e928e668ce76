//! PDF writing module for rendering laid-out resumes.
//!
//! ## Architecture
//!
//! ```text
//! PageDrawOps
//!     ↓
//! [PdfBackend] (RenderBackend: one PDF page per layout page)
//!     ↓
//! [ContentStreamBuilder] (text ops → content stream bytes)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Low-Level API (PdfWriter)
//!
//! ```
//! use resume_export::writer::PdfWriter;
//!
//! let mut writer = PdfWriter::new();
//! let mut page = writer.add_letter_page();
//! page.add_text("Hello, World!", 72.0, 720.0, "Helvetica", 12.0);
//! page.finish();
//! let bytes = writer.finish().unwrap();
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! ```

mod content_stream;
pub mod font_manager;
mod object_serializer;
mod page_renderer;
mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{FontFamily, FontInfo, FontManager, FontWeight};
pub use object_serializer::ObjectSerializer;
pub use page_renderer::{DocumentInfo, PdfBackend, RenderBackend};
pub use pdf_writer::{pdf_date, PageBuilder, PdfWriter, PdfWriterConfig};
