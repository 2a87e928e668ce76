// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Resume Export
//!
//! Dual-format export engine for structured resumes.
//!
//! ## Core Features
//!
//! - **PDF**: a measured, paginated layout drawn with the base-14 fonts,
//!   written as a deterministic PDF 1.7 file
//! - **LaTeX**: a standalone `article` document with every field escaped
//! - **Shared ordering**: both outputs walk the same section sequence
//!   (summary, skills, experience, projects, education)
//! - **Best-effort text**: characters a font cannot encode are replaced and
//!   reported as warnings instead of failing the export
//!
//! ## Architecture
//!
//! ```text
//! ResumeRecord
//!     ├─→ [LayoutEngine] → PageDrawOps → [RenderBackend] → PDF bytes
//!     └─→ [LatexConverter] → LaTeX source
//! ```
//!
//! The layout engine never touches PDF syntax; it emits draw operations
//! that a [`RenderBackend`](writer::RenderBackend) replays. The backend
//! also owns the glyph metrics used for wrapping.
//!
//! ## Quick Start
//!
//! ```
//! use resume_export::{export, ExportFormat, ResumeRecord};
//!
//! # fn main() -> resume_export::Result<()> {
//! let resume = ResumeRecord::from_json(r#"{
//!     "name": "Ada Lovelace",
//!     "contact": "ada@example.com",
//!     "skills": ["Analysis", "Notation"]
//! }"#)?;
//!
//! let pdf = export(&resume, ExportFormat::Pdf)?;
//! assert_eq!(pdf.filename, "Ada_Lovelace_Resume.pdf");
//!
//! let latex = export(&resume, ExportFormat::Latex)?;
//! assert!(latex.text().unwrap().contains(r"\section*{TECHNICAL SKILLS}"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Input model
pub mod resume;

// Configuration
pub mod config;

// Character encoding
pub mod fonts;

// Paginated layout
pub mod layout;

// PDF object model and writing
pub mod object;
pub mod writer;

// Markup output
pub mod converters;

// Export coordination
pub mod export;
pub mod warning;

// Re-exports
pub use config::ExportConfig;
pub use converters::{render_markup, LatexConverter, LatexOptions};
pub use error::{Error, Result};
pub use export::{export, suggested_filename, Artifact, ArtifactContent, ExportFormat, Exporter};
pub use layout::{render_pages, DrawOp, LayoutEngine, PageDrawOps, PageGeometry, PageSize};
pub use resume::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord, Section};
pub use warning::ExportWarning;
pub use writer::{FontFamily, PdfBackend, RenderBackend};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
