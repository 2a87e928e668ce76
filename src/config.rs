//! Configuration for resume export.
//!
//! Defaults give a US Letter page with 20mm margins in Helvetica, an
//! uncompressed PDF without a creation date (so output is reproducible),
//! and plain contact text in LaTeX. A config can also be loaded from TOML:
//!
//! ```toml
//! page_size = "a4"
//! margin = 48.0
//! font_family = "courier"
//! compress = true
//! ```

use crate::error::{Error, Result};
use crate::layout::{DEFAULT_MARGIN, PageGeometry, PageSize};
use crate::writer::font_manager::FontFamily;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resume export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Page size for the PDF layout
    pub page_size: PageSize,

    /// Margin on every side, in points
    pub margin: f32,

    /// Font family for every PDF line
    pub font_family: FontFamily,

    /// Compress PDF content streams.
    pub compress: bool,

    /// `/Creator` entry; `None` omits it.
    pub creator: Option<String>,

    /// Stamp the PDF with the export time.
    pub timestamp: bool,

    /// Turn URLs and emails in the LaTeX contact line into links.
    pub link_contacts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            page_size: PageSize::Letter,
            margin: DEFAULT_MARGIN,
            font_family: FontFamily::Helvetica,
            compress: false,
            creator: Some(concat!("resume_export ", env!("CARGO_PKG_VERSION")).to_string()),
            timestamp: false,
            link_contacts: false,
        }
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the margin in points.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Enable stream compression.
    pub fn with_compress(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    /// Set or clear the creator string.
    pub fn with_creator(mut self, creator: Option<String>) -> Self {
        self.creator = creator;
        self
    }

    /// Enable the creation timestamp.
    pub fn with_timestamp(mut self, enable: bool) -> Self {
        self.timestamp = enable;
        self
    }

    /// Enable contact links in LaTeX output.
    pub fn with_link_contacts(mut self, enable: bool) -> Self {
        self.link_contacts = enable;
        self
    }

    /// Page geometry described by this config.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.page_size, self.margin)
    }

    /// Check that the page leaves room for text.
    pub fn validate(&self) -> Result<()> {
        self.geometry().validate()
    }

    /// Parse and validate a TOML config.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}
