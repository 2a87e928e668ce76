//! Font management for PDF generation.
//!
//! This module provides font metrics for the base-14 fonts the export
//! engine draws with. Widths are the Adobe AFM advance widths, indexed by
//! WinAnsi code, so layout measures exactly what a viewer will render.

use crate::fonts::encoding::{is_winansi_char, unicode_to_winansi};
use crate::layout::TextMeasure;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Font family classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Helvetica (sans-serif)
    #[default]
    Helvetica,
    /// Courier (monospace)
    Courier,
}

/// Font weight classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Information about a font.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// Base font name (e.g., "Helvetica-Bold")
    pub name: String,
    /// Character widths in 1/1000 em
    widths: FontWidths,
}

impl FontInfo {
    /// Create a base-14 font info.
    fn base14(name: &str) -> Self {
        let widths = match name {
            "Helvetica" => FontWidths::Table(&HELVETICA_WIDTHS),
            "Helvetica-Bold" => FontWidths::Table(&HELVETICA_BOLD_WIDTHS),
            // Both Courier weights share one advance width
            _ => FontWidths::Monospace(600.0),
        };

        Self {
            name: name.to_string(),
            widths,
        }
    }

    /// Calculate the width of text in this font.
    ///
    /// Returns width in points for the given font size.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let width_units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        width_units * font_size / 1000.0
    }

    /// Get the width of a single character in font units (1/1000 of em).
    pub fn char_width(&self, ch: char) -> f32 {
        self.widths.width_for_char(ch)
    }
}

/// Font width data.
#[derive(Debug, Clone)]
enum FontWidths {
    /// Proportional widths for WinAnsi codes 32..=255
    Table(&'static [u16; 224]),
    /// Monospace font with fixed width
    Monospace(f32),
}

impl FontWidths {
    fn width_for_char(&self, ch: char) -> f32 {
        match self {
            FontWidths::Table(table) => unicode_to_winansi(ch as u32)
                .filter(|code| *code >= 32)
                .map(|code| table[(code - 32) as usize] as f32)
                .filter(|w| *w > 0.0)
                // Unmapped glyphs are drawn as the substitute '?'
                .unwrap_or(table[(b'?' - 32) as usize] as f32),
            FontWidths::Monospace(width) => *width,
        }
    }
}

/// Font manager for PDF generation.
///
/// Holds the base-14 fonts the exporter can draw with and answers width
/// queries for layout.
#[derive(Debug, Clone)]
pub struct FontManager {
    /// Registered fonts (name -> font info)
    fonts: HashMap<String, FontInfo>,
    /// Used when a lookup names an unregistered font
    fallback: FontInfo,
}

impl FontManager {
    /// Create a new font manager with the supported base-14 fonts.
    pub fn new() -> Self {
        let fallback = FontInfo::base14("Helvetica");
        let mut manager = Self {
            fonts: HashMap::new(),
            fallback,
        };

        for family in [FontFamily::Helvetica, FontFamily::Courier] {
            for weight in [FontWeight::Normal, FontWeight::Bold] {
                manager.register_font(FontInfo::base14(Self::select_font(family, weight)));
            }
        }
        manager
    }

    fn register_font(&mut self, font: FontInfo) {
        self.fonts.insert(font.name.clone(), font);
    }

    /// Get font info, falling back to Helvetica if not found.
    pub fn get_font_or_default(&self, name: &str) -> &FontInfo {
        self.fonts.get(name).unwrap_or(&self.fallback)
    }

    /// Calculate the width of a string in the given font at the given size.
    ///
    /// Returns width in points.
    pub fn text_width(&self, text: &str, font_name: &str, font_size: f32) -> f32 {
        self.get_font_or_default(font_name).text_width(text, font_size)
    }

    /// Calculate the width of a single character in points.
    pub fn char_width(&self, ch: char, font_name: &str, font_size: f32) -> f32 {
        self.get_font_or_default(font_name).char_width(ch) * font_size / 1000.0
    }

    /// Get all registered font names, sorted.
    pub fn font_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Base font name for a family and weight.
    pub fn select_font(family: FontFamily, weight: FontWeight) -> &'static str {
        match (family, weight) {
            (FontFamily::Helvetica, FontWeight::Normal) => "Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold) => "Helvetica-Bold",
            (FontFamily::Courier, FontWeight::Normal) => "Courier",
            (FontFamily::Courier, FontWeight::Bold) => "Courier-Bold",
        }
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for FontManager {
    fn measure_text_width(&self, text: &str, font: &str, size: f32) -> f32 {
        self.text_width(text, font, size)
    }

    fn can_encode(&self, ch: char) -> bool {
        is_winansi_char(ch)
    }
}

// Adobe AFM advance widths, WinAnsi codes 32..=255. Zero marks codes with
// no glyph in WinAnsiEncoding.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 224] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];
