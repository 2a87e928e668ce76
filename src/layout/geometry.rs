//! Page geometry for pagination decisions.
//!
//! All values are PDF points (1/72 inch). The layout engine measures `y`
//! downward from the top edge; the PDF backend flips it when drawing.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// Default margin on every side (20mm).
pub const DEFAULT_MARGIN: f32 = 20.0 * MM;

/// Standard page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    #[default]
    Letter,
    /// A4 (210mm x 297mm)
    A4,
    /// Legal (8.5" x 14")
    Legal,
    /// Custom dimensions in points
    Custom {
        /// Page width
        width: f32,
        /// Page height
        height: f32,
    },
}

impl PageSize {
    /// Get dimensions in points (1 inch = 72 points).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Fixed virtual page used by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Margin applied to all four sides
    pub margin: f32,
}

impl PageGeometry {
    /// Geometry for a standard page size and margin.
    pub fn new(size: PageSize, margin: f32) -> Self {
        let (width, height) = size.dimensions();
        Self {
            width,
            height,
            margin,
        }
    }

    /// US Letter with the default margin.
    pub fn letter() -> Self {
        Self::new(PageSize::Letter, DEFAULT_MARGIN)
    }

    /// A4 with the default margin.
    pub fn a4() -> Self {
        Self::new(PageSize::A4, DEFAULT_MARGIN)
    }

    /// Usable line width between the left and right margins.
    pub fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// First baseline position on a fresh page.
    pub fn top(&self) -> f32 {
        self.margin
    }

    /// Lowest baseline position allowed on a page.
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Right edge of the text area.
    pub fn right(&self) -> f32 {
        self.width - self.margin
    }

    /// Reject geometries that leave no room for text.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.width, self.height, self.margin]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::Config(format!(
                "page dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.margin < 0.0 {
            return Err(Error::Config(format!("margin must not be negative, got {}", self.margin)));
        }
        if self.text_width() <= 0.0 || self.bottom() <= self.top() {
            return Err(Error::Config(format!(
                "margin {} leaves no text area on a {}x{} page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}
