//! Paginated layout for the PDF export.
//!
//! This module turns a resume into positioned text on fixed-size pages:
//! - Page geometry and margins ([`PageGeometry`])
//! - Measured word wrapping ([`TextMeasure`], [`wrap_text`])
//! - Per-render cursor state ([`LayoutContext`])
//! - The section walker itself ([`LayoutEngine`])
//!
//! Output is a flat list of [`DrawOp`]s that a rendering backend replays.

pub mod cursor;
pub mod draw_ops;
pub mod engine;
pub mod geometry;
pub mod measure;

// Re-export main types
pub use cursor::{LayoutContext, LayoutCursor};
pub use draw_ops::{DrawOp, PageDrawOps, TextOp};
pub use engine::{
    BULLET_PREFIX, LINE_HEIGHT_FACTOR, LayoutEngine, LayoutStyle, SKILL_SEPARATOR, render_pages,
};
pub use geometry::{DEFAULT_MARGIN, MM, PageGeometry, PageSize};
pub use measure::{TextMeasure, wrap_text};
