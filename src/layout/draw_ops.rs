//! Layout output: page boundaries and positioned text.

use super::geometry::PageGeometry;
use crate::warning::ExportWarning;
use serde::Serialize;

/// A single positioned run of text.
///
/// `x` is the left edge of the run and `y` its baseline, measured down from
/// the top of page `page_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOp {
    /// Zero-based page the run is drawn on
    pub page_index: usize,
    /// Text to draw, already limited to encodable characters
    pub text: String,
    /// Left edge in points
    pub x: f32,
    /// Baseline, points from the top edge
    pub y: f32,
    /// Base font name
    pub font: String,
    /// Font size in points
    pub size: f32,
    /// Measured advance width of `text`
    pub width: f32,
}

/// One layout instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Start page `page_index`; everything after belongs to it
    PageBreak {
        /// Index of the new page
        page_index: usize,
    },
    /// Place text
    Text(TextOp),
}

/// Complete layout of one resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDrawOps {
    /// Page the ops were laid out against
    pub geometry: PageGeometry,
    /// Ops in drawing order
    pub ops: Vec<DrawOp>,
    /// Substitutions made while laying out
    pub warnings: Vec<ExportWarning>,
}

impl PageDrawOps {
    /// Number of pages, at least one.
    pub fn page_count(&self) -> usize {
        1 + self.page_breaks()
    }

    /// Number of page-break ops.
    pub fn page_breaks(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::PageBreak { .. }))
            .count()
    }

    /// All text ops in drawing order.
    pub fn text_ops(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            DrawOp::PageBreak { .. } => None,
        })
    }

    /// Text ops grouped by page; empty pages yield empty groups.
    pub fn pages(&self) -> Vec<Vec<&TextOp>> {
        let mut pages = vec![Vec::new(); self.page_count()];
        for op in self.text_ops() {
            if let Some(page) = pages.get_mut(op.page_index) {
                page.push(op);
            }
        }
        pages
    }

    /// Plain text of every run, one per line, in drawing order.
    pub fn plain_text(&self) -> String {
        self.text_ops()
            .map(|op| op.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
