//! Mutable layout state threaded through block placement.
//!
//! A fresh [`LayoutContext`] is created per render, so two renders never
//! share a cursor.

use super::draw_ops::{DrawOp, PageDrawOps, TextOp};
use super::geometry::PageGeometry;
use super::measure::TextMeasure;
use crate::warning::ExportWarning;
use crate::writer::font_manager::FontWeight;
use indexmap::IndexMap;
use std::borrow::Cow;

/// Position and font state of the running layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    /// Baseline of the next line, points from the top of the page
    pub y: f32,
    /// Active font size
    pub font_size: f32,
    /// Active weight
    pub weight: FontWeight,
    /// Zero-based index of the current page
    pub page_index: usize,
}

impl LayoutCursor {
    /// Cursor at the top margin of the first page.
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            y: geometry.top(),
            font_size: 10.0,
            weight: FontWeight::Normal,
            page_index: 0,
        }
    }

    /// Move down by `dy` points.
    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Whether the next line would fall past the bottom margin.
    pub fn past_bottom(&self, geometry: &PageGeometry) -> bool {
        self.y > geometry.bottom()
    }
}

/// Cursor plus everything emitted so far.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    /// Current position and font
    pub cursor: LayoutCursor,
    geometry: PageGeometry,
    ops: Vec<DrawOp>,
    substitutions: IndexMap<char, usize>,
    replacement: char,
}

impl LayoutContext {
    /// Start a layout on `geometry`; `replacement` stands in for
    /// unencodable characters.
    pub fn new(geometry: PageGeometry, replacement: char) -> Self {
        Self {
            cursor: LayoutCursor::new(&geometry),
            geometry,
            ops: Vec::new(),
            substitutions: IndexMap::new(),
            replacement,
        }
    }

    /// Geometry this context lays out against.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Set the active font.
    pub fn set_font(&mut self, size: f32, weight: FontWeight) {
        self.cursor.font_size = size;
        self.cursor.weight = weight;
    }

    /// Begin a new page and return the cursor to the top margin.
    pub fn break_page(&mut self) {
        self.cursor.page_index += 1;
        self.cursor.y = self.geometry.top();
        self.ops.push(DrawOp::PageBreak {
            page_index: self.cursor.page_index,
        });
        log::debug!("page {} started", self.cursor.page_index + 1);
    }

    /// Break the page if the cursor has run past the bottom margin.
    pub fn ensure_room(&mut self) {
        if self.cursor.past_bottom(&self.geometry) {
            self.break_page();
        }
    }

    /// Record a text run at the cursor's baseline.
    pub fn push_text(&mut self, text: String, x: f32, font: &str, width: f32) {
        self.ops.push(DrawOp::Text(TextOp {
            page_index: self.cursor.page_index,
            text,
            x,
            y: self.cursor.y,
            font: font.to_string(),
            size: self.cursor.font_size,
            width,
        }));
    }

    /// Replace characters `measure` cannot encode, counting each one.
    ///
    /// Whitespace the backend cannot draw becomes a plain space and is not
    /// counted; line feeds are kept for the wrapper.
    pub fn substitute<'t, M: TextMeasure + ?Sized>(
        &mut self,
        measure: &M,
        text: &'t str,
    ) -> Cow<'t, str> {
        let drawable = |ch: char| ch == '\n' || measure.can_encode(ch);
        if text.chars().all(drawable) {
            return Cow::Borrowed(text);
        }

        let replaced = text
            .chars()
            .map(|ch| {
                if drawable(ch) {
                    ch
                } else if ch.is_whitespace() {
                    ' '
                } else {
                    *self.substitutions.entry(ch).or_insert(0) += 1;
                    self.replacement
                }
            })
            .collect();
        Cow::Owned(replaced)
    }

    /// Ops emitted so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Close the layout, turning substitution counts into warnings.
    pub fn finish(self) -> PageDrawOps {
        let replacement = self.replacement;
        let warnings = self
            .substitutions
            .into_iter()
            .map(|(character, occurrences)| {
                log::warn!(
                    "substituted {:?} for {:?} ({} occurrence(s))",
                    replacement,
                    character,
                    occurrences
                );
                ExportWarning::Substituted {
                    character,
                    replacement,
                    occurrences,
                }
            })
            .collect();

        PageDrawOps {
            geometry: self.geometry,
            ops: self.ops,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AsciiOnly;

    impl TextMeasure for AsciiOnly {
        fn measure_text_width(&self, text: &str, _font: &str, size: f32) -> f32 {
            text.len() as f32 * size
        }

        fn can_encode(&self, ch: char) -> bool {
            ch.is_ascii() && !ch.is_control()
        }
    }

    #[test]
    fn test_cursor_starts_at_top_margin() {
        let geometry = PageGeometry::letter();
        let cursor = LayoutCursor::new(&geometry);
        assert_eq!(cursor.y, geometry.margin);
        assert_eq!(cursor.page_index, 0);
        assert!(!cursor.past_bottom(&geometry));
    }

    #[test]
    fn test_break_page_resets_cursor() {
        let geometry = PageGeometry::letter();
        let mut ctx = LayoutContext::new(geometry, '?');
        ctx.cursor.advance(1000.0);
        assert!(ctx.cursor.past_bottom(&geometry));

        ctx.ensure_room();
        assert_eq!(ctx.cursor.page_index, 1);
        assert_eq!(ctx.cursor.y, geometry.top());
        assert_eq!(ctx.ops(), &[DrawOp::PageBreak { page_index: 1 }]);

        ctx.ensure_room();
        assert_eq!(ctx.ops().len(), 1);
    }

    #[test]
    fn test_substitute_borrows_clean_text() {
        let mut ctx = LayoutContext::new(PageGeometry::letter(), '?');
        assert!(matches!(ctx.substitute(&AsciiOnly, "plain text"), Cow::Borrowed(_)));
        assert!(ctx.finish().warnings.is_empty());
    }

    #[test]
    fn test_substitute_counts_per_character() {
        let mut ctx = LayoutContext::new(PageGeometry::letter(), '?');
        let out = ctx.substitute(&AsciiOnly, "caf\u{e9} \u{e9}t\u{e9} \u{4E2D}").into_owned();
        assert_eq!(out, "caf? ?t? ?");

        let warnings = ctx.finish().warnings;
        assert_eq!(
            warnings,
            vec![
                ExportWarning::Substituted {
                    character: '\u{e9}',
                    replacement: '?',
                    occurrences: 3,
                },
                ExportWarning::Substituted {
                    character: '\u{4E2D}',
                    replacement: '?',
                    occurrences: 1,
                },
            ]
        );
    }

    #[test]
    fn test_substitute_undrawable_whitespace() {
        let mut ctx = LayoutContext::new(PageGeometry::letter(), '?');
        let out = ctx
            .substitute(&AsciiOnly, "2019\t-\u{2003}2021\nnext")
            .into_owned();
        assert_eq!(out, "2019 - 2021\nnext");
        assert!(ctx.finish().warnings.is_empty());
    }
}
