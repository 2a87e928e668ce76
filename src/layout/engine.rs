//! Paginated layout of a resume.
//!
//! The engine walks [`ResumeRecord::sections`] and turns each section into
//! wrapped, positioned lines on a virtual page. Pages break at line
//! granularity: a block may start on one page and finish on the next.

use super::cursor::LayoutContext;
use super::draw_ops::PageDrawOps;
use super::geometry::{MM, PageGeometry};
use super::measure::{TextMeasure, wrap_text};
use crate::resume::{ExperienceEntry, ProjectEntry, ResumeRecord, Section};
use crate::writer::font_manager::{FontFamily, FontManager, FontWeight};
use serde::{Deserialize, Serialize};

/// Line height per point of font size (0.5mm).
pub const LINE_HEIGHT_FACTOR: f32 = 0.5 * MM;

/// Glyph prefixed to every bullet line.
pub const BULLET_PREFIX: &str = "\u{2022} ";

/// Separator between joined skills.
pub const SKILL_SEPARATOR: &str = " \u{2022} ";

/// Font sizes and vertical spacing, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutStyle {
    /// Candidate name
    pub name_size: f32,
    /// Contact line
    pub contact_size: f32,
    /// Section headings
    pub heading_size: f32,
    /// Paragraphs, skills, entry headers, education
    pub body_size: f32,
    /// Bullet lines
    pub bullet_size: f32,
    /// Gap after every block
    pub block_gap: f32,
    /// Extra gap after the summary and skills sections
    pub section_gap: f32,
    /// Advance from the name to the contact line
    pub name_advance: f32,
    /// Advance from the contact line to the first section
    pub header_advance: f32,
    /// Extra gap after each experience or project entry
    pub entry_gap: f32,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            name_size: 16.0,
            contact_size: 10.0,
            heading_size: 12.0,
            body_size: 10.0,
            bullet_size: 9.0,
            block_gap: 3.0 * MM,
            section_gap: 5.0 * MM,
            name_advance: 8.0 * MM,
            header_advance: 10.0 * MM,
            entry_gap: 3.0 * MM,
        }
    }
}

/// Lays resumes out as draw ops.
///
/// The engine itself is immutable; all per-render state lives in a
/// [`LayoutContext`], so one engine can serve concurrent renders.
#[derive(Debug, Clone)]
pub struct LayoutEngine<M: TextMeasure = FontManager> {
    measure: M,
    geometry: PageGeometry,
    family: FontFamily,
    style: LayoutStyle,
}

impl LayoutEngine<FontManager> {
    /// Engine measuring with the base-14 font metrics.
    pub fn new(geometry: PageGeometry) -> Self {
        Self::with_measure(FontManager::new(), geometry)
    }
}

impl Default for LayoutEngine<FontManager> {
    fn default() -> Self {
        Self::new(PageGeometry::default())
    }
}

impl<M: TextMeasure> LayoutEngine<M> {
    /// Engine measuring with a custom backend.
    pub fn with_measure(measure: M, geometry: PageGeometry) -> Self {
        Self {
            measure,
            geometry,
            family: FontFamily::default(),
            style: LayoutStyle::default(),
        }
    }

    /// Use `family` for every line.
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    /// Override sizes and spacing.
    pub fn with_style(mut self, style: LayoutStyle) -> Self {
        self.style = style;
        self
    }

    /// Page geometry in use.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Sizes and spacing in use.
    pub fn style(&self) -> &LayoutStyle {
        &self.style
    }

    /// Measurement backend.
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Fresh per-render state at the top of page one.
    pub fn new_context(&self) -> LayoutContext {
        LayoutContext::new(self.geometry, self.measure.replacement_char())
    }

    /// Lay out a whole resume.
    pub fn render_pages(&self, resume: &ResumeRecord) -> PageDrawOps {
        let style = self.style;
        let mut ctx = self.new_context();

        self.place_centered(&mut ctx, &resume.name, style.name_size, FontWeight::Bold);
        ctx.cursor.advance(style.name_advance);
        self.place_centered(&mut ctx, &resume.contact, style.contact_size, FontWeight::Normal);
        ctx.cursor.advance(style.header_advance);

        for section in resume.sections() {
            log::debug!("laying out {} at y={:.1}", section.heading(), ctx.cursor.y);
            self.place_block(&mut ctx, section.heading(), style.heading_size, FontWeight::Bold);

            match section {
                Section::Summary(summary) => {
                    self.place_block(&mut ctx, summary, style.body_size, FontWeight::Normal);
                    ctx.cursor.advance(style.section_gap);
                },
                Section::Skills(skills) => {
                    let joined = skills.join(SKILL_SEPARATOR);
                    self.place_block(&mut ctx, &joined, style.body_size, FontWeight::Normal);
                    ctx.cursor.advance(style.section_gap);
                },
                Section::Experience(entries) => {
                    for entry in entries {
                        self.place_experience(&mut ctx, entry);
                    }
                },
                Section::Projects(entries) => {
                    for entry in entries {
                        self.place_project(&mut ctx, entry);
                    }
                },
                Section::Education(entries) => {
                    for entry in entries {
                        self.place_block(
                            &mut ctx,
                            &entry.display_line(),
                            style.body_size,
                            FontWeight::Normal,
                        );
                    }
                },
            }
        }

        let layout = ctx.finish();
        log::debug!(
            "laid out {} text runs on {} page(s)",
            layout.text_ops().count(),
            layout.page_count()
        );
        layout
    }

    fn place_experience(&self, ctx: &mut LayoutContext, entry: &ExperienceEntry) {
        let left = format!("{} \u{2014} {}", entry.company, entry.title);
        self.place_columns(ctx, &left, &entry.duration, self.style.body_size);
        self.place_bullets(ctx, &entry.bullets);
        ctx.cursor.advance(self.style.entry_gap);
    }

    fn place_project(&self, ctx: &mut LayoutContext, entry: &ProjectEntry) {
        let header = if entry.technologies.is_empty() {
            entry.name.clone()
        } else {
            format!("{} | {}", entry.name, entry.technologies.join(", "))
        };
        self.place_block(ctx, &header, self.style.body_size, FontWeight::Bold);
        self.place_bullets(ctx, &entry.bullets);
        ctx.cursor.advance(self.style.entry_gap);
    }

    fn place_bullets(&self, ctx: &mut LayoutContext, bullets: &[String]) {
        for bullet in bullets {
            let line = format!("{}{}", BULLET_PREFIX, bullet);
            self.place_block(ctx, &line, self.style.bullet_size, FontWeight::Normal);
        }
    }

    fn font_name(&self, weight: FontWeight) -> &'static str {
        FontManager::select_font(self.family, weight)
    }

    fn line_height(size: f32) -> f32 {
        size * LINE_HEIGHT_FACTOR
    }

    /// Place wrapped text at the left margin, then advance by the block gap.
    ///
    /// Breaks the page before any line whose baseline would fall past the
    /// bottom margin.
    pub fn place_block(&self, ctx: &mut LayoutContext, text: &str, size: f32, weight: FontWeight) {
        ctx.set_font(size, weight);
        let font = self.font_name(weight);
        let text = ctx.substitute(&self.measure, text).into_owned();

        for line in wrap_text(&self.measure, &text, font, size, self.geometry.text_width()) {
            ctx.ensure_room();
            if !line.is_empty() {
                let width = self.measure.measure_text_width(&line, font, size);
                ctx.push_text(line, self.geometry.margin, font, width);
            }
            ctx.cursor.advance(Self::line_height(size));
        }

        ctx.cursor.advance(self.style.block_gap);
    }

    /// Place wrapped text centered between the margins.
    ///
    /// Does not advance the cursor; the caller decides the spacing.
    pub fn place_centered(&self, ctx: &mut LayoutContext, text: &str, size: f32, weight: FontWeight) {
        ctx.set_font(size, weight);
        let font = self.font_name(weight);
        let text = ctx.substitute(&self.measure, text).into_owned();
        let lines = wrap_text(&self.measure, &text, font, size, self.geometry.text_width());
        let count = lines.len();

        for (i, line) in lines.into_iter().enumerate() {
            ctx.ensure_room();
            if !line.is_empty() {
                let width = self.measure.measure_text_width(&line, font, size);
                let x = self.geometry.margin + (self.geometry.text_width() - width) / 2.0;
                ctx.push_text(line, x, font, width);
            }
            if i + 1 < count {
                ctx.cursor.advance(Self::line_height(size));
            }
        }
    }

    /// Place a bold left column with a regular right-aligned column.
    ///
    /// The left text wraps in the space the right text leaves free; the
    /// right text sits on the first line. Each line advances the cursor by
    /// one line height.
    pub fn place_columns(&self, ctx: &mut LayoutContext, left: &str, right: &str, size: f32) {
        let bold = self.font_name(FontWeight::Bold);
        let regular = self.font_name(FontWeight::Normal);
        let left = ctx.substitute(&self.measure, left).into_owned();
        // The right column is never wrapped on the shared line, so collapse
        // its whitespace the way the wrapper would.
        let right = right.split_whitespace().collect::<Vec<_>>().join(" ");
        let right = ctx.substitute(&self.measure, &right).into_owned();

        let text_width = self.geometry.text_width();
        let right_width = self.measure.measure_text_width(&right, regular, size);
        let gutter = self.measure.measure_text_width("  ", regular, size);
        let mut left_width = text_width - right_width - gutter;
        let mut right_on_own_line = false;
        if left_width < text_width / 3.0 {
            // Duration too long to share a line; give it its own.
            left_width = text_width;
            right_on_own_line = true;
        }

        ctx.set_font(size, FontWeight::Bold);
        for (i, line) in wrap_text(&self.measure, &left, bold, size, left_width)
            .into_iter()
            .enumerate()
        {
            ctx.ensure_room();
            if !line.is_empty() {
                let width = self.measure.measure_text_width(&line, bold, size);
                ctx.push_text(line, self.geometry.margin, bold, width);
            }
            if i == 0 && !right_on_own_line && !right.is_empty() {
                ctx.set_font(size, FontWeight::Normal);
                ctx.push_text(right.clone(), self.geometry.right() - right_width, regular, right_width);
                ctx.set_font(size, FontWeight::Bold);
            }
            ctx.cursor.advance(Self::line_height(size));
        }

        if right_on_own_line && !right.is_empty() {
            ctx.set_font(size, FontWeight::Normal);
            for line in wrap_text(&self.measure, &right, regular, size, text_width) {
                ctx.ensure_room();
                let width = self.measure.measure_text_width(&line, regular, size);
                ctx.push_text(line, self.geometry.right() - width, regular, width);
                ctx.cursor.advance(Self::line_height(size));
            }
        }
    }
}

/// Lay out `resume` on `page` with the base-14 Helvetica metrics.
pub fn render_pages(resume: &ResumeRecord, page: PageGeometry) -> PageDrawOps {
    LayoutEngine::new(page).render_pages(resume)
}
