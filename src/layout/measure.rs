//! Glyph measurement and measured word wrapping.

/// Width measurement supplied by the rendering backend.
///
/// Layout decisions must agree with what the backend will actually draw,
/// so the engine never estimates widths itself.
pub trait TextMeasure {
    /// Width of `text` in points when set in `font` at `size`.
    fn measure_text_width(&self, text: &str, font: &str, size: f32) -> f32;

    /// Whether the backend can draw `ch` without substitution.
    fn can_encode(&self, _ch: char) -> bool {
        true
    }

    /// Character drawn in place of one that cannot be encoded.
    fn replacement_char(&self) -> char {
        crate::fonts::SUBSTITUTE_CHAR
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn measure_text_width(&self, text: &str, font: &str, size: f32) -> f32 {
        (**self).measure_text_width(text, font, size)
    }

    fn can_encode(&self, ch: char) -> bool {
        (**self).can_encode(ch)
    }

    fn replacement_char(&self) -> char {
        (**self).replacement_char()
    }
}

/// Wrap text into lines no wider than `max_width`.
///
/// Explicit newlines start a new line. Runs of whitespace collapse to a
/// single space. A word wider than the line on its own is split between
/// glyphs. Always returns at least one (possibly empty) line.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: &str,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if measure.measure_text_width(&candidate, font, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure.measure_text_width(word, font, size) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(measure, word, font, size, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current);
    }

    lines
}

/// Split a single overlong word into pieces that each fit.
///
/// A lone glyph wider than `max_width` still forms its own piece.
fn break_word<M: TextMeasure + ?Sized>(
    measure: &M,
    word: &str,
    font: &str,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().count() > 1 && measure.measure_text_width(&piece, font, size) > max_width
        {
            piece.pop();
            pieces.push(std::mem::replace(&mut piece, ch.to_string()));
        }
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every glyph is `size` points wide.
    struct SquareGlyphs;

    impl TextMeasure for SquareGlyphs {
        fn measure_text_width(&self, text: &str, _font: &str, size: f32) -> f32 {
            text.chars().count() as f32 * size
        }
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let lines = wrap_text(&SquareGlyphs, "hello world", "F", 1.0, 20.0);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        let lines = wrap_text(&SquareGlyphs, "alpha beta gamma delta", "F", 1.0, 11.0);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        for line in &lines {
            assert!(SquareGlyphs.measure_text_width(line, "F", 1.0) <= 11.0);
        }
    }

    #[test]
    fn test_wrap_uses_font_size() {
        let small = wrap_text(&SquareGlyphs, "aa bb cc dd", "F", 1.0, 12.0);
        let large = wrap_text(&SquareGlyphs, "aa bb cc dd", "F", 3.0, 12.0);
        assert_eq!(small.len(), 1);
        assert_eq!(large, vec!["aa", "bb", "cc", "dd"]);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let lines = wrap_text(&SquareGlyphs, "x abcdefghij", "F", 1.0, 4.0);
        assert_eq!(lines, vec!["x", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_long_word_tail_joins_next_word() {
        let lines = wrap_text(&SquareGlyphs, "abcdef g", "F", 1.0, 4.0);
        assert_eq!(lines, vec!["abcd", "ef g"]);
    }

    #[test]
    fn test_wrap_empty_and_newlines() {
        assert_eq!(wrap_text(&SquareGlyphs, "", "F", 1.0, 10.0), vec![""]);
        assert_eq!(
            wrap_text(&SquareGlyphs, "one\n\ntwo", "F", 1.0, 10.0),
            vec!["one", "", "two"]
        );
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        let lines = wrap_text(&SquareGlyphs, "  a \t  b  ", "F", 1.0, 10.0);
        assert_eq!(lines, vec!["a b"]);
    }

    #[test]
    fn test_default_encoding_hooks() {
        assert!(SquareGlyphs.can_encode('\u{1F680}'));
        assert_eq!(SquareGlyphs.replacement_char(), '?');
    }
}
