//! WinAnsi encoding for base-14 font text.
//!
//! WinAnsiEncoding (PDF spec Annex D.2) is Windows-1252: Latin-1 plus a
//! block of typographic characters in 0x80-0x9F. Anything outside that set
//! cannot be shown by a simple base-14 font and is replaced by
//! [`SUBSTITUTE_CHAR`].

/// Replacement for characters the encoding cannot represent.
pub const SUBSTITUTE_CHAR: char = '?';

/// WinAnsi (Windows-1252) encoding table.
///
/// Maps Unicode codepoints to WinAnsi byte values for the range 0x80-0x9F
/// which differs from Latin-1.
pub fn unicode_to_winansi(codepoint: u32) -> Option<u8> {
    // Direct mapping for 0x00-0x7F and 0xA0-0xFF
    if codepoint < 0x80 || (0xA0..=0xFF).contains(&codepoint) {
        return Some(codepoint as u8);
    }

    match codepoint {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation mark
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation mark
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// Check if a character can be shown with a WinAnsi base-14 font.
///
/// Control characters map to a byte but have no glyph, so they count as
/// unrepresentable.
pub fn is_winansi_char(ch: char) -> bool {
    !ch.is_control() && unicode_to_winansi(ch as u32).is_some()
}

/// Encode text to WinAnsi bytes.
///
/// Unrepresentable characters become [`SUBSTITUTE_CHAR`]. Returns the bytes
/// and the number of substitutions made.
pub fn encode_winansi(text: &str) -> (Vec<u8>, usize) {
    let mut bytes = Vec::with_capacity(text.len());
    let mut substituted = 0;

    for ch in text.chars() {
        match unicode_to_winansi(ch as u32).filter(|_| !ch.is_control()) {
            Some(byte) => bytes.push(byte),
            None => {
                bytes.push(SUBSTITUTE_CHAR as u8);
                substituted += 1;
            },
        }
    }

    (bytes, substituted)
}
