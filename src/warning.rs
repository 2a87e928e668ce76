//! Non-fatal conditions reported alongside an artifact.

use serde::Serialize;
use std::fmt;

/// A best-effort adjustment made while exporting.
///
/// Warnings never stop an export; they tell the caller what the artifact
/// shows differently from the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportWarning {
    /// A character the backend cannot encode was drawn as `replacement`
    Substituted {
        /// Original character
        character: char,
        /// Character drawn instead
        replacement: char,
        /// Number of occurrences replaced
        occurrences: usize,
    },
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportWarning::Substituted {
                character,
                replacement,
                occurrences,
            } => write!(
                f,
                "character {:?} (U+{:04X}) cannot be encoded; drew {:?} in its place {} time(s)",
                character, *character as u32, replacement, occurrences
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_codepoint() {
        let warning = ExportWarning::Substituted {
            character: '\u{4E2D}',
            replacement: '?',
            occurrences: 2,
        };
        let msg = warning.to_string();
        assert!(msg.contains("U+4E2D"));
        assert!(msg.contains("2 time(s)"));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let warning = ExportWarning::Substituted {
            character: '\u{1F680}',
            replacement: '?',
            occurrences: 1,
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "substituted");
        assert_eq!(json["occurrences"], 1);
    }
}
