//! Field sanitization.
use crate::conllu::PLACEHOLDER;

const BOM: char = '\u{feff}';

/// Clean a source value for use in a CoNLL-U column.
///
/// Control characters (tabs and line breaks included) become spaces, stray byte order
/// marks are dropped, and the result is trimmed. Empty values become [PLACEHOLDER].
///
/// Zero-width (non-)joiners are kept, they are meaningful in Pahlavi and Persian script.
pub fn sanitize_field(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != BOM)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    match cleaned.trim() {
        "" => PLACEHOLDER.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Whether a sanitized value is unset.
pub fn is_unset(field: &str) -> bool {
    field.is_empty() || field == PLACEHOLDER
}
