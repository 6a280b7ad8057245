/// Delimiters and character classes of the ruby annotation syntax.
///
/// The pattern is a stable, user-facing format: notes written against it must
/// keep rendering the same way, so the ranges below are fixed.
pub struct RubyDelims;

impl RubyDelims {
    pub const OPEN: char = '{';
    pub const CLOSE: char = '}';
    pub const SEPARATOR: char = '|';
    /// Optional escape before a separator, so annotations survive inside
    /// Markdown table cells.
    pub const ESCAPE: char = '\\';

    /// Base characters: CJK radicals through Yi (U+2E80..=U+A4CF) and the
    /// halfwidth/fullwidth forms block (U+FF00..=U+FFEF).
    pub const BASE_CLASS: &'static str = r"[\x{2E80}-\x{A4CF}\x{FF00}-\x{FFEF}]";

    /// Reading characters: anything except space and ASCII punctuation.
    pub const READING_CLASS: &'static str = r"[^ -/{-~:-@\[-`]";

    /// Full pattern. Group 1 is the base run, group 2 every reading segment
    /// including the separators that introduce them.
    pub fn pattern() -> String {
        format!(
            r"(?m)\{{((?:{base})+)((?:\\?\|{reading}*)+)\}}",
            base = Self::BASE_CLASS,
            reading = Self::READING_CLASS,
        )
    }

    pub fn is_base_char(c: char) -> bool {
        matches!(c, '\u{2E80}'..='\u{A4CF}' | '\u{FF00}'..='\u{FFEF}')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_class_covers_kanji_and_kana() {
        assert!(RubyDelims::is_base_char('漢'));
        assert!(RubyDelims::is_base_char('か'));
        assert!(RubyDelims::is_base_char('Ａ'));
        assert!(!RubyDelims::is_base_char('a'));
        assert!(!RubyDelims::is_base_char('é'));
    }

    #[test]
    fn pattern_has_literal_braces() {
        let pattern = RubyDelims::pattern();
        assert!(pattern.starts_with(r"(?m)\{("));
        assert!(pattern.ends_with(r")\}"));
    }
}
