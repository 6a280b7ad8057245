use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::rope::span::Span;

use super::{
    kinds::RubyDelims,
    types::{Ruby, RubyMatch},
};

fn ruby_regex() -> &'static Regex {
    static RUBY_REGEX: OnceLock<Regex> = OnceLock::new();
    RUBY_REGEX.get_or_init(|| Regex::new(&RubyDelims::pattern()).expect("Invalid ruby regex"))
}

/// A raw hit of the grammar, before the base/reading count check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// The run of base characters between `{` and the first separator.
    pub base_run: &'a str,
    /// Every reading segment, separators included (e.g. `|に|ほん`).
    pub segments: &'a str,
    /// The whole matched text, braces included.
    pub raw: &'a str,
    pub span: Span,
}

impl Candidate<'_> {
    /// Reading segments with their introducing separators removed.
    ///
    /// Readings can never contain a backslash, so a trailing `\` on a segment
    /// is always the escape of the next separator and is dropped with it.
    pub fn readings(&self) -> Vec<String> {
        self.segments
            .split(RubyDelims::SEPARATOR)
            .skip(1) // text before the first separator is empty or a lone escape
            .map(|seg| seg.strip_suffix(RubyDelims::ESCAPE).unwrap_or(seg))
            .map(str::to_string)
            .collect()
    }

    /// Base units for `reading_count` readings: the whole run for a single
    /// reading, one unit per character otherwise.
    pub fn bases(&self, reading_count: usize) -> Vec<String> {
        if reading_count == 1 {
            vec![self.base_run.to_string()]
        } else {
            self.base_run.chars().map(String::from).collect()
        }
    }

    /// Applies the expansion rule; `None` when base and reading counts differ.
    pub fn accept(&self) -> Option<RubyMatch> {
        let readings = self.readings();
        let bases = self.bases(readings.len());
        let ruby = Ruby::from_parts(bases, readings)?;
        Some(RubyMatch {
            ruby,
            raw: self.raw.to_string(),
            span: self.span,
        })
    }
}

/// Lazily scans `text` for grammar hits, leftmost first, never overlapping.
pub fn candidates(text: &str) -> impl Iterator<Item = Candidate<'_>> {
    candidates_at(0, text)
}

/// Like [`candidates`], with spans shifted by `base` (the offset of `text` in its document).
pub fn candidates_at(base: usize, text: &str) -> impl Iterator<Item = Candidate<'_>> {
    ruby_regex().captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        Some(Candidate {
            base_run: caps.get(1)?.as_str(),
            segments: caps.get(2)?.as_str(),
            raw: whole.as_str(),
            span: Span::new(whole.start(), whole.end()).shift(base),
        })
    })
}

/// Lazily yields the accepted annotations in `text`, left to right.
///
/// Candidates failing the count check are skipped; the scan carries on after them.
pub fn find_matches(text: &str) -> impl Iterator<Item = RubyMatch> + '_ {
    find_matches_at(0, text)
}

/// Like [`find_matches`], with spans shifted by `base`.
pub fn find_matches_at(base: usize, text: &str) -> impl Iterator<Item = RubyMatch> + '_ {
    candidates_at(base, text).filter_map(|candidate| {
        let accepted = candidate.accept();
        if accepted.is_none() {
            log::trace!(
                "ruby candidate {:?} at {:?} left as text: base/reading count mismatch",
                candidate.raw,
                candidate.span
            );
        }
        accepted
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn pairs(m: &RubyMatch) -> Vec<(&str, &str)> {
        m.ruby
            .pairs
            .iter()
            .map(|p| (p.base.as_str(), p.reading.as_str()))
            .collect()
    }

    #[test]
    fn single_reading_keeps_base_whole() {
        let found: Vec<_> = find_matches("{日|ひ}").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(pairs(&found[0]), vec![("日", "ひ")]);
        assert_eq!(found[0].span, Span { start: 0, end: 9 });
        assert_eq!(found[0].raw, "{日|ひ}");
    }

    #[test]
    fn single_reading_over_multi_char_base() {
        let found: Vec<_> = find_matches("{日本|にほん}").collect();
        assert_eq!(pairs(&found[0]), vec![("日本", "にほん")]);
    }

    #[test]
    fn multiple_readings_split_base_per_character() {
        let found: Vec<_> = find_matches("{日本|に|ほん}").collect();
        assert_eq!(pairs(&found[0]), vec![("日", "に"), ("本", "ほん")]);
    }

    #[rstest]
    #[case::too_many_readings("{日|に|ほん}")]
    #[case::too_few_readings("{日本語|に|ほん}")]
    #[case::ascii_base("{abc|x}")]
    #[case::no_separator("{日本}")]
    #[case::space_in_reading("{日|ひ る}")]
    #[case::unclosed("{日|ひ")]
    #[case::escaped_separator_in_base_region("{日\\|本|にほん}")]
    fn rejected_or_unmatched_inputs_yield_nothing(#[case] input: &str) {
        assert_eq!(find_matches(input).count(), 0);
    }

    #[test]
    fn escaped_separators_are_separators() {
        let found: Vec<_> = find_matches("{漢字\\|かん\\|じ}").collect();
        assert_eq!(pairs(&found[0]), vec![("漢", "かん"), ("字", "じ")]);
        assert_eq!(found[0].raw, "{漢字\\|かん\\|じ}");
    }

    #[test]
    fn empty_readings_are_allowed() {
        let found: Vec<_> = find_matches("{日本||ほん}").collect();
        assert_eq!(pairs(&found[0]), vec![("日", ""), ("本", "ほん")]);
    }

    #[test]
    fn fullwidth_and_ascii_letter_readings() {
        let found: Vec<_> = find_matches("{ＡＢ|a|b}").collect();
        assert_eq!(pairs(&found[0]), vec![("Ａ", "a"), ("Ｂ", "b")]);
    }

    #[test]
    fn matches_are_ordered_and_offsets_are_bytes() {
        let text = "a{日|ひ}b{月|つき}";
        let found: Vec<_> = find_matches(text).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].span, Span { start: 1, end: 10 });
        assert_eq!(found[1].span, Span { start: 11, end: 23 });
        assert_eq!(&text[found[1].span.as_range()], "{月|つき}");
    }

    #[test]
    fn rejected_candidate_does_not_stop_scan() {
        let found: Vec<_> = find_matches("{日|に|ほん} {月|つき}").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw, "{月|つき}");
    }

    #[test]
    fn base_offset_shifts_spans() {
        let found: Vec<_> = find_matches_at(100, "x{日|ひ}").collect();
        assert_eq!(found[0].span, Span { start: 101, end: 110 });
    }

    #[test]
    fn candidates_include_rejected_hits() {
        let all: Vec<_> = candidates("{日|に|ほん}").collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].base_run, "日");
        assert_eq!(all[0].readings(), vec!["に", "ほん"]);
        assert!(all[0].accept().is_none());
    }

    #[test]
    fn scan_is_restartable() {
        let text = "{日|ひ}{月|つき}";
        let first: Vec<_> = find_matches(text).collect();
        let second: Vec<_> = find_matches(text).collect();
        assert_eq!(first, second);
    }
}
