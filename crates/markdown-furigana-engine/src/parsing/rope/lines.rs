use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte spans.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// Byte span of the line content, without the trailing `\n` or `\r\n`.
    pub content: Span,
    /// The line text without its line break.
    pub text: String,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` so the newline bytes are accounted for when computing
/// absolute offsets, then strips them from the text handed to callers.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, line)| {
        let start = offset;
        let len = line.len();
        offset += len;

        let mut text = line.into_owned();
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }

        LineRef {
            number: index + 1,
            span: Span { start, end: offset },
            content: Span {
                start,
                end: start + text.len(),
            },
            text,
        }
    })
}
