use xi_rope::Rope;

use crate::editing::{Document, Selection};
use crate::parsing::rope::{lines_with_spans, span::Span};
use crate::parsing::ruby::find_matches_at;

use super::{
    decoration::{DecorationSet, DecorationSetBuilder, LineInfo},
    widget::RubyWidget,
};

/// Builds the full decoration set for a document snapshot and selection.
///
/// Lines are visited in order (restricted to those touching `viewport` when
/// one is given) and matched one at a time, so decorations come out in
/// ascending document order. An annotation is left as source text when any
/// selection range touches it, boundaries included: a caret right before the
/// opening `{` or right after the closing `}` also reveals the source.
pub fn decorate(rope: &Rope, selection: &Selection, viewport: Option<Span>) -> DecorationSet {
    let mut builder = DecorationSetBuilder::new();
    let mut suppressed = 0usize;

    for line in lines_with_spans(rope) {
        if let Some(viewport) = viewport {
            if line.span.start > viewport.end {
                break;
            }
            if !line.span.intersects(viewport) {
                continue;
            }
        }

        builder.push_line(LineInfo {
            number: line.number,
            span: line.content,
            has_selection: selection
                .ranges()
                .iter()
                .any(|r| r.touches_span(line.content)),
        });

        for m in find_matches_at(line.content.start, &line.text) {
            let (from, to) = (m.span.start, m.span.end);
            if selection.touches(from, to) {
                suppressed += 1;
                continue;
            }
            if let Err(err) = builder.add(from, to, RubyWidget::new(m.ruby)) {
                log::warn!("dropping ruby decoration on line {}: {err}", line.number);
            }
        }
    }

    let set = builder.finish();
    log::debug!(
        "live rebuild: {} decorations, {suppressed} under selection, {} lines",
        set.len(),
        set.lines().len()
    );
    set
}

/// [`decorate`] over a document's own buffer and selection.
pub fn decorate_document(doc: &Document, viewport: Option<Span>) -> DecorationSet {
    decorate(doc.rope(), doc.selection(), viewport)
}
