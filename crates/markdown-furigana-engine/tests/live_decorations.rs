use markdown_furigana_engine::{
    Cmd, Document, LiveView, Selection, SelectionRange, ViewUpdate, decorate,
    live::decorate_document, parsing::rope::Span,
};
use pretty_assertions::assert_eq;

fn spans(view: &LiveView) -> Vec<(usize, usize)> {
    view.decorations().iter().map(|d| (d.from(), d.to())).collect()
}

#[test]
fn caret_inside_hides_widget_and_moving_away_restores_it() {
    let mut doc = Document::from_text("0123456789{日|ひ} and more");
    doc.set_selection(Selection::cursor(12));
    let mut view = LiveView::new(&doc);
    assert!(view.decorations().is_empty());

    doc.set_selection(Selection::cursor(20));
    view.update(Some(&doc), &ViewUpdate::selection_set());
    assert_eq!(spans(&view), vec![(10, 19)]);
}

#[test]
fn two_matches_on_a_line_are_ascending_and_disjoint() {
    let mut doc = Document::from_text("{日|ひ}と{月|つき}");
    doc.set_selection(Selection::none());
    let set = decorate_document(&doc, None);
    let ranges: Vec<_> = set.iter().map(|d| (d.from(), d.to())).collect();
    assert_eq!(ranges, vec![(0, 9), (12, 24)]);
    assert!(ranges.windows(2).all(|w| w[0].1 <= w[1].0));
}

#[test]
fn widgets_carry_the_pairs() {
    let mut doc = Document::from_text("{日本|に|ほん}");
    doc.set_selection(Selection::none());
    let set = decorate_document(&doc, None);
    let widget = &set.as_slice()[0].widget;
    assert_eq!(widget.to_text(true), "日(に)本(ほん)");
}

#[test]
fn typing_inside_an_annotation_keeps_it_raw_until_caret_leaves() {
    let mut doc = Document::from_text("{日|ひ}\n");
    doc.set_selection(Selection::cursor(8));
    let mut view = LiveView::new(&doc);
    assert!(view.decorations().is_empty());

    // Type "る" before the closing brace.
    doc.apply(Cmd::InsertText {
        at: 8,
        text: "る".to_string(),
    })
    .unwrap();
    view.update(Some(&doc), &ViewUpdate::doc_changed());
    assert!(view.decorations().is_empty());
    assert_eq!(doc.text(), "{日|ひる}\n");

    // Caret to the start of the (empty) next line.
    doc.set_selection(Selection::cursor(doc.len()));
    view.update(Some(&doc), &ViewUpdate::selection_set());
    assert_eq!(spans(&view), vec![(0, 12)]);
    assert_eq!(view.decorations().as_slice()[0].widget.to_text(true), "日(ひる)");
}

#[test]
fn document_text_is_never_modified() {
    let src = "{日|ひ} {月|つき}\n{火|ひ}";
    let mut doc = Document::from_text(src);
    doc.set_selection(Selection::none());
    let view = LiveView::new(&doc);
    assert_eq!(view.decorations().len(), 3);
    assert_eq!(doc.text(), src);
}

#[test]
fn multiple_selection_ranges_each_suppress() {
    let rope = xi_rope::Rope::from("{日|ひ} {月|つき} {火|ひ}");
    let selection = Selection::from_ranges([
        SelectionRange::cursor(2),
        SelectionRange::new(24, 26),
    ]);
    let set = decorate(&rope, &selection, None);
    let ranges: Vec<_> = set.iter().map(|d| (d.from(), d.to())).collect();
    assert_eq!(ranges, vec![(10, 22)]);
}

#[test]
fn viewport_change_triggers_rebuild() {
    let mut doc = Document::from_text("{日|ひ}\n{月|つき}\n");
    doc.set_selection(Selection::none());
    let mut view = LiveView::with_viewport(&doc, Span::new(0, 5));
    assert_eq!(spans(&view), vec![(0, 9)]);

    let update = view.set_viewport(Some(Span::new(11, 20)));
    assert!(view.update(Some(&doc), &update));
    assert_eq!(spans(&view), vec![(10, 22)]);
}

#[test]
fn no_document_means_no_decorations() {
    let mut view = LiveView::default();
    view.refresh(None);
    assert!(view.decorations().is_empty());
}
