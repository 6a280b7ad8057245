use criterion::{Criterion, criterion_group, criterion_main};
use markdown_furigana_engine::editing::{Cmd, Document, Selection};
use markdown_furigana_engine::live::{LiveView, ViewUpdate, decorate_document};
mod common;

fn bench_full_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("decorate");
    group.sample_size(10);

    let content = common::generate_annotated_content(200);
    let mut doc = Document::from_bytes(content.as_bytes()).unwrap();
    doc.set_selection(Selection::cursor(0));

    group.bench_function("full_rebuild", |b| {
        b.iter(|| {
            let set = decorate_document(&doc, None);
            std::hint::black_box(set);
        });
    });

    let dense = Document::from_text(&common::generate_dense_lines(2000));
    group.bench_function("dense_lines", |b| {
        b.iter(|| {
            let set = decorate_document(&dense, None);
            std::hint::black_box(set);
        });
    });

    group.finish();
}

fn bench_edit_then_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_view");
    group.sample_size(10);

    let content = common::generate_annotated_content(100);
    let mut doc = Document::from_text(&content);
    let mut view = LiveView::new(&doc);

    group.bench_function("type_and_rebuild", |b| {
        b.iter(|| {
            doc.apply(Cmd::InsertText {
                at: 0,
                text: "あ".to_string(),
            })
            .unwrap();
            view.update(Some(&doc), &ViewUpdate::doc_changed());
            std::hint::black_box(view.decorations().len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_full_rebuild, bench_edit_then_rebuild);
criterion_main!(benches);
