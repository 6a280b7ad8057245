use markdown_furigana_engine::render::{
    Element, Node, RenderOptions, Tag, annotate, parse_markdown, render_markdown, split_text,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn renders_paragraph_with_ruby() {
    let html = render_markdown("{日本|に|ほん}語を話す", &RenderOptions::default());
    insta::assert_snapshot!(html, @r#"
    <div class="markdown-furigana">
    <p><ruby class="furi">日<rt>に</rt>本<rt>ほん</rt></ruby>語を話す</p>
    </div>
    "#);
}

#[test]
fn single_reading_spans_the_whole_base() {
    let html = render_markdown("{日|ひ}", &RenderOptions::default());
    assert!(html.contains("<ruby class=\"furi\">日<rt>ひ</rt></ruby>"));
}

#[rstest]
#[case::count_mismatch("{日|に|ほん}")]
#[case::escaped_pipe_next_to_base("{日\\|本|にほん}")]
#[case::not_ideographic("{kanji|かんじ}")]
fn malformed_annotations_stay_literal(#[case] src: &str) {
    let mut root = parse_markdown(src);
    let before = root.clone();
    assert_eq!(annotate(&mut root), 0);
    assert_eq!(root, before);
}

#[test]
fn multiple_annotations_in_one_leaf_keep_surrounding_text() {
    let mut root = parse_markdown("私は{学生|がく|せい}で、{東京|とうきょう}に住む。");
    assert_eq!(annotate(&mut root), 2);

    let p = match &root.children[0] {
        Node::Element(p) => p,
        other => panic!("expected paragraph, got {other:?}"),
    };
    let kinds: Vec<&str> = p
        .children
        .iter()
        .map(|n| match n {
            Node::Text(_) => "text",
            Node::Element(e) if e.tag == Tag::Ruby => "ruby",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["text", "ruby", "text", "ruby", "text"]);
    assert_eq!(p.children[0], Node::Text("私は".to_string()));
    assert_eq!(p.children[2], Node::Text("で、".to_string()));
    assert_eq!(p.children[4], Node::Text("に住む。".to_string()));
}

#[test]
fn replacer_is_idempotent() {
    let src = "# {題|だい}\n\n1. {一|いち}\n2. {二|に}\n\n| {表\\|ひょう} |\n|---|\n| {行\\|ぎょう} |\n";
    let mut root = parse_markdown(src);
    assert_eq!(annotate(&mut root), 5);
    let first = root.clone();
    assert_eq!(annotate(&mut root), 0);
    assert_eq!(root, first);
}

#[test]
fn code_samples_are_not_annotated() {
    let html = render_markdown(
        "Use `{日|ひ}` like so:\n\n```\n{日|ひ}\n```\n",
        &RenderOptions::default(),
    );
    assert!(!html.contains("<ruby"));
    assert!(html.contains("<code>{日|ひ}</code>"));
}

#[test]
fn visibility_does_not_change_structure() {
    let src = "{日本|に|ほん}";
    let shown = render_markdown(src, &RenderOptions::default());
    let hidden = render_markdown(
        src,
        &RenderOptions {
            furigana_visible: false,
        },
    );
    assert!(hidden.contains("furigana-hidden"));
    assert_eq!(
        shown.replace(" furigana-hidden", ""),
        hidden.replace(" furigana-hidden", "")
    );
    assert!(hidden.contains("<rt>に</rt>"));
}

#[test]
fn split_text_on_unannotated_input_is_identity() {
    let segments = split_text("nothing to see");
    assert_eq!(segments.len(), 1);
}

#[test]
fn hand_built_tree_is_annotated_in_place() {
    let mut root = Element::with_children(
        Tag::Root,
        vec![Node::Element(Element::with_children(
            Tag::Heading(2),
            vec![Node::Text("{章|しょう}".to_string())],
        ))],
    );
    assert_eq!(annotate(&mut root), 1);
    assert_eq!(root.text(), "章しょう");
}

#[test]
fn html_blocks_pass_through_unwrapped() {
    let html = render_markdown("<div>\n{日|ひ}\n</div>\n", &RenderOptions::default());
    assert_eq!(
        html,
        "<div class=\"markdown-furigana\">\n<div>\n{日|ひ}\n</div>\n</div>\n"
    );
}

#[test]
fn image_alt_text_round_trips() {
    let html = render_markdown("![{日|ひ}](a.png)", &RenderOptions::default());
    assert!(html.contains("<img src=\"a.png\" alt=\"{日|ひ}\" />"));
    assert!(!html.contains("<ruby"));
}
