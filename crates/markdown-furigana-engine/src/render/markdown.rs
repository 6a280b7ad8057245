use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag as MdTag, TagEnd};

use super::tree::{Element, Node, Tag};

/// Renders Markdown into an element tree rooted at [`Tag::Root`].
///
/// Adjacent text events are merged, so every run of text between two
/// elements is a single leaf and annotations split across events by the
/// Markdown parser (escapes, entity boundaries) are still found.
pub fn parse_markdown(src: &str) -> Element {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let mut stack = vec![Element::new(Tag::Root)];
    let mut in_table_head = false;

    for event in Parser::new_ext(src, options) {
        match event {
            Event::Start(tag) => {
                if matches!(tag, MdTag::TableHead) {
                    in_table_head = true;
                }
                stack.push(Element::new(map_tag(tag, in_table_head)));
            }
            Event::End(end) => {
                if matches!(end, TagEnd::TableHead) {
                    in_table_head = false;
                }
                close_top(&mut stack);
            }
            Event::Text(text) => top(&mut stack).push_text(&text),
            Event::Code(code) => top(&mut stack).children.push(Node::Element(
                Element::with_children(Tag::Code, vec![Node::Text(code.into_string())]),
            )),
            Event::Html(html) | Event::InlineHtml(html) => {
                top(&mut stack).children.push(Node::Html(html.into_string()))
            }
            Event::SoftBreak => top(&mut stack).push_text("\n"),
            Event::HardBreak => push_void(&mut stack, Tag::LineBreak),
            Event::Rule => push_void(&mut stack, Tag::Rule),
            Event::TaskListMarker(checked) => push_void(&mut stack, Tag::TaskMarker { checked }),
            // Math and footnotes are not rendered by this front end.
            _ => {}
        }
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }
    stack.pop().unwrap_or_else(|| Element::new(Tag::Root))
}

fn map_tag(tag: MdTag<'_>, in_table_head: bool) -> Tag {
    match tag {
        MdTag::Paragraph => Tag::Paragraph,
        MdTag::Heading { level, .. } => Tag::Heading(level as u8),
        MdTag::BlockQuote(_) => Tag::BlockQuote,
        MdTag::CodeBlock(kind) => Tag::CodeBlock {
            lang: match kind {
                CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.into_string()),
                _ => None,
            },
        },
        MdTag::List(Some(start)) => Tag::OrderedList { start },
        MdTag::List(None) => Tag::UnorderedList,
        MdTag::Item => Tag::ListItem,
        MdTag::Table(_) => Tag::Table,
        MdTag::TableHead => Tag::TableHead,
        MdTag::TableRow => Tag::TableRow,
        MdTag::TableCell => Tag::TableCell {
            header: in_table_head,
        },
        MdTag::Emphasis => Tag::Emphasis,
        MdTag::Strong => Tag::Strong,
        MdTag::Strikethrough => Tag::Strikethrough,
        MdTag::Link { dest_url, .. } => Tag::Link {
            href: dest_url.into_string(),
        },
        MdTag::Image { dest_url, .. } => Tag::Image {
            src: dest_url.into_string(),
        },
        MdTag::HtmlBlock => Tag::HtmlBlock,
        // Anything else renders as a plain paragraph-level container.
        _ => Tag::Paragraph,
    }
}

fn top(stack: &mut [Element]) -> &mut Element {
    // The root is never popped while events are flowing.
    let last = stack.len() - 1;
    &mut stack[last]
}

fn push_void(stack: &mut [Element], tag: Tag) {
    top(stack).children.push(Node::Element(Element::new(tag)));
}

fn close_top(stack: &mut Vec<Element>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(done) = stack.pop() {
        top(stack).children.push(Node::Element(done));
    }
}
