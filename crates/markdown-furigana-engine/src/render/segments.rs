use crate::parsing::ruby::{Ruby, find_matches};

use super::tree::{Element, Node, Tag};

/// A piece of a text leaf after annotation: untouched text or a ruby span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Ruby(Ruby),
}

/// Splits `text` into plain and ruby segments, left to right.
///
/// Each accepted match is located in the unconsumed tail of the text, the
/// head before it is kept as plain text and the tail after it is what the
/// next match is looked up in. Without an accepted match the result is a
/// single plain segment equal to the input.
pub fn split_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut tail = text;

    for m in find_matches(text) {
        let Some(offset) = tail.find(m.raw.as_str()) else {
            continue;
        };
        let (head, rest) = tail.split_at(offset);
        if !head.is_empty() {
            segments.push(Segment::Plain(head.to_string()));
        }
        segments.push(Segment::Ruby(m.ruby));
        tail = &rest[m.raw.len()..];
    }

    if segments.is_empty() {
        return vec![Segment::Plain(text.to_string())];
    }
    if !tail.is_empty() {
        segments.push(Segment::Plain(tail.to_string()));
    }
    segments
}

/// Builds the annotation element: each base unit as text followed by its
/// reading in an [`Tag::Rt`] child.
pub fn ruby_element(ruby: &Ruby) -> Element {
    let mut children = Vec::with_capacity(ruby.pairs.len() * 2);
    for pair in &ruby.pairs {
        children.push(Node::Text(pair.base.clone()));
        children.push(Node::Element(Element::with_children(
            Tag::Rt,
            vec![Node::Text(pair.reading.clone())],
        )));
    }
    Element::with_children(Tag::Ruby, children)
}

/// Materializes segments as sibling nodes.
pub fn to_nodes(segments: Vec<Segment>) -> Vec<Node> {
    segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => Node::Text(text),
            Segment::Ruby(ruby) => Node::Element(ruby_element(&ruby)),
        })
        .collect()
}
