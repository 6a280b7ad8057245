use super::{
    segments::{Segment, split_text, to_nodes},
    tree::{Element, Node},
};

/// Replaces annotation syntax in the text of every annotatable block under
/// `root` with ruby elements. Returns the number of annotations inserted.
///
/// Code and existing ruby subtrees are never searched, so running the pass
/// again over its own output inserts nothing and leaves the tree unchanged.
pub fn annotate(root: &mut Element) -> usize {
    let mut inserted = 0;
    visit_blocks(root, &mut inserted);
    inserted
}

/// Finds the outermost annotatable blocks. Blocks nested inside one (a
/// paragraph in a list item) are covered by the outer block's leaf walk.
fn visit_blocks(el: &mut Element, inserted: &mut usize) {
    for child in &mut el.children {
        if let Node::Element(child) = child {
            if child.tag.is_annotatable_block() {
                *inserted += annotate_leaves(child);
            } else if !child.tag.skips_annotation() {
                visit_blocks(child, inserted);
            }
        }
    }
}

fn annotate_leaves(el: &mut Element) -> usize {
    let mut inserted = 0;
    let children = std::mem::take(&mut el.children);
    el.children.reserve(children.len());

    for node in children {
        match node {
            Node::Text(text) => {
                let segments = split_text(&text);
                inserted += segments
                    .iter()
                    .filter(|s| matches!(s, Segment::Ruby(_)))
                    .count();
                el.children.extend(to_nodes(segments));
            }
            Node::Element(mut child) => {
                if !child.tag.skips_annotation() {
                    inserted += annotate_leaves(&mut child);
                }
                el.children.push(Node::Element(child));
            }
            html @ Node::Html(_) => el.children.push(html),
        }
    }
    inserted
}
