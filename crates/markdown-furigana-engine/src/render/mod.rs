//! # Static Rendering
//!
//! The fully rendered document view: Markdown is rendered into an element
//! tree, annotation syntax inside the text of paragraphs, headings, lists and
//! tables is replaced by ruby elements, and the tree is serialized as HTML.
//!
//! ## Modules
//!
//! - **`tree`**: `Element` / `Node` / `Tag` rendered tree
//! - **`markdown`**: `pulldown-cmark` front end producing the tree
//! - **`segments`**: splitting one text leaf into plain and ruby segments
//! - **`replacer`**: `annotate()`, the pass over a rendered tree
//! - **`html`**: serialization and `RenderOptions`

pub mod html;
pub mod markdown;
pub mod replacer;
pub mod segments;
pub mod tree;

pub use html::{RenderOptions, to_html};
pub use markdown::parse_markdown;
pub use replacer::annotate;
pub use segments::{Segment, split_text};
pub use tree::{Element, Node, Tag};

/// Renders Markdown to HTML with ruby annotations applied.
pub fn render_markdown(src: &str, options: &RenderOptions) -> String {
    let mut root = parse_markdown(src);
    let inserted = annotate(&mut root);
    log::debug!("static render: {inserted} ruby annotations inserted");
    to_html(&root, options)
}
