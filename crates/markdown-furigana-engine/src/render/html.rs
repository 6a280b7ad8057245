use html_escape::{encode_double_quoted_attribute, encode_text};

use super::tree::{Element, Node, Tag};

/// Presentation switches applied when serializing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Whether reading labels are shown. Only the wrapper's class changes;
    /// the annotation markup is emitted either way.
    pub furigana_visible: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            furigana_visible: true,
        }
    }
}

impl RenderOptions {
    pub const WRAPPER_CLASS: &'static str = "markdown-furigana";
    pub const HIDDEN_CLASS: &'static str = "furigana-hidden";
    pub const RUBY_CLASS: &'static str = "furi";

    pub fn wrapper_class(&self) -> String {
        if self.furigana_visible {
            Self::WRAPPER_CLASS.to_string()
        } else {
            format!("{} {}", Self::WRAPPER_CLASS, Self::HIDDEN_CLASS)
        }
    }
}

/// Serializes a rendered tree as HTML inside a wrapper `<div>`.
pub fn to_html(root: &Element, options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("<div class=\"{}\">\n", options.wrapper_class()));
    write_children(&mut out, &root.children);
    out.push_str("</div>\n");
    out
}

/// Serializes a single ruby element's markup, as shared with the live view.
pub fn element_to_html(el: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, el);
    out
}

fn write_children(out: &mut String, children: &[Node]) {
    for child in children {
        match child {
            Node::Element(el) => write_element(out, el),
            Node::Text(text) => out.push_str(&encode_text(text)),
            Node::Html(html) => out.push_str(html),
        }
    }
}

fn wrap(out: &mut String, open: &str, el: &Element, close: &str) {
    out.push_str(open);
    write_children(out, &el.children);
    out.push_str(close);
}

fn write_element(out: &mut String, el: &Element) {
    match &el.tag {
        Tag::Root => write_children(out, &el.children),
        Tag::Paragraph => wrap(out, "<p>", el, "</p>\n"),
        Tag::Heading(level) => wrap(out, &format!("<h{level}>"), el, &format!("</h{level}>\n")),
        Tag::BlockQuote => wrap(out, "<blockquote>\n", el, "</blockquote>\n"),
        Tag::OrderedList { start: 1 } => wrap(out, "<ol>\n", el, "</ol>\n"),
        Tag::OrderedList { start } => wrap(out, &format!("<ol start=\"{start}\">\n"), el, "</ol>\n"),
        Tag::UnorderedList => wrap(out, "<ul>\n", el, "</ul>\n"),
        Tag::ListItem => wrap(out, "<li>", el, "</li>\n"),
        Tag::Table => write_table(out, el),
        Tag::TableHead => wrap(out, "<thead><tr>", el, "</tr></thead>\n"),
        Tag::TableRow => wrap(out, "<tr>", el, "</tr>\n"),
        Tag::TableCell { header: true } => wrap(out, "<th>", el, "</th>"),
        Tag::TableCell { header: false } => wrap(out, "<td>", el, "</td>"),
        Tag::CodeBlock { lang } => {
            match lang {
                Some(lang) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    encode_double_quoted_attribute(lang)
                )),
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&encode_text(&el.text()));
            out.push_str("</code></pre>\n");
        }
        Tag::Code => wrap(out, "<code>", el, "</code>"),
        Tag::Emphasis => wrap(out, "<em>", el, "</em>"),
        Tag::Strong => wrap(out, "<strong>", el, "</strong>"),
        Tag::Strikethrough => wrap(out, "<del>", el, "</del>"),
        Tag::Link { href } => wrap(
            out,
            &format!("<a href=\"{}\">", encode_double_quoted_attribute(href)),
            el,
            "</a>",
        ),
        Tag::Image { src } => out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" />",
            encode_double_quoted_attribute(src),
            encode_double_quoted_attribute(&el.text())
        )),
        Tag::HtmlBlock => write_children(out, &el.children),
        Tag::LineBreak => out.push_str("<br />\n"),
        Tag::Rule => out.push_str("<hr />\n"),
        Tag::TaskMarker { checked } => out.push_str(if *checked {
            "<input disabled=\"\" type=\"checkbox\" checked=\"\"/>\n"
        } else {
            "<input disabled=\"\" type=\"checkbox\"/>\n"
        }),
        Tag::Ruby => wrap(
            out,
            &format!("<ruby class=\"{}\">", RenderOptions::RUBY_CLASS),
            el,
            "</ruby>",
        ),
        Tag::Rt => wrap(out, "<rt>", el, "</rt>"),
    }
}

fn write_table(out: &mut String, el: &Element) {
    out.push_str("<table>");
    let mut in_body = false;
    for child in &el.children {
        if let Node::Element(row) = child
            && row.tag == Tag::TableRow
            && !in_body
        {
            out.push_str("<tbody>\n");
            in_body = true;
        }
        write_children(out, std::slice::from_ref(child));
    }
    if in_body {
        out.push_str("</tbody>");
    }
    out.push_str("</table>\n");
}
