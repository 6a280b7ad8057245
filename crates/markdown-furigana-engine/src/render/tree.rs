/// The kind of a rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// The document wrapper; holds the top-level blocks.
    Root,
    Paragraph,
    Heading(u8),
    BlockQuote,
    OrderedList {
        start: u64,
    },
    UnorderedList,
    ListItem,
    Table,
    TableHead,
    TableRow,
    TableCell {
        header: bool,
    },
    CodeBlock {
        lang: Option<String>,
    },
    /// Inline code span.
    Code,
    Emphasis,
    Strong,
    Strikethrough,
    Link {
        href: String,
    },
    Image {
        src: String,
    },
    /// Raw HTML block; its children are written out verbatim.
    HtmlBlock,
    LineBreak,
    Rule,
    TaskMarker {
        checked: bool,
    },
    /// Annotation output: alternating base text and [`Tag::Rt`] children.
    Ruby,
    /// A reading label inside [`Tag::Ruby`].
    Rt,
}

impl Tag {
    /// Blocks whose text is searched for annotations: paragraphs, headings,
    /// ordered and unordered lists, tables.
    pub fn is_annotatable_block(&self) -> bool {
        matches!(
            self,
            Tag::Paragraph
                | Tag::Heading(_)
                | Tag::OrderedList { .. }
                | Tag::UnorderedList
                | Tag::Table
        )
    }

    /// Subtrees never searched for annotations: code, raw HTML, image alt
    /// text and earlier annotation output.
    pub fn skips_annotation(&self) -> bool {
        matches!(
            self,
            Tag::Code | Tag::CodeBlock { .. } | Tag::HtmlBlock | Tag::Image { .. } | Tag::Ruby
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Raw HTML passed through from the source untouched.
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            children: Vec::new(),
        }
    }

    pub fn with_children(tag: Tag, children: Vec<Node>) -> Self {
        Self { tag, children }
    }

    /// Appends text, merging with a preceding text leaf so each run of text
    /// is a single leaf.
    pub fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(prev)) = self.children.last_mut() {
            prev.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Concatenated text of every descendant text leaf.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Every descendant element (self excluded) whose tag satisfies `pred`, in document order.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Tag) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        find_into(self, pred, &mut found);
        found
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Element(e) => collect_text(e, out),
            Node::Text(t) => out.push_str(t),
            Node::Html(_) => {}
        }
    }
}

fn find_into<'a>(el: &'a Element, pred: &dyn Fn(&Tag) -> bool, found: &mut Vec<&'a Element>) {
    for child in &el.children {
        if let Node::Element(e) = child {
            if pred(&e.tag) {
                found.push(e);
            }
            find_into(e, pred, found);
        }
    }
}
