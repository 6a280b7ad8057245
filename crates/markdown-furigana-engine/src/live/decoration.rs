use serde::{Deserialize, Serialize};

use crate::parsing::rope::span::Span;

use super::widget::RubyWidget;

/// Replaces the source text in `span` with `widget`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub span: Span,
    pub widget: RubyWidget,
}

impl Decoration {
    pub fn from(&self) -> usize {
        self.span.start
    }

    pub fn to(&self) -> usize {
        self.span.end
    }
}

/// Per-line bookkeeping recorded during a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInfo {
    /// 1-based line number.
    pub number: usize,
    /// Line content span, line break excluded.
    pub span: Span,
    /// Whether any selection range touches the line. Informational only:
    /// suppression is decided per annotation.
    pub has_selection: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecorationError {
    #[error("decoration {from}..{to} ends before it starts")]
    Inverted { from: usize, to: usize },
    #[error("decoration {from}..{to} starts before the previous decoration ends at {prev_end}")]
    OutOfOrder {
        from: usize,
        to: usize,
        prev_end: usize,
    },
}

/// Collects decorations, which must arrive in ascending, non-overlapping order.
#[derive(Debug, Default)]
pub struct DecorationSetBuilder {
    decorations: Vec<Decoration>,
    lines: Vec<LineInfo>,
}

impl DecorationSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, from: usize, to: usize, widget: RubyWidget) -> Result<(), DecorationError> {
        if to < from {
            return Err(DecorationError::Inverted { from, to });
        }
        if let Some(prev) = self.decorations.last()
            && from < prev.to()
        {
            return Err(DecorationError::OutOfOrder {
                from,
                to,
                prev_end: prev.to(),
            });
        }
        self.decorations.push(Decoration {
            span: Span { start: from, end: to },
            widget,
        });
        Ok(())
    }

    pub fn push_line(&mut self, line: LineInfo) {
        self.lines.push(line);
    }

    pub fn finish(self) -> DecorationSet {
        DecorationSet {
            decorations: self.decorations,
            lines: self.lines,
        }
    }
}

/// An ordered, non-overlapping set of decorations over one document snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationSet {
    decorations: Vec<Decoration>,
    lines: Vec<LineInfo>,
}

impl DecorationSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.decorations.iter()
    }

    pub fn as_slice(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// The lines scanned by the rebuild that produced this set.
    pub fn lines(&self) -> &[LineInfo] {
        &self.lines
    }

    /// The decoration covering `offset` (`from <= offset < to`), if any.
    pub fn at(&self, offset: usize) -> Option<&Decoration> {
        let idx = self.decorations.partition_point(|d| d.to() <= offset);
        self.decorations
            .get(idx)
            .filter(|d| d.from() <= offset && offset < d.to())
    }

    /// Decorations that overlap `span`, in order.
    pub fn in_span(&self, span: Span) -> impl Iterator<Item = &Decoration> {
        let start = self.decorations.partition_point(|d| d.to() <= span.start);
        self.decorations[start..]
            .iter()
            .take_while(move |d| d.from() < span.end)
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
