use serde::{Deserialize, Serialize};

use crate::parsing::rope::span::Span;

/// One selected range; a caret when `from == to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectionRange {
    pub from: usize,
    pub to: usize,
}

impl SelectionRange {
    /// Builds a range from two ends in either order.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self {
            from: anchor.min(head),
            to: anchor.max(head),
        }
    }

    pub fn cursor(at: usize) -> Self {
        Self { from: at, to: at }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Inclusive overlap test against `[from, to]`: a caret sitting exactly on
    /// either boundary counts as touching.
    pub fn touches(&self, from: usize, to: usize) -> bool {
        self.to >= from && self.from <= to
    }

    pub fn touches_span(&self, span: Span) -> bool {
        self.touches(span.start, span.end)
    }
}

/// The set of selected ranges, kept sorted and disjoint. A caret on the
/// edge of a range is merged into it; two non-empty ranges may share an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ranges: Vec<SelectionRange>,
}

impl Selection {
    /// No selection at all; nothing is suppressed by it.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn cursor(at: usize) -> Self {
        Self {
            ranges: vec![SelectionRange::cursor(at)],
        }
    }

    pub fn single(range: SelectionRange) -> Self {
        Self {
            ranges: vec![range],
        }
    }

    /// Sorts the ranges and merges any that overlap.
    pub fn from_ranges(ranges: impl IntoIterator<Item = SelectionRange>) -> Self {
        let mut sorted: Vec<SelectionRange> = ranges.into_iter().collect();
        sorted.sort();

        let mut merged: Vec<SelectionRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            match merged.last_mut() {
                Some(last)
                    if range.from < last.to
                        || (range.from == last.to && (range.is_empty() || last.is_empty())) =>
                {
                    last.to = last.to.max(range.to);
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The first range, used as the caret by single-cursor hosts.
    pub fn primary(&self) -> Option<SelectionRange> {
        self.ranges.first().copied()
    }

    /// True if any range touches `[from, to]` (inclusive on both ends).
    pub fn touches(&self, from: usize, to: usize) -> bool {
        self.ranges.iter().any(|r| r.touches(from, to))
    }

    /// Applies `f` to both ends of every range, then re-normalizes.
    pub fn map(&self, f: impl Fn(usize) -> usize) -> Self {
        Self::from_ranges(
            self.ranges
                .iter()
                .map(|r| SelectionRange::new(f(r.from), f(r.to))),
        )
    }
}
