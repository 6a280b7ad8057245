use serde::{Deserialize, Serialize};

use crate::parsing::rope::span::Span;

/// One base unit with the reading rendered above it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RubyPair {
    pub base: String,
    pub reading: String,
}

/// A renderable ruby annotation: base/reading pairs in source order.
///
/// Both renderers consume this value; neither looks at the source syntax again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ruby {
    pub pairs: Vec<RubyPair>,
}

impl Ruby {
    /// Pairs base units with readings, or `None` when the counts differ.
    pub fn from_parts(bases: Vec<String>, readings: Vec<String>) -> Option<Self> {
        if bases.len() != readings.len() {
            return None;
        }
        let pairs = bases
            .into_iter()
            .zip(readings)
            .map(|(base, reading)| RubyPair { base, reading })
            .collect();
        Some(Self { pairs })
    }

    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.base.as_str())
    }

    pub fn readings(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.reading.as_str())
    }

    /// The base text with readings dropped, e.g. `日本` for `{日本|に|ほん}`.
    pub fn base_text(&self) -> String {
        self.bases().collect()
    }
}

/// An accepted annotation found in a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubyMatch {
    pub ruby: Ruby,
    /// The exact source text consumed, braces included.
    pub raw: String,
    /// Byte span of `raw` in the scanned text (shifted by the scan's base offset).
    pub span: Span,
}
