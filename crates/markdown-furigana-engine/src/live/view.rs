use crate::editing::Document;
use crate::parsing::rope::span::Span;

use super::{decoration::DecorationSet, decorator::decorate};

/// What changed since the last rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_set: bool,
}

impl ViewUpdate {
    pub fn doc_changed() -> Self {
        Self {
            doc_changed: true,
            ..Self::default()
        }
    }

    pub fn selection_set() -> Self {
        Self {
            selection_set: true,
            ..Self::default()
        }
    }

    pub fn viewport_changed() -> Self {
        Self {
            viewport_changed: true,
            ..Self::default()
        }
    }

    pub fn needs_rebuild(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_set
    }
}

/// Holds the decorations of the live view and rebuilds them when told
/// something relevant changed.
///
/// Nothing is carried over between rebuilds: every rebuild is a pure
/// function of the document, its selection and the viewport at that moment.
#[derive(Debug, Default)]
pub struct LiveView {
    decorations: DecorationSet,
    viewport: Option<Span>,
    rebuilds: u64,
}

impl LiveView {
    pub fn new(doc: &Document) -> Self {
        let mut view = Self::default();
        view.refresh(Some(doc));
        view
    }

    pub fn with_viewport(doc: &Document, viewport: Span) -> Self {
        let mut view = Self {
            viewport: Some(viewport),
            ..Self::default()
        };
        view.refresh(Some(doc));
        view
    }

    /// Rebuilds if `update` reports a document, viewport or selection change.
    /// Returns whether a rebuild happened.
    pub fn update(&mut self, doc: Option<&Document>, update: &ViewUpdate) -> bool {
        if !update.needs_rebuild() {
            return false;
        }
        self.refresh(doc);
        true
    }

    /// Unconditional rebuild. Without a document the view shows nothing.
    pub fn refresh(&mut self, doc: Option<&Document>) {
        self.decorations = match doc {
            Some(doc) => decorate(doc.rope(), doc.selection(), self.viewport),
            None => DecorationSet::default(),
        };
        self.rebuilds += 1;
    }

    /// Stores a new viewport; the returned update says whether it changed.
    pub fn set_viewport(&mut self, viewport: Option<Span>) -> ViewUpdate {
        let changed = self.viewport != viewport;
        self.viewport = viewport;
        ViewUpdate {
            viewport_changed: changed,
            ..ViewUpdate::default()
        }
    }

    pub fn viewport(&self) -> Option<Span> {
        self.viewport
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    /// How many times the set has been rebuilt.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}
