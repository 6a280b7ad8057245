//! # Live Decorations
//!
//! Cursor-aware annotation rendering for the editable view. Every
//! annotation in the document becomes a replace decoration that shows a ruby
//! widget instead of the source text, except where a selection range touches
//! it, so the text under the caret stays editable as written.
//!
//! Decorations are derived data: a [`DecorationSet`] is rebuilt from scratch
//! from a document snapshot and selection on every document, viewport or
//! selection change, and the document text is never modified.
//!
//! ## Modules
//!
//! - **`widget`**: `RubyWidget`, the rendered replacement
//! - **`decoration`**: `Decoration`, `DecorationSet` and its ordered builder
//! - **`decorator`**: `decorate()`, the per-line rebuild
//! - **`view`**: `LiveView` / `ViewUpdate`, rebuild triggering

pub mod decoration;
pub mod decorator;
pub mod view;
pub mod widget;

pub use decoration::{Decoration, DecorationError, DecorationSet, DecorationSetBuilder, LineInfo};
pub use decorator::{decorate, decorate_document};
pub use view::{LiveView, ViewUpdate};
pub use widget::RubyWidget;
