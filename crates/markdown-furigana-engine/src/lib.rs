pub mod editing;
pub mod io;
pub mod live;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use editing::{Cmd, Document, EditorError, Patch, Selection, SelectionRange};
pub use live::{Decoration, DecorationSet, LiveView, RubyWidget, ViewUpdate, decorate};
pub use parsing::ruby::{Ruby, RubyMatch, RubyPair, find_matches};
pub use render::{RenderOptions, render_markdown};
