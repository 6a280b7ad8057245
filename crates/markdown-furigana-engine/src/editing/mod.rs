/*!
 * # Live Document Model
 *
 * The editable, currently open representation of a note, as consumed by the
 * live decorator.
 *
 * ## Architecture
 *
 * - The whole document lives in a single **`xi_rope::Rope`** buffer; offsets
 *   everywhere are byte offsets into it.
 * - Edits are **Commands** (`Cmd`) compiled to xi-rope **Deltas** and applied
 *   immediately; each application bumps the document version and maps the
 *   selection through the edit.
 * - The **Selection** is a set of disjoint ranges (carets are empty ranges).
 *   It is owned by the document but handed to the decorator fresh on every
 *   rebuild.
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` with the rope buffer, selection and version
 * - **`commands`**: `Cmd` and delta compilation
 * - **`selection`**: `SelectionRange` / `Selection`
 * - **`patch`**: what an applied command changed
 *
 * ## Usage Pattern
 *
 * ```rust
 * use markdown_furigana_engine::editing::*;
 *
 * let mut doc = Document::from_bytes("{日|ひ}".as_bytes()).unwrap();
 * doc.set_selection(Selection::cursor(0));
 * let patch = doc.apply(Cmd::InsertText { at: 0, text: "今".to_string() }).unwrap();
 * assert_eq!(patch.version, 1);
 * assert_eq!(doc.text(), "今{日|ひ}");
 * ```
 */

pub mod commands;
pub mod document;
pub mod patch;
pub mod selection;

pub use commands::Cmd;
pub use document::{Document, EditorError};
pub use patch::Patch;
pub use selection::{Selection, SelectionRange};
