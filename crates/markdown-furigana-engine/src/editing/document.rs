use xi_rope::Rope;

use crate::editing::{
    Cmd, Patch, Selection,
    commands::{compile_command, map_offset},
};
use crate::parsing::rope::{LineRef, lines_with_spans};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("edit range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

/// The live, editable document.
///
/// Holds the whole text in one `xi_rope::Rope`, the current selection, and
/// a version counter bumped by every applied command. Decorations are never
/// stored here; they are derived from a document snapshot on demand.
#[derive(Clone)]
pub struct Document {
    /// xi-rope buffer containing the entire document as UTF-8
    pub(crate) buffer: Rope,
    /// Current selection as byte offsets in buffer
    pub(crate) selection: Selection,
    /// Version counter incremented on each edit (enables change detection)
    pub(crate) version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EditorError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        let buffer = Rope::from(text);
        let len = buffer.len();
        Self {
            buffer,
            selection: Selection::cursor(len), // Start with cursor at end
            version: 0,
        }
    }

    /// Exact bytes of the buffer, for saving.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    /// Apply an edit command.
    ///
    /// Compiles the command to a delta, applies it to the buffer, maps every
    /// selection range through the edit and bumps the version.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditorError> {
        self.check_range(cmd.target())?;

        let delta = compile_command(self.len(), &cmd);

        let mut changed = Vec::new();
        let mut cursor = 0;
        for op in delta.els.iter() {
            match op {
                xi_rope::delta::DeltaElement::Copy(from, to) => {
                    cursor += to - from;
                }
                xi_rope::delta::DeltaElement::Insert(inserted) => {
                    let start = cursor;
                    let end = cursor + inserted.len();
                    changed.push(start..end);
                    cursor = end;
                }
            }
        }

        self.buffer = delta.apply(&self.buffer);
        self.selection = self.selection.map(|offset| map_offset(offset, &cmd));
        self.version += 1;

        log::trace!(
            "document v{}: applied {:?}, {} bytes",
            self.version,
            cmd.target(),
            self.buffer.len()
        );

        Ok(Patch {
            changed,
            new_selection: self.selection.clone(),
            version: self.version,
        })
    }

    fn check_range(&self, range: std::ops::Range<usize>) -> Result<(), EditorError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(EditorError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        for offset in [range.start, range.end] {
            if !self.is_char_boundary(offset) {
                return Err(EditorError::NotCharBoundary(offset));
            }
        }
        Ok(())
    }

    /// True if `offset` falls between two characters (or at either end).
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        if offset == 0 || offset >= self.len() {
            return offset <= self.len();
        }
        self.buffer
            .prev_codepoint_offset(offset)
            .and_then(|prev| self.buffer.next_codepoint_offset(prev))
            == Some(offset)
    }

    /// Get the current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the selection; ranges past the end are clamped.
    pub fn set_selection(&mut self, selection: Selection) {
        let len = self.len();
        self.selection = selection.map(|offset| offset.min(len));
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    /// Get the buffer length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lines; an empty document and a trailing newline each count one line.
    pub fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.len()) + 1
    }

    /// 0-based line containing `offset`. Offsets inside a character count
    /// as that character's start.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.buffer.line_of_offset(self.floor_char_boundary(offset))
    }

    /// Largest char boundary at or before `offset`, clamped to the document.
    pub fn floor_char_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        if self.is_char_boundary(offset) {
            offset
        } else {
            self.buffer.prev_codepoint_offset(offset).unwrap_or(0)
        }
    }

    /// Start offset of a 0-based line.
    pub fn offset_of_line(&self, line: usize) -> usize {
        self.buffer.offset_of_line(line.min(self.line_count() - 1))
    }

    pub fn lines(&self) -> impl Iterator<Item = LineRef> + '_ {
        lines_with_spans(&self.buffer)
    }

    /// Offset of the character before `offset`, if any.
    pub fn prev_char_boundary(&self, offset: usize) -> Option<usize> {
        self.buffer.prev_codepoint_offset(offset.min(self.len()))
    }

    /// Offset of the character after `offset`, if any.
    pub fn next_char_boundary(&self, offset: usize) -> Option<usize> {
        self.buffer.next_codepoint_offset(offset)
    }

    /// Slice the buffer to a cow string, clamping the range to the document.
    pub fn slice_to_cow(&self, range: std::ops::Range<usize>) -> std::borrow::Cow<'_, str> {
        let doc_len = self.buffer.len();
        let start = range.start.min(doc_len);
        let end = range.end.min(doc_len).max(start);
        self.buffer.slice_to_cow(start..end)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("selection", &self.selection)
            .field("version", &self.version)
            .finish()
    }
}
