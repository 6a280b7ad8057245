use xi_rope::{Delta, Rope, RopeInfo, delta::Builder};

/// An edit to the live document.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText {
        at: usize,
        text: String,
    },
    DeleteRange {
        range: std::ops::Range<usize>,
    },
    ReplaceRange {
        range: std::ops::Range<usize>,
        text: String,
    },
}

impl Cmd {
    /// The byte range of the current buffer this command replaces.
    pub fn target(&self) -> std::ops::Range<usize> {
        match self {
            Cmd::InsertText { at, .. } => *at..*at,
            Cmd::DeleteRange { range } | Cmd::ReplaceRange { range, .. } => range.clone(),
        }
    }

    /// The text this command inserts in place of [`Cmd::target`].
    pub fn inserted(&self) -> &str {
        match self {
            Cmd::InsertText { text, .. } | Cmd::ReplaceRange { text, .. } => text,
            Cmd::DeleteRange { .. } => "",
        }
    }
}

/// Compile a command into a delta over a buffer of `len` bytes.
pub(crate) fn compile_command(len: usize, cmd: &Cmd) -> Delta<RopeInfo> {
    let mut builder = Builder::new(len);
    let target = cmd.target();
    match cmd.inserted() {
        "" => builder.delete(target),
        text => builder.replace(target, Rope::from(text)),
    }
    builder.build()
}

/// Maps a pre-edit offset to its post-edit position.
///
/// Offsets at or after an insertion point move right with the inserted text;
/// offsets inside a removed range collapse to its start.
pub(crate) fn map_offset(offset: usize, cmd: &Cmd) -> usize {
    let target = cmd.target();
    let inserted = cmd.inserted().len();
    if offset < target.start {
        offset
    } else if offset >= target.end {
        offset - target.len() + inserted
    } else {
        // Inside the replaced range: land after whatever was inserted.
        target.start + inserted
    }
}
