use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use markdown_furigana_config::{Modifier, SettingsStore, ToggleCommand, Visibility};
use markdown_furigana_engine::{
    Cmd, DecorationSet, Document, LiveView, Selection, ViewUpdate, io, parsing::rope::Span,
};
use ratatui::layout::{Position, Rect};

/// Something the user asked the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Save,
    ToggleFurigana,
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Ignore,
}

/// Translate a key press, checking the toggle binding first.
pub fn action_for(key: &KeyEvent, toggle: &ToggleCommand) -> Action {
    if let KeyCode::Char(c) = key.code {
        if toggle.key.matches(&held_modifiers(key.modifiers), c) {
            return Action::ToggleFurigana;
        }
        if key.modifiers == KeyModifiers::CONTROL && c.eq_ignore_ascii_case(&'s') {
            return Action::Save;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Action::Ignore;
        }
        return Action::Insert(c);
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::Newline,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        _ => Action::Ignore,
    }
}

fn held_modifiers(modifiers: KeyModifiers) -> Vec<Modifier> {
    let mut held = Vec::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        held.push(Modifier::Ctrl);
    }
    if modifiers.contains(KeyModifiers::ALT) {
        held.push(Modifier::Alt);
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        held.push(Modifier::Shift);
    }
    held
}

/// State of the live view editor.
pub struct App<S: SettingsStore> {
    path: PathBuf,
    document: Document,
    view: LiveView,
    visibility: Visibility<S>,
    toggle: ToggleCommand,
    /// First visible line, 0-based.
    scroll: usize,
    height: usize,
    dirty: bool,
    status: String,
    /// Where the status-bar toggle was last drawn.
    pub toggle_area: Option<Rect>,
}

impl<S: SettingsStore> App<S> {
    pub fn new(path: PathBuf, content: &str, visibility: Visibility<S>) -> Self {
        let mut document = Document::from_text(content);
        document.set_selection(Selection::cursor(0));
        let view = LiveView::new(&document);
        Self {
            path,
            document,
            view,
            visibility,
            toggle: ToggleCommand::default(),
            scroll: 0,
            height: 0,
            dirty: false,
            status: String::new(),
            toggle_area: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn decorations(&self) -> &DecorationSet {
        self.view.decorations()
    }

    pub fn rebuilds(&self) -> u64 {
        self.view.rebuilds()
    }

    pub fn furigana_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn toggle_command(&self) -> &ToggleCommand {
        &self.toggle
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn caret(&self) -> usize {
        self.document
            .selection()
            .primary()
            .map(|range| range.to)
            .unwrap_or(0)
    }

    /// Applies an action; returns false when the editor should exit.
    pub fn perform(&mut self, action: Action) -> bool {
        let result = match action {
            Action::Quit => return false,
            Action::Ignore => Ok(()),
            Action::Save => self.save(),
            Action::ToggleFurigana => {
                self.toggle_furigana();
                Ok(())
            }
            Action::Insert(c) => self.insert(&c.to_string()),
            Action::Newline => self.insert("\n"),
            Action::Backspace => self.backspace(),
            Action::Delete => self.delete_forward(),
            Action::Left => {
                let target = self.document.prev_char_boundary(self.caret());
                self.move_caret(target);
                Ok(())
            }
            Action::Right => {
                let target = self.document.next_char_boundary(self.caret());
                self.move_caret(target);
                Ok(())
            }
            Action::Up => {
                let line = self.document.line_of_offset(self.caret());
                if line > 0 {
                    self.move_to_line(line - 1);
                }
                Ok(())
            }
            Action::Down => {
                let line = self.document.line_of_offset(self.caret());
                if line + 1 < self.document.line_count() {
                    self.move_to_line(line + 1);
                }
                Ok(())
            }
            Action::Home => {
                let line = self.document.line_of_offset(self.caret());
                let start = self.line_content(line).start;
                self.move_caret(Some(start));
                Ok(())
            }
            Action::End => {
                let line = self.document.line_of_offset(self.caret());
                let end = self.line_content(line).end;
                self.move_caret(Some(end));
                Ok(())
            }
        };

        if let Err(e) = result {
            log::warn!("{action:?} failed: {e}");
            self.status = format!("Error: {e}");
        }
        true
    }

    /// Flips reading visibility. Both the key binding and the status-bar
    /// click land here.
    pub fn toggle_furigana(&mut self) {
        match self.visibility.toggle() {
            Ok(visible) => {
                self.status = format!("Furigana {}", if visible { "shown" } else { "hidden" });
            }
            Err(e) => {
                log::warn!("could not save furigana setting: {e}");
                self.status = format!("Furigana toggled but not saved: {e}");
            }
        }
    }

    /// Handles a left click at a terminal cell.
    pub fn click(&mut self, column: u16, row: u16) {
        if let Some(area) = self.toggle_area
            && area.contains(Position::new(column, row))
        {
            self.toggle_furigana();
        }
    }

    /// Records the number of text rows on screen and rebuilds for the new
    /// viewport if it moved.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.scroll_to_caret();
    }

    /// Byte span of the lines currently on screen.
    pub fn viewport(&self) -> Span {
        let start = self.document.offset_of_line(self.scroll);
        let end = if self.scroll + self.height >= self.document.line_count() {
            self.document.len()
        } else {
            self.document.offset_of_line(self.scroll + self.height)
        };
        Span::new(start, end)
    }

    /// Content span (no line break) of a 0-based line.
    pub fn line_content(&self, line: usize) -> Span {
        self.document
            .lines()
            .nth(line)
            .map(|l| l.content)
            .unwrap_or_else(|| Span::new(self.document.len(), self.document.len()))
    }

    fn insert(&mut self, text: &str) -> Result<()> {
        let at = self.caret();
        self.edit(Cmd::InsertText {
            at,
            text: text.to_string(),
        })
    }

    fn backspace(&mut self) -> Result<()> {
        let caret = self.caret();
        match self.document.prev_char_boundary(caret) {
            Some(prev) => self.edit(Cmd::DeleteRange { range: prev..caret }),
            None => Ok(()),
        }
    }

    fn delete_forward(&mut self) -> Result<()> {
        let caret = self.caret();
        match self.document.next_char_boundary(caret) {
            Some(next) => self.edit(Cmd::DeleteRange { range: caret..next }),
            None => Ok(()),
        }
    }

    fn edit(&mut self, cmd: Cmd) -> Result<()> {
        let patch = self.document.apply(cmd)?;
        log::trace!("v{}: inserted {:?}", patch.version, patch.changed);
        self.dirty = true;
        self.view
            .update(Some(&self.document), &ViewUpdate::doc_changed());
        self.scroll_to_caret();
        Ok(())
    }

    fn move_caret(&mut self, target: Option<usize>) {
        let Some(offset) = target else {
            return;
        };
        self.document.set_selection(Selection::cursor(offset));
        self.view
            .update(Some(&self.document), &ViewUpdate::selection_set());
        self.scroll_to_caret();
    }

    /// Moves to `line`, keeping the character column where possible.
    fn move_to_line(&mut self, line: usize) {
        let caret = self.caret();
        let current = self.line_content(self.document.line_of_offset(caret));
        let column = self
            .document
            .slice_to_cow(current.start..caret)
            .chars()
            .count();

        let target = self.line_content(line);
        let text = self.document.slice_to_cow(target.as_range());
        let offset = text
            .char_indices()
            .nth(column)
            .map(|(i, _)| target.start + i)
            .unwrap_or(target.end);
        self.move_caret(Some(offset));
    }

    fn scroll_to_caret(&mut self) {
        let line = self.document.line_of_offset(self.caret());
        if line < self.scroll {
            self.scroll = line;
        } else if self.height > 0 && line >= self.scroll + self.height {
            self.scroll = line + 1 - self.height;
        }
        let update = self.view.set_viewport(Some(self.viewport()));
        self.view.update(Some(&self.document), &update);
    }

    fn save(&mut self) -> Result<()> {
        io::write_file(&self.path, self.document.to_bytes())?;
        self.dirty = false;
        self.status = format!("Saved {}", self.path.display());
        log::info!("saved {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_furigana_config::MemoryStore;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn app(content: &str) -> App<MemoryStore> {
        let visibility = Visibility::load(MemoryStore::new()).unwrap();
        let mut app = App::new(PathBuf::from("note.md"), content, visibility);
        app.set_height(10);
        app
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_mapping() {
        let toggle = ToggleCommand::default();
        let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;

        assert_eq!(
            action_for(&key(KeyCode::Char('f'), ctrl_alt), &toggle),
            Action::ToggleFurigana
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('s'), KeyModifiers::CONTROL), &toggle),
            Action::Save
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('f'), KeyModifiers::NONE), &toggle),
            Action::Insert('f')
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('F'), KeyModifiers::SHIFT), &toggle),
            Action::Insert('F')
        );
        assert_eq!(
            action_for(&key(KeyCode::Esc, KeyModifiers::NONE), &toggle),
            Action::Quit
        );
    }

    #[test]
    fn test_caret_inside_annotation_shows_source() {
        // The app starts with the caret at 0, touching the annotation.
        let mut app = app("{日|ひ} and text");
        assert!(app.decorations().is_empty());

        app.perform(Action::End);
        assert_eq!(app.decorations().len(), 1);
    }

    #[test]
    fn test_typing_rebuilds_decorations() {
        let mut app = app("x");
        app.perform(Action::End);
        let before = app.rebuilds();

        for c in " {日|ひ} ".chars() {
            app.perform(Action::Insert(c));
        }

        assert_eq!(app.document().text(), "x {日|ひ} ");
        assert!(app.rebuilds() > before);
        assert!(app.is_dirty());
        // Caret sits one past the closing brace, so the annotation renders.
        let deco = app.decorations().iter().next().unwrap();
        assert_eq!((deco.from(), deco.to()), (2, 11));
    }

    #[test]
    fn test_backspace_and_delete_respect_char_boundaries() {
        let mut app = app("日本");
        app.perform(Action::End);
        app.perform(Action::Backspace);
        assert_eq!(app.document().text(), "日");

        app.perform(Action::Home);
        app.perform(Action::Delete);
        assert_eq!(app.document().text(), "");

        app.perform(Action::Backspace);
        assert_eq!(app.document().text(), "");
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        let mut app = app("abcd\nxy\n日本語です");
        app.perform(Action::Right);
        app.perform(Action::Right);
        app.perform(Action::Down);
        assert_eq!(app.caret(), 7);
        app.perform(Action::Down);
        assert_eq!(app.caret(), 8 + "日本".len());
        app.perform(Action::Up);
        app.perform(Action::Up);
        assert_eq!(app.caret(), 2);
    }

    #[test]
    fn test_toggle_key_and_click_share_one_effect() {
        let mut app = app("{日|ひ}");
        assert!(app.furigana_visible());

        app.perform(Action::ToggleFurigana);
        assert!(!app.furigana_visible());

        app.toggle_area = Some(Rect::new(10, 5, 8, 1));
        app.click(0, 0);
        assert!(!app.furigana_visible());
        app.click(12, 5);
        assert!(app.furigana_visible());
    }

    #[test]
    fn test_viewport_follows_caret() {
        let content = (0..30).map(|i| format!("{{日|ひ}} {i}\n")).collect::<String>();
        let mut app = app(&content);
        for _ in 0..15 {
            app.perform(Action::Down);
        }

        assert_eq!(app.scroll(), 6);
        // Lines touching either edge of the viewport are decorated too.
        let first = app.document().offset_of_line(5);
        let last = app.document().offset_of_line(17);
        let decorations = app.decorations();
        assert!(!decorations.is_empty());
        assert!(decorations.len() <= 12);
        assert!(decorations.iter().all(|d| d.from() >= first && d.to() <= last));
    }

    #[test]
    fn test_save_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("note.md");
        let visibility = Visibility::load(MemoryStore::new()).unwrap();
        let mut app = App::new(path.clone(), "", visibility);

        app.perform(Action::Insert('字'));
        app.perform(Action::Save);

        assert!(!app.is_dirty());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "字");
    }

    #[test]
    fn test_quit() {
        assert!(!app("").perform(Action::Quit));
    }
}
