use markdown_furigana_config::SettingsStore;
use markdown_furigana_engine::parsing::rope::Span as ByteSpan;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

const RUBY_STYLE: Style = Style::new().fg(Color::Yellow);
const CARET_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub fn ui<S: SettingsStore>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    app.set_height(chunks[0].height.saturating_sub(2) as usize);

    let title = format!(
        "{}{}",
        app.path().display(),
        if app.is_dirty() { " [+]" } else { "" }
    );
    let content = Paragraph::new(visible_lines(app))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, chunks[0]);

    render_status(f, app, chunks[1]);

    let help = Line::from(vec![
        Span::raw("Esc: Quit | "),
        Span::raw("Ctrl+S: Save | "),
        Span::raw(format!("{}: Toggle furigana", app.toggle_command().key)),
    ]);
    f.render_widget(Paragraph::new(help), chunks[2]);
}

fn render_status<S: SettingsStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let label = format!(
        "[furigana: {}]",
        if app.furigana_visible() { "on" } else { "off" }
    );
    let width = (label.chars().count() as u16).min(area.width);
    let toggle_area = Rect::new(area.x + area.width - width, area.y, width, 1);
    let message_area = Rect::new(area.x, area.y, area.width - width, 1);

    let caret = app.caret();
    let line = app.document().line_of_offset(caret) + 1;
    let message = format!(
        "{line}:{caret} | {} decorations | {}",
        app.decorations().len(),
        app.status()
    );
    f.render_widget(Paragraph::new(message), message_area);
    f.render_widget(
        Paragraph::new(Span::styled(label, CARET_STYLE)),
        toggle_area,
    );
    app.toggle_area = Some(toggle_area);
}

fn visible_lines<S: SettingsStore>(app: &App<S>) -> Vec<Line<'static>> {
    let end = app.document().line_count();
    let viewport = app.viewport();
    let mut lines = Vec::new();
    let mut line = app.scroll();
    while line < end {
        let content = app.line_content(line);
        if content.start > viewport.end {
            break;
        }
        lines.push(render_line(app, content.start, content.end));
        line += 1;
    }
    lines
}

/// One source line with decorated annotations swapped for their widget text.
fn render_line<S: SettingsStore>(app: &App<S>, start: usize, end: usize) -> Line<'static> {
    let doc = app.document();
    let caret = app.caret();
    let visible = app.furigana_visible();
    let mut spans = Vec::new();
    let mut pos = start;

    for deco in app.decorations().in_span(ByteSpan::new(start, end)) {
        push_raw(&mut spans, &doc.slice_to_cow(pos..deco.from()), pos, caret);
        spans.push(Span::styled(deco.widget.to_text(visible), RUBY_STYLE));
        pos = deco.to();
    }
    push_raw(&mut spans, &doc.slice_to_cow(pos..end), pos, caret);

    if caret == end {
        spans.push(Span::styled(" ", CARET_STYLE));
    }
    Line::from(spans)
}

/// Pushes source text starting at byte `offset`, highlighting the caret cell.
fn push_raw(spans: &mut Vec<Span<'static>>, text: &str, offset: usize, caret: usize) {
    if text.is_empty() {
        return;
    }
    let Some(at) = caret.checked_sub(offset).filter(|at| *at < text.len()) else {
        spans.push(Span::raw(text.to_string()));
        return;
    };
    let (before, rest) = text.split_at(at);
    let width = rest.chars().next().map_or(0, char::len_utf8);
    let (under, after) = rest.split_at(width);
    for (part, style) in [
        (before, Style::default()),
        (under, CARET_STYLE),
        (after, Style::default()),
    ] {
        if !part.is_empty() {
            spans.push(Span::styled(part.to_string(), style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_raw_marks_caret_cell() {
        let mut spans = Vec::new();
        push_raw(&mut spans, "日本語", 10, 13);
        let parts: Vec<_> = spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(parts, vec!["日", "本", "語"]);
        assert_eq!(spans[1].style, CARET_STYLE);
    }

    #[test]
    fn test_push_raw_without_caret() {
        let mut spans = Vec::new();
        push_raw(&mut spans, "abc", 0, 3);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "abc");
    }
}
