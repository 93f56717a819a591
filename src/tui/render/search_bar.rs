use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::RefSet;
use crate::tui::app::{App, Mode};
use crate::tui::theme::Theme;

/// Rows taken by the search form: borders, input, and references if any
pub fn height(app: &App) -> u16 {
    if app.search.refs.is_empty() { 3 } else { 4 }
}

/// Input line with a block cursor when focused
pub(super) fn input_line<'a>(theme: &Theme, text: &str, focused: bool) -> Line<'a> {
    let bg = theme.background;
    let mut spans = vec![
        Span::styled(" \u{203A} ", Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(
            text.to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ),
    ];
    if focused {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }
    Line::from(spans)
}

/// Attached references as checkboxes: `[x] Paris (place)`
pub(super) fn refs_line<'a>(theme: &Theme, refs: &RefSet, focused: bool, with_kind: bool) -> Line<'a> {
    let bg = theme.background;
    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, r) in refs.iter().enumerate() {
        let mark = if r.checked { "[x]" } else { "[ ]" };
        let mut style = Style::default().fg(theme.kind_color(r.kind)).bg(bg);
        if !r.checked {
            style = style.fg(theme.dim);
        }
        if focused && i == refs.cursor {
            style = style.bg(theme.selection_bg).add_modifier(Modifier::BOLD);
        }
        let label = if with_kind {
            format!("{mark} {} ({})", r.label, r.kind.path())
        } else {
            format!("{mark} {}", r.label)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::styled("  ", Style::default().bg(bg)));
    }
    Line::from(spans)
}

pub fn render_search_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.mode == Mode::Search;
    let border = if focused {
        app.theme.selection_border
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search ")
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);

    let mut lines = vec![input_line(&app.theme, app.search.widget.text(), focused)];
    if !app.search.refs.is_empty() {
        lines.push(refs_line(&app.theme, &app.search.refs, focused, true));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if focused && inner.height > 0 {
        app.suggestion_anchor = Some(Rect::new(inner.x, inner.y, inner.width, 1));
    }
}
