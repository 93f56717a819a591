use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::LookupScope;
use crate::ops::suggest_list::Focus;
use crate::ops::widget::WidgetState;
use crate::tui::app::App;
use crate::util::text::{display_width, fit_to_width, truncate_to_width};

/// Entry text as shown in the list. Mixed-kind lists name the kind.
fn entry_label(widget: &WidgetState, idx: usize) -> Option<(String, Option<&'static str>)> {
    let s = widget.list().get(idx)?;
    Some(match widget.config().scope {
        LookupScope::Global => (s.text.clone(), Some(s.kind.path())),
        LookupScope::Category(_) => (s.text.clone(), None),
    })
}

/// Render a widget's suggestion list floating directly below its input:
/// top = input top + input height, left = input left. Nothing is drawn
/// for an empty list.
pub fn render_suggestions(frame: &mut Frame, app: &App, widget: &WidgetState, anchor: Rect) {
    let list = widget.list();
    if list.is_empty() {
        return;
    }

    let bg = app.theme.background;
    let text_color = app.theme.text;
    let bright = app.theme.text_bright;
    let dim = app.theme.dim;
    let max_visible = app.config.lookup.max_visible.max(1);

    let term_area = frame.area();
    let room_below = term_area.height.saturating_sub(anchor.y + anchor.height) as usize;
    // Rows actually drawn: the configured maximum, less what the border
    // and the bottom of the terminal take
    let count = list.len().min(max_visible).min(room_below.saturating_sub(2));
    if count == 0 {
        return;
    }
    let selected = match widget.focus() {
        Focus::OnListItem(i) => Some(i),
        Focus::OnInput => None,
    };

    // Scroll window around the focused item
    let scroll_start = match selected {
        Some(i) if i >= count => i - count + 1,
        _ => 0,
    };

    let labels: Vec<(String, Option<&'static str>)> = (scroll_start..scroll_start + count)
        .filter_map(|i| entry_label(widget, i))
        .collect();

    let max_width = labels
        .iter()
        .map(|(t, k)| display_width(t) + k.map_or(0, |k| k.len() + 3))
        .max()
        .unwrap_or(10)
        + 4; // marker + padding

    let room_right = term_area.width.saturating_sub(anchor.x);
    let popup_w = (max_width as u16 + 2).min(room_right).max(12.min(room_right));
    let popup_h = count as u16 + 2;
    if popup_w < 3 {
        return;
    }
    let popup_area = Rect::new(anchor.x, anchor.y + anchor.height, popup_w, popup_h);
    let inner_w = popup_w.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (i, (text, kind)) in labels.into_iter().enumerate() {
        let actual_idx = scroll_start + i;
        let is_selected = selected == Some(actual_idx);

        let style = if is_selected {
            Style::default()
                .fg(bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text_color).bg(bg)
        };

        let prefix = if is_selected { " \u{25B8} " } else { "   " };
        let mut spans = vec![Span::styled(prefix, style)];
        let budget = inner_w.saturating_sub(3);
        match (kind, list.get(actual_idx)) {
            (Some(kind), Some(s)) => {
                let suffix = format!(" ({kind})");
                let text = truncate_to_width(&text, budget.saturating_sub(suffix.len()));
                let pad = budget.saturating_sub(display_width(&text) + suffix.len());
                spans.push(Span::styled(text, style));
                spans.push(Span::styled(
                    suffix,
                    style.fg(app.theme.kind_color(s.kind)),
                ));
                spans.push(Span::styled(" ".repeat(pad), style));
            }
            _ => spans.push(Span::styled(fit_to_width(&text, budget), style)),
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}
