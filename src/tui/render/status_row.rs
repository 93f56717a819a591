use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::forms::AdminForm;
use crate::tui::app::{App, Mode};
use crate::util::text::{display_width, truncate_to_width};

/// Key hints for the current mode
fn hint(app: &App) -> &'static str {
    match app.mode {
        Mode::Navigate => "\u{2190}\u{2192} select  Enter open  ? help",
        Mode::Search => "Enter search  Esc close",
        Mode::Form => match app.form.as_ref().map(|o| &o.form) {
            Some(AdminForm::Grade(_)) => "\u{2190}\u{2192} adjust  Enter save  Esc cancel",
            Some(AdminForm::Locate(_)) => "arrows move  +/- zoom  Enter save  Esc cancel",
            _ => "Enter save  Esc cancel",
        },
    }
}

/// Render the status row (bottom of screen): alert, then status message,
/// then key hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mut spans, right) = if let Some(alert) = &app.alert {
        let msg = truncate_to_width(&format!(" {alert}"), width.saturating_sub(16));
        (
            vec![Span::styled(
                msg,
                Style::default()
                    .fg(app.theme.red)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )],
            "Enter dismiss",
        )
    } else if let Some(status) = &app.status {
        let msg = truncate_to_width(&format!(" {status}"), width);
        (
            vec![Span::styled(msg, Style::default().fg(app.theme.green).bg(bg))],
            "",
        )
    } else {
        (Vec::new(), hint(app))
    };

    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let right_width = display_width(right);
    if !right.is_empty() && used + right_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - right_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
