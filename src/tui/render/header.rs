use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::text::{display_width, truncate_to_width};

/// Render the title row (app name, photo title, image path, busy marker)
/// with a separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let sep = Span::styled(" \u{2502} ", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "\u{25B6}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            " darkroom",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let title = app.details.as_ref().and_then(|d| d.title.as_deref());
    if let Some(title) = title {
        spans.push(sep.clone());
        spans.push(Span::styled(
            truncate_to_width(title, (area.width as usize) / 2),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }
    if let Some(imgid) = app.imgid {
        spans.push(sep.clone());
        spans.push(Span::styled(
            format!("/img/{imgid}"),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(sep);
        spans.push(Span::styled(
            "Search",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    if app.busy {
        let busy = "\u{22EF} working ";
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let room = (area.width as usize).saturating_sub(used);
        if room > display_width(busy) {
            spans.push(Span::styled(
                " ".repeat(room - display_width(busy)),
                bg_style,
            ));
            spans.push(Span::styled(
                busy,
                Style::default().fg(app.theme.yellow).bg(bg),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), chunks[0]);

    let rule = "\u{2500}".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(rule, Style::default().fg(app.theme.dim).bg(bg))),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_with_title_and_busy_marker() {
        let (_rt, mut app) = detail_app(sample_details());
        app.busy = true;
        let output = render_to_string(60, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        let first = output.lines().next().unwrap_or_default();
        assert!(first.starts_with(" \u{25B6} darkroom \u{2502} Midsummer \u{2502} /img/4711"));
        assert!(first.ends_with("\u{22EF} working"));
    }
}
