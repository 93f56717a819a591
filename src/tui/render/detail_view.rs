use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::controls::Control;
use crate::tui::app::{App, Mode};
use crate::util::text::truncate_to_width;

use super::form_view;
use super::map_view;

/// The button row: every control as its icon, selected one highlighted,
/// disabled one dimmed
fn button_line<'a>(app: &App) -> Line<'a> {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, control) in Control::ALL.iter().enumerate() {
        let mut style = Style::default().fg(app.theme.text_bright).bg(bg);
        if app.buttons.is_disabled(*control) || app.busy {
            style = style.fg(app.theme.dim);
        }
        if app.mode == Mode::Navigate && i == app.buttons.selected {
            style = style
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", control.icon()), style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }
    Line::from(spans)
}

/// Meta lines of the page, then grade and position
fn info_lines<'a>(app: &App, width: usize) -> Vec<Line<'a>> {
    let bg = app.theme.background;
    let text = Style::default().fg(app.theme.text).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let mut lines = Vec::new();

    let Some(details) = &app.details else {
        lines.push(Line::from(Span::styled(" Loading\u{2026}", dim)));
        return lines;
    };

    for meta in &details.meta {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!(" {meta}"), width),
            text,
        )));
    }

    let mut facts = vec![Span::styled(" ", text)];
    match details.grade {
        Some(g) => facts.push(Span::styled(
            format!("Grade {g}"),
            Style::default().fg(app.theme.yellow).bg(bg),
        )),
        None => facts.push(Span::styled("Ungraded", dim)),
    }
    if let Some(pos) = details.position {
        facts.push(Span::styled("  ", text));
        facts.push(Span::styled(pos.to_string(), dim));
    }
    lines.push(Line::from(facts));

    if let Some(map) = &app.map {
        let links = map.links();
        if !links.is_empty() {
            lines.push(Line::from(Span::styled(
                truncate_to_width(&format!(" {}", links.join(" ")), width),
                dim,
            )));
        }
    }
    lines
}

/// Render the detail view: info and buttons with the open form on the left,
/// the map on the right (or the whole area when zoomed)
pub fn render_detail_view(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.zoom && app.map.is_some() {
        map_view::render_map_view(frame, app, area);
        return;
    }

    let (left, right) = if app.map.is_some() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        (cols[0], Some(cols[1]))
    } else {
        (area, None)
    };

    let width = left.width as usize;
    let mut lines = info_lines(app, width);
    lines.push(Line::from(""));
    lines.push(button_line(app));
    let selected = app.buttons.selected_control();
    lines.push(Line::from(Span::styled(
        format!("  {}  [{}]", selected.title(), selected.key()),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )));

    let info_h = (lines.len() as u16).min(left.height);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(info_h), Constraint::Min(0)])
        .split(left);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        rows[0],
    );

    let form_h = app
        .form
        .as_ref()
        .map(|open| form_view::height(&open.form, rows[1].height));
    if let Some(h) = form_h {
        let form_area = Rect::new(rows[1].x, rows[1].y, rows[1].width, h);
        form_view::render_form(frame, app, form_area);
    }

    if let Some(right) = right {
        map_view::render_map_view(frame, app, right);
    }
}
