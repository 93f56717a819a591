pub mod autocomplete;
pub mod detail_view;
pub mod form_view;
pub mod header;
pub mod help_overlay;
pub mod map_view;
pub mod search_bar;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};

use crate::ops::forms::AdminForm;
use crate::ops::widget::WidgetState;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let search_h = if app.search.is_visible() {
        search_bar::height(app)
    } else {
        0
    };

    // Layout: search form | header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(search_h),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Set again by whichever input has focus
    app.suggestion_anchor = None;

    if app.search.is_visible() {
        search_bar::render_search_bar(frame, app, chunks[0]);
    }
    header::render_header(frame, app, chunks[1]);

    if app.has_admin_row() {
        detail_view::render_detail_view(frame, app, chunks[2]);
    } else {
        let hint = Paragraph::new(" Type to search; Enter opens the results in your browser")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(hint, chunks[2]);
    }

    status_row::render_status_row(frame, app, chunks[3]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    // Suggestions float above everything else
    if let (Some(anchor), Some(widget)) = (app.suggestion_anchor, focused_widget(app)) {
        autocomplete::render_suggestions(frame, app, widget, anchor);
    }
}

/// The autocomplete widget that currently receives keys
pub fn focused_widget(app: &App) -> Option<&WidgetState> {
    match app.mode {
        Mode::Search => Some(&app.search.widget),
        Mode::Form => match app.form.as_ref().map(|o| &o.form) {
            Some(AdminForm::Tag(f)) => Some(&f.widget),
            _ => None,
        },
        Mode::Navigate => None,
    }
}
