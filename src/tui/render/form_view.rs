use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::ops::controls::Control;
use crate::ops::forms::{AdminForm, GradeForm, LocateForm, TagForm};
use crate::tui::app::{App, Mode};

use super::map_view::{Pin, draw_map};
use super::search_bar::{input_line, refs_line};

/// Rows the open form wants; the location form takes what is left.
pub fn height(form: &AdminForm, available: u16) -> u16 {
    let wanted = match form {
        AdminForm::Tag(f) => 3 + u16::from(!f.refs.is_empty()) + 1,
        AdminForm::Grade(_) => 3,
        AdminForm::Locate(_) => available.max(8),
    };
    wanted.min(available)
}

fn form_block<'a>(app: &App, title: String) -> Block<'a> {
    let bg = app.theme.background;
    let border = if app.busy {
        app.theme.dim
    } else {
        app.theme.selection_border
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg))
}

/// Render whichever admin form is open
pub fn render_form(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(open) = app.form.as_ref() else {
        return;
    };
    match &open.form {
        AdminForm::Tag(f) => {
            let anchor = render_tag_form(frame, app, f, area);
            if app.mode == Mode::Form {
                app.suggestion_anchor = anchor;
            }
        }
        AdminForm::Grade(f) => render_grade_form(frame, app, f, area),
        AdminForm::Locate(f) => render_locate_form(frame, app, f, area),
    }
}

/// Returns the input row, where suggestions attach
fn render_tag_form(frame: &mut Frame, app: &App, form: &TagForm, area: Rect) -> Option<Rect> {
    let category = form.category;
    let block = form_block(app, format!(" {} {} ", category.icon(), category.title()));
    let inner = block.inner(area);
    let focused = app.mode == Mode::Form && !app.busy;

    let mut lines = vec![input_line(&app.theme, form.widget.text(), focused)];
    if !form.refs.is_empty() {
        lines.push(refs_line(&app.theme, &form.refs, focused, false));
    }
    if app.busy {
        lines.push(Line::from(Span::styled(
            " saving\u{2026}",
            Style::default().fg(app.theme.yellow).bg(app.theme.background),
        )));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);

    (inner.height > 0).then(|| Rect::new(inner.x, inner.y, inner.width, 1))
}

fn render_grade_form(frame: &mut Frame, app: &App, form: &GradeForm, area: Rect) {
    let block = form_block(app, format!(" {} Grade ", Control::Grade.icon()));
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(app.theme.highlight)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .percent(u16::from(form.value.min(100)))
        .label(format!("Grade {}", form.value));
    frame.render_widget(gauge, area);
}

fn render_locate_form(frame: &mut Frame, app: &App, form: &LocateForm, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let bg = app.theme.background;
    let caption = format!(
        " {} \u{00B7} zoom {}",
        form.marker, form.viewport.zoom
    );
    frame.render_widget(
        Paragraph::new(Span::styled(caption, Style::default().fg(app.theme.text).bg(bg))),
        chunks[0],
    );

    let block = form_block(
        app,
        format!(" {} Location ", Control::Location.icon()),
    );
    let pins = [Pin {
        pos: form.marker,
        glyph: "\u{271A}".to_string(),
    }];
    draw_map(frame, &app.theme, &form.viewport, &pins, block, chunks[1]);
}
