use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::forms::AdminForm;
use crate::ops::widget::WidgetEvent;
use crate::tui::app::{App, Mode};
use crate::tui::lookup;

use super::widget_event;

/// What a form key asks of the app once the form is no longer borrowed
enum After {
    Nothing,
    Submit,
    Close,
}

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    // Requests in flight decide what the form does next
    if app.busy {
        return;
    }
    let step = app.config.map.step_fraction;
    let after = match app.form.as_mut().map(|o| &mut o.form) {
        None => {
            app.mode = Mode::Navigate;
            After::Nothing
        }
        Some(AdminForm::Tag(_)) => {
            handle_tag_key(app, key);
            After::Nothing
        }
        Some(AdminForm::Grade(g)) => match key.code {
            KeyCode::Left => adjust(|| g.step(-1)),
            KeyCode::Right => adjust(|| g.step(1)),
            KeyCode::PageDown => adjust(|| g.step(-10)),
            KeyCode::PageUp => adjust(|| g.step(10)),
            KeyCode::Home => adjust(|| g.value = 0),
            KeyCode::End => adjust(|| g.value = 100),
            KeyCode::Enter => After::Submit,
            KeyCode::Esc => After::Close,
            _ => After::Nothing,
        },
        Some(AdminForm::Locate(l)) => match key.code {
            KeyCode::Up => adjust(|| l.nudge(1, 0, step)),
            KeyCode::Down => adjust(|| l.nudge(-1, 0, step)),
            KeyCode::Left => adjust(|| l.nudge(0, -1, step)),
            KeyCode::Right => adjust(|| l.nudge(0, 1, step)),
            KeyCode::Char('+') | KeyCode::Char('=') => adjust(|| l.zoom_in()),
            KeyCode::Char('-') => adjust(|| l.zoom_out()),
            KeyCode::Enter => After::Submit,
            KeyCode::Esc => After::Close,
            _ => After::Nothing,
        },
    };
    match after {
        After::Submit => app.submit_form(),
        After::Close => app.close_form(),
        After::Nothing => {}
    }
}

fn adjust(mut f: impl FnMut()) -> After {
    f();
    After::Nothing
}

fn handle_tag_key(app: &mut App, key: KeyEvent) {
    if dispatch_tag(app, widget_event(key)) {
        return;
    }
    if key.code == KeyCode::Enter {
        app.submit_form();
        return;
    }
    let Some(AdminForm::Tag(form)) = app.form.as_mut().map(|o| &mut o.form) else {
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Tab) => form.refs.move_cursor(true),
        (_, KeyCode::BackTab) => form.refs.move_cursor(false),
        (m, KeyCode::Char(' ')) if m.contains(KeyModifiers::CONTROL) => {
            form.refs.toggle_at_cursor()
        }
        _ => {}
    }
}

/// Feed one event to the open tag form's widget and run what it asks
/// for. Returns whether the widget consumed the key.
pub(super) fn dispatch_tag(app: &mut App, event: WidgetEvent) -> bool {
    let Some(open) = &mut app.form else {
        return false;
    };
    let AdminForm::Tag(form) = &mut open.form else {
        return false;
    };
    let (handled, applied) = form.dispatch(event);
    if let Some(fetcher) = &open.fetcher {
        lookup::issue(fetcher, &applied.fetches);
    }
    if applied.close {
        app.close_form();
    }
    handled
}
