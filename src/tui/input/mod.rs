mod form;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::ops::forms::AdminForm;
use crate::ops::widget::{NavKey, WidgetEvent};

use form::handle_form;
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // An alert blocks everything until acknowledged
    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.alert = None;
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    app.status = None;
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Form => handle_form(app, key),
        Mode::Search => handle_search(app, key),
    }
}

/// Handle a bracketed paste: appended to the focused widget's text as one
/// change, so it costs a single lookup.
pub fn handle_paste(app: &mut App, text: &str) {
    let clean = text.replace(['\n', '\r'], " ");
    if clean.is_empty() {
        return;
    }
    match app.mode {
        Mode::Search => {
            let joined = format!("{}{}", app.search.widget.text(), clean);
            search::dispatch_search(app, WidgetEvent::SetText(joined));
        }
        Mode::Form => {
            let current = match app.form.as_ref().map(|o| &o.form) {
                Some(AdminForm::Tag(f)) => f.widget.text().to_string(),
                _ => return,
            };
            form::dispatch_tag(app, WidgetEvent::SetText(current + &clean));
        }
        Mode::Navigate => {}
    }
}

/// What a key means to an autocomplete widget
pub(super) fn widget_event(key: KeyEvent) -> WidgetEvent {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Up => WidgetEvent::Nav(NavKey::Up),
        KeyCode::Down => WidgetEvent::Nav(NavKey::Down),
        KeyCode::Esc => WidgetEvent::Nav(NavKey::Escape),
        KeyCode::Enter => WidgetEvent::Nav(NavKey::Enter),
        KeyCode::Backspace if !ctrl => WidgetEvent::Backspace,
        KeyCode::Char(c) if !ctrl => WidgetEvent::Insert(c),
        _ => WidgetEvent::Other,
    }
}
