use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::widget::WidgetEvent;
use crate::tui::app::App;
use crate::tui::lookup;

use super::widget_event;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    if dispatch_search(app, widget_event(key)) {
        return;
    }
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => app.submit_search(),
        (_, KeyCode::Tab) => app.search.refs.move_cursor(true),
        (_, KeyCode::BackTab) => app.search.refs.move_cursor(false),
        (m, KeyCode::Char(' ')) if m.contains(KeyModifiers::CONTROL) => {
            app.search.refs.toggle_at_cursor()
        }
        _ => {}
    }
}

/// Feed one event to the search widget, start its lookups, and leave the
/// form if it hid itself.
pub(super) fn dispatch_search(app: &mut App, event: WidgetEvent) -> bool {
    let (handled, applied) = app.search.dispatch(event);
    lookup::issue(&app.search_fetcher, &applied.fetches);
    if !app.search.is_visible() {
        app.leave_search();
    }
    handled
}
