use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::controls::Control;
use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('z') => app.zoom = !app.zoom,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Esc if app.zoom => app.zoom = false,
        KeyCode::Left | KeyCode::BackTab => app.buttons.select_next(false),
        KeyCode::Right | KeyCode::Tab => app.buttons.select_next(true),
        KeyCode::Enter => {
            let control = app.buttons.selected_control();
            app.activate(control);
        }
        KeyCode::Char(c) => {
            if let Some(control) = Control::from_key(c) {
                app.activate(control);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::ops::controls::Control;
    use crate::ops::forms::AdminForm;
    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::input::tests::key;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn access_key_opens_form_and_disables_trigger() {
        let (_rt, mut app) = detail_app(sample_details());
        handle_key(&mut app, key(KeyCode::Char('p')));
        assert_eq!(app.mode, Mode::Form);
        assert!(app.buttons.is_disabled(Control::Person));
        assert!(matches!(
            app.form.as_ref().map(|o| &o.form),
            Some(AdminForm::Tag(f)) if f.category == crate::model::Category::Person
        ));
    }

    #[test]
    fn grade_form_is_seeded_from_details() {
        let (_rt, mut app) = detail_app(sample_details());
        handle_key(&mut app, key(KeyCode::Char('g')));
        assert!(matches!(
            app.form.as_ref().map(|o| &o.form),
            Some(AdminForm::Grade(g)) if g.value == 73
        ));
    }

    #[test]
    fn second_form_does_not_open_over_first() {
        let (_rt, mut app) = detail_app(sample_details());
        app.activate(Control::Tag);
        app.activate(Control::Grade);
        assert!(matches!(
            app.form.as_ref().map(|o| &o.form),
            Some(AdminForm::Tag(_))
        ));
    }

    #[test]
    fn help_and_zoom_toggle() {
        let (_rt, mut app) = detail_app(sample_details());
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, key(KeyCode::Char('t')));
        assert!(app.form.is_none(), "help swallows keys");
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_help);
        handle_key(&mut app, key(KeyCode::Char('z')));
        assert!(app.zoom);
    }

    #[test]
    fn arrows_move_button_selection() {
        let (_rt, mut app) = detail_app(sample_details());
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.buttons.selected_control(), Control::Grade);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.buttons.selected_control(), Control::RotateLeft);
    }
}
