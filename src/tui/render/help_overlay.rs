use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::controls;
use crate::tui::app::App;

const KEY_WIDTH: usize = 14;

/// Keys that work inside any autocomplete form
const FORM_KEYS: [(&str, &str); 4] = [
    ("\u{2191}\u{2193}", "Move through suggestions"),
    ("Enter", "Pick / submit"),
    ("Esc", "Back / close"),
    ("Ctrl+Space", "Toggle reference"),
];

/// Render the help overlay (toggled with ?): every key bound by a visible
/// control, then the form keys
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered(area, 60, 80);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let binding = |key: String, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {key:<width$}", width = KEY_WIDTH), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(" Key Bindings", header_style)),
        Line::from(""),
    ];
    lines.extend(
        controls::bindings(app.has_admin_row())
            .into_iter()
            .map(|(key, title)| binding(key.to_string(), title)),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Forms", header_style)));
    lines.extend(FORM_KEYS.iter().map(|&(key, desc)| binding(key.to_string(), desc)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

/// A rectangle of the given percentages, centered in `area`
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn lists_admin_keys_for_a_photo() {
        let (_rt, app) = detail_app(sample_details());
        let output = render_to_string(TERM_W, 30, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Rotate left"), "{output}");
        assert!(output.contains("Quit"));
    }

    #[test]
    fn search_only_help_has_no_admin_keys() {
        let (_rt, app) = search_app();
        let output = render_to_string(TERM_W, 30, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(!output.contains("Rotate left"));
        assert!(output.contains("Search"));
    }
}
