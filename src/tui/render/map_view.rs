use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, Borders};

use crate::model::LatLng;
use crate::ops::map::Viewport;
use crate::tui::app::App;
use crate::tui::theme::Theme;

/// A marker glyph to print on top of the coastline layer
pub(super) struct Pin {
    pub pos: LatLng,
    pub glyph: String,
}

/// Draw the world map clipped to `viewport` with `pins` printed above it.
pub(super) fn draw_map(
    frame: &mut Frame,
    theme: &Theme,
    viewport: &Viewport,
    pins: &[Pin],
    block: Block,
    area: Rect,
) {
    let bounds = viewport.bounds();
    let bg = theme.background;
    let map_color = theme.map;
    let marker_style = Style::default()
        .fg(theme.marker)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let canvas = Canvas::default()
        .block(block)
        .background_color(bg)
        .marker(symbols::Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: map_color,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for pin in pins {
                ctx.print(
                    pin.pos.lng,
                    pin.pos.lat,
                    Span::styled(pin.glyph.clone(), marker_style),
                );
            }
        });
    frame.render_widget(canvas, area);
}

/// Render the photo's map: one pin per cluster, counts for merged markers
pub fn render_map_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(map) = &app.map else {
        return;
    };
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Map \u{00B7} zoom {} ", map.viewport.zoom))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);

    let pins: Vec<Pin> = map
        .clusters(inner.width, inner.height)
        .into_iter()
        .map(|c| Pin {
            pos: c.pos,
            glyph: if c.count == 1 {
                "\u{25CF}".to_string()
            } else {
                c.count.to_string()
            },
        })
        .collect();

    draw_map(frame, &app.theme, &map.viewport, &pins, block, area);
}
