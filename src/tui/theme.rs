use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Category, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    /// Map coastlines
    pub map: Color,
    pub marker: Color,
    /// Per reference kind colors
    pub kind_colors: HashMap<Category, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        // Safelight palette: warm text on near-black
        let kind_colors = HashMap::from([
            (Category::Tag, Color::Rgb(0x7F, 0xC8, 0xD9)),
            (Category::Person, Color::Rgb(0xE0, 0x9F, 0xE8)),
            (Category::Place, Color::Rgb(0x9C, 0xD6, 0x7A)),
        ]);

        Theme {
            background: Color::Rgb(0x14, 0x11, 0x0F),
            text: Color::Rgb(0xD8, 0xC8, 0xB4),
            text_bright: Color::Rgb(0xFF, 0xF6, 0xE8),
            highlight: Color::Rgb(0xE8, 0x5D, 0x3A),
            dim: Color::Rgb(0x80, 0x74, 0x68),
            red: Color::Rgb(0xF0, 0x50, 0x50),
            yellow: Color::Rgb(0xF2, 0xC1, 0x4E),
            green: Color::Rgb(0x9C, 0xD6, 0x7A),
            selection_bg: Color::Rgb(0x3A, 0x22, 0x1A),
            selection_border: Color::Rgb(0xE8, 0x5D, 0x3A),
            map: Color::Rgb(0x5A, 0x6E, 0x7A),
            marker: Color::Rgb(0xF2, 0xC1, 0x4E),
            kind_colors,
        }
    }
}

/// `#RRGGBB` to an RGB color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').filter(|d| d.len() == 6)?;
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::from_u32(rgb))
}

impl Theme {
    /// Defaults overridden by `[ui] colors` and `[ui] kind_colors`.
    /// Unknown names and malformed colors are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (name, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            let slot = match name.as_str() {
                "background" => &mut theme.background,
                "text" => &mut theme.text,
                "text_bright" => &mut theme.text_bright,
                "highlight" => &mut theme.highlight,
                "dim" => &mut theme.dim,
                "red" => &mut theme.red,
                "yellow" => &mut theme.yellow,
                "green" => &mut theme.green,
                "selection_bg" => &mut theme.selection_bg,
                "selection_border" => &mut theme.selection_border,
                "map" => &mut theme.map,
                "marker" => &mut theme.marker,
                _ => continue,
            };
            *slot = color;
        }

        for (kind, value) in &ui.kind_colors {
            if let (Some(category), Some(color)) = (Category::parse(kind), parse_hex_color(value)) {
                theme.kind_colors.insert(category, color);
            }
        }

        theme
    }

    /// Color for a reference kind, falling back to text color
    pub fn kind_color(&self, kind: Category) -> Color {
        self.kind_colors.get(&kind).copied().unwrap_or(self.text)
    }
}
