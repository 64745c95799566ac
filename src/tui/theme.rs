use ratatui::style::Color;

use crate::model::config::UiConfig;

/// Color palette for the TUI. Roles can be overridden from config.toml
/// (`[ui.colors]`, values as `#RRGGBB`).
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub green: Color,
    pub red: Color,
    pub yellow: Color,
    pub cyan: Color,
    pub selection_bg: Color,
    /// Transient row highlight right after add/toggle
    pub flash_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x10, 0x14),
            text: Color::Rgb(0xC8, 0xC8, 0xD0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x6E, 0x6E, 0x7A),
            highlight: Color::Rgb(0x5F, 0xD7, 0xA7),
            green: Color::Rgb(0x50, 0xC8, 0x78),
            red: Color::Rgb(0xE5, 0x48, 0x4D),
            yellow: Color::Rgb(0xF0, 0xC0, 0x00),
            cyan: Color::Rgb(0x3F, 0xC5, 0xD5),
            selection_bg: Color::Rgb(0x26, 0x26, 0x2E),
            flash_bg: Color::Rgb(0x2E, 0x3A, 0x28),
            search_match_bg: Color::Rgb(0xF0, 0xC0, 0x00),
            search_match_fg: Color::Rgb(0x10, 0x10, 0x14),
        }
    }
}

impl Theme {
    /// Apply config overrides on top of the default palette
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (role, hex) in &ui.colors {
            let Some(color) = parse_hex_color(hex) else {
                continue;
            };
            match role.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "dim" => theme.dim = color,
                "highlight" => theme.highlight = color,
                "green" => theme.green = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "cyan" => theme.cyan = color,
                "selection_bg" => theme.selection_bg = color,
                "flash_bg" => theme.flash_bg = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                _ => {}
            }
        }
        theme
    }
}

/// Parse `#RRGGBB` into a Color. Anything else is ignored.
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
