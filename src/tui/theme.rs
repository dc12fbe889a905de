use ratatui::style::Color;

use crate::model::UiConfig;

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
    pub row_bg: Color,
    pub input_bg: Color,
    pub button_bg: Color,
    pub button_fg: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1A, 0x1A, 0x1A),
            text: Color::Rgb(0xE6, 0xE6, 0xE6),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFF, 0xFF, 0x00),
            dim: Color::Rgb(0xCC, 0xCC, 0xCC),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xFF, 0x00),
            green: Color::Rgb(0x66, 0xFF, 0x66),
            row_bg: Color::Rgb(0x33, 0x33, 0x33),
            input_bg: Color::Rgb(0x4D, 0x4D, 0x4D),
            button_bg: Color::Rgb(0x33, 0x33, 0x99),
            button_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x3D, 0x5C),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "row_bg" => theme.row_bg = color,
                    "input_bg" => theme.input_bg = color,
                    "button_bg" => theme.button_bg = color,
                    "button_fg" => theme.button_fg = color,
                    "selection_bg" => theme.selection_bg = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Color for a task's text line
    pub fn task_color(&self, done: bool) -> Color {
        if done { self.green } else { self.text }
    }
}
