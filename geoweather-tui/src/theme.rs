//! Terminal color themes keyed by background

use geoweather_core::BackgroundKey;
use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Title and section headings
    pub accent: Color,
    pub border: Color,
    /// Body text on the card
    pub text: Color,
}

impl Theme {
    pub fn for_background(key: BackgroundKey) -> Self {
        match key {
            BackgroundKey::Clear => Self {
                accent: Color::Yellow,
                border: Color::Rgb(200, 170, 60),
                text: Color::White,
            },
            BackgroundKey::Clouds => Self {
                accent: Color::Gray,
                border: Color::Rgb(120, 120, 130),
                text: Color::White,
            },
            BackgroundKey::Rain => Self {
                accent: Color::LightBlue,
                border: Color::Rgb(70, 100, 160),
                text: Color::White,
            },
            BackgroundKey::Snow => Self {
                accent: Color::White,
                border: Color::Rgb(190, 210, 230),
                text: Color::White,
            },
            BackgroundKey::Default => Self {
                accent: Color::Magenta,
                border: Color::Rgb(110, 90, 130),
                text: Color::White,
            },
            BackgroundKey::None => Self {
                accent: Color::Cyan,
                border: Color::Rgb(80, 80, 100),
                text: Color::White,
            },
        }
    }
}
