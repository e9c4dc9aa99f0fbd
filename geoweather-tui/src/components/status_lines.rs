//! Action hint, coordinates and error lines

use geoweather_core::{Action, Coordinates, ErrorKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::theme::Theme;

pub const ERROR_ICON: &str = "⚠ ";

pub struct StatusLines;

pub struct StatusLinesProps<'a> {
    pub coordinates: Option<&'a Coordinates>,
    pub error: Option<ErrorKind>,
    pub locating: bool,
    pub theme: Theme,
}

impl StatusLines {
    /// Rows needed for the given props
    pub fn height(props: &StatusLinesProps<'_>) -> u16 {
        1 + u16::from(props.coordinates.is_some()) + u16::from(props.error.is_some())
    }
}

impl Component<Action> for StatusLines {
    type Props<'a> = StatusLinesProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let hint = if props.locating {
            Line::from(Span::styled(
                "Locating…",
                Style::default()
                    .fg(props.theme.accent)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("l", Style::default().fg(props.theme.accent).bold()),
                Span::raw(" to get your current location"),
            ])
        };

        let mut lines = vec![hint.centered()];
        if let Some(coords) = props.coordinates {
            lines.push(
                Line::from(Span::styled(
                    coords.to_string(),
                    Style::default().fg(props.theme.text),
                ))
                .centered(),
            );
        }
        if let Some(kind) = props.error {
            lines.push(
                Line::from(vec![
                    Span::styled(ERROR_ICON, Style::default().fg(Color::Red)),
                    Span::styled(kind.message(), Style::default().fg(Color::Red).bold()),
                ])
                .centered(),
            );
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
