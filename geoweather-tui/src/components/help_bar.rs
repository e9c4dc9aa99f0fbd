//! Key hints along the bottom edge

use geoweather_core::Action;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;

pub struct HelpBar;

pub struct HelpBarProps {
    /// Zoom keys only do something while the map is visible
    pub show_zoom: bool,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key = Style::default().fg(Color::Cyan).bold();
        let label = Style::default().fg(Color::DarkGray);

        let mut spans = vec![
            Span::styled(" l", key),
            Span::styled(" locate  ", label),
        ];
        if props.show_zoom {
            spans.push(Span::styled("+/-", key));
            spans.push(Span::styled(" zoom  ", label));
        }
        spans.push(Span::styled("q", key));
        spans.push(Span::styled(" quit ", label));

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
