//! Title line with the background key and a busy spinner

use geoweather_core::{Action, BackgroundKey};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::theme::Theme;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct TitleBar;

pub struct TitleBarProps {
    pub background: BackgroundKey,
    pub busy: bool,
    pub tick_count: u32,
    pub theme: Theme,
}

impl Component<Action> for TitleBar {
    type Props<'a> = TitleBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = vec![
            Span::styled("☁ Weather", Style::default().fg(props.theme.accent).bold()),
            Span::styled(
                format!("  [{}]", props.background.as_str()),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if props.busy {
            let spinner = SPINNERS[(props.tick_count as usize / 2) % SPINNERS.len()];
            spans.push(Span::styled(
                format!(" {spinner}"),
                Style::default().fg(props.theme.accent),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
