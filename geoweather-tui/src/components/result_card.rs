//! Result card with the address and weather sections
//!
//! Each section appears only when its result is present; with both present
//! they sit side by side.

use geoweather_core::{icon_url, Action, AddressResult, WeatherResult};
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::theme::Theme;

pub struct ResultCard;

pub struct ResultCardProps<'a> {
    pub address: Option<&'a AddressResult>,
    pub weather: Option<&'a WeatherResult>,
    pub icon_base_url: &'a str,
    pub theme: Theme,
}

impl ResultCard {
    /// Borders plus four rows, one spare for a wrapped icon URL
    pub const HEIGHT: u16 = 7;
}

fn field(label: &str, value: String, theme: Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

fn heading(text: &str, theme: Theme) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(theme.accent).bold()))
}

fn address_lines(address: &AddressResult, theme: Theme) -> Vec<Line<'static>> {
    vec![
        heading("Current location", theme),
        field("Country", address.country.clone().unwrap_or_default(), theme),
        field("State", address.region.clone().unwrap_or_default(), theme),
        field("City", address.locality.clone(), theme),
    ]
}

fn weather_lines(weather: &WeatherResult, icon_base_url: &str, theme: Theme) -> Vec<Line<'static>> {
    vec![
        heading("Weather", theme),
        field(
            "Temperature",
            format!("{}°C", weather.temperature_celsius),
            theme,
        ),
        field("Weather", weather.description.clone(), theme),
        field("Icon", icon_url(icon_base_url, &weather.icon_id), theme),
    ]
}

impl Component<Action> for ResultCard {
    type Props<'a> = ResultCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(props.theme.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut sections = Vec::new();
        if let Some(address) = props.address {
            sections.push(address_lines(address, props.theme));
        }
        if let Some(weather) = props.weather {
            sections.push(weather_lines(weather, props.icon_base_url, props.theme));
        }
        if sections.is_empty() {
            return;
        }

        let columns = Layout::horizontal(vec![Constraint::Fill(1); sections.len()]).split(inner);
        for (lines, column) in sections.into_iter().zip(columns.iter()) {
            let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
            frame.render_widget(paragraph, column.inner(Margin::new(1, 0)));
        }
    }
}
