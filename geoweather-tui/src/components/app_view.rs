//! Root view
//!
//! Lays out the panels from a [`DisplayState`] derived on every render and
//! maps keys to actions.

use crossterm::event::{KeyCode, KeyModifiers};
use geoweather_core::{Action, AppState, DisplayState};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders},
    Frame,
};

use super::{
    Component, HelpBar, HelpBarProps, MapPanel, MapPanelProps, ResultCard, ResultCardProps,
    StatusLines, StatusLinesProps, TitleBar, TitleBarProps,
};
use crate::event::EventKind;
use crate::theme::Theme;

pub struct AppViewProps<'a> {
    pub state: &'a AppState,
}

/// Holds the URL settings the panels need; everything else comes from state
pub struct AppView {
    icon_base_url: String,
    tile_url_template: String,
}

impl AppView {
    pub fn new(icon_base_url: impl Into<String>, tile_url_template: impl Into<String>) -> Self {
        Self {
            icon_base_url: icon_base_url.into(),
            tile_url_template: tile_url_template.into(),
        }
    }
}

impl Component<Action> for AppView {
    type Props<'a> = AppViewProps<'a>;

    fn handle_event<'a>(&mut self, event: &EventKind, props: Self::Props<'a>) -> Vec<Action>
    where
        'a: 'a,
    {
        let EventKind::Key(key) = event else {
            return vec![];
        };
        let show_map = props.state.coordinates.is_some();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![Action::Quit]
            }
            KeyCode::Char('l') | KeyCode::Enter => vec![Action::LocationRequest],
            KeyCode::Char('+') | KeyCode::Char('=') if show_map => vec![Action::MapZoomIn],
            KeyCode::Char('-') if show_map => vec![Action::MapZoomOut],
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let display = DisplayState::derive(state);
        let theme = Theme::for_background(display.background);

        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" geoweather ")
            .title_style(Style::default().fg(theme.accent).bold())
            .title_alignment(Alignment::Center);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let status = StatusLinesProps {
            coordinates: state.coordinates.as_ref(),
            error: state.error,
            locating: state.locating,
            theme,
        };

        let mut constraints = vec![
            Constraint::Length(1),
            Constraint::Length(StatusLines::height(&status)),
        ];
        if display.show_result_card {
            constraints.push(Constraint::Length(ResultCard::HEIGHT));
        }
        if display.show_map {
            constraints.push(Constraint::Min(MapPanel::MIN_HEIGHT));
        } else {
            constraints.push(Constraint::Min(0));
        }
        constraints.push(Constraint::Length(1));
        let chunks = Layout::vertical(constraints).split(inner);
        let mut next = 0;
        let mut take = || {
            let rect = chunks[next];
            next += 1;
            rect
        };

        TitleBar.render(
            frame,
            take(),
            TitleBarProps {
                background: display.background,
                busy: state.is_busy(),
                tick_count: state.tick_count,
                theme,
            },
        );
        StatusLines.render(frame, take(), status);

        if display.show_result_card {
            ResultCard.render(
                frame,
                take(),
                ResultCardProps {
                    address: state.address.as_ref(),
                    weather: state.weather.as_ref(),
                    icon_base_url: &self.icon_base_url,
                    theme,
                },
            );
        }

        let map_area = take();
        if let Some(center) = state.coordinates.filter(|_| display.show_map) {
            MapPanel.render(
                frame,
                map_area,
                MapPanelProps {
                    center,
                    zoom: state.map_zoom,
                    tile_url_template: &self.tile_url_template,
                    theme,
                },
            );
        }

        HelpBar.render(
            frame,
            take(),
            HelpBarProps {
                show_zoom: display.show_map,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, ActionAssertions};
    use geoweather_core::Coordinates;

    fn view() -> AppView {
        AppView::new("https://openweathermap.org", "{z}/{x}/{y}")
    }

    #[test]
    fn test_locate_keys() {
        let state = AppState::default();
        let actions = view().handle_event(&EventKind::Key(key("l")), AppViewProps { state: &state });
        actions.assert_count(1);
        actions.assert_first(Action::LocationRequest);

        let actions =
            view().handle_event(&EventKind::Key(key("enter")), AppViewProps { state: &state });
        actions.assert_first(Action::LocationRequest);
    }

    #[test]
    fn test_zoom_keys_need_map() {
        let state = AppState::default();
        let actions = view().handle_event(&EventKind::Key(key("+")), AppViewProps { state: &state });
        actions.assert_empty();

        let state = AppState {
            coordinates: Some(Coordinates::new(35.0, 139.0)),
            ..Default::default()
        };
        let actions = view().handle_event(&EventKind::Key(key("+")), AppViewProps { state: &state });
        actions.assert_first(Action::MapZoomIn);
        let actions = view().handle_event(&EventKind::Key(key("-")), AppViewProps { state: &state });
        actions.assert_first(Action::MapZoomOut);
    }

    #[test]
    fn test_quit_keys() {
        let state = AppState::default();
        for k in ["q", "esc", "ctrl+c"] {
            let actions =
                view().handle_event(&EventKind::Key(key(k)), AppViewProps { state: &state });
            actions.assert_count(1);
            actions.assert_contains(Action::Quit);
        }
    }

    #[test]
    fn test_resize_emits_nothing() {
        let state = AppState::default();
        let actions = view().handle_event(&EventKind::Resize(80, 24), AppViewProps { state: &state });
        actions.assert_empty();
    }
}
