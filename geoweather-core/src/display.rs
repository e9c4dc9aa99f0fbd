//! Derived view state
//!
//! Computed from [`AppState`] on every render; never stored.

use crate::background::BackgroundKey;
use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub show_coordinates_line: bool,
    pub show_error_line: bool,
    /// Weather or address present
    pub show_result_card: bool,
    pub show_address_panel: bool,
    pub show_weather_panel: bool,
    pub show_map: bool,
    pub background: BackgroundKey,
}

impl DisplayState {
    pub fn derive(state: &AppState) -> Self {
        let background = state
            .weather
            .as_ref()
            .map(|weather| BackgroundKey::for_condition(&weather.condition))
            .unwrap_or(BackgroundKey::None);

        Self {
            show_coordinates_line: state.coordinates.is_some(),
            show_error_line: state.error.is_some(),
            show_result_card: state.weather.is_some() || state.address.is_some(),
            show_address_panel: state.address.is_some(),
            show_weather_panel: state.weather.is_some(),
            show_map: state.coordinates.is_some(),
            background,
        }
    }
}
