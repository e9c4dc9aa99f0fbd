//! Plain text summary for `--once`

use std::fmt::Write;

use geoweather_core::{icon_url, AppState, DisplayState};

use crate::components::{tile_for, tile_url};

/// Summarize the state with the same visibility rules as the terminal view
pub fn render_report(state: &AppState, icon_base_url: &str, tile_url_template: &str) -> String {
    let display = DisplayState::derive(state);
    let mut out = String::new();

    // writing to a String cannot fail
    if let Some(coords) = state.coordinates.filter(|_| display.show_coordinates_line) {
        let _ = writeln!(out, "{coords}");
    }
    if let Some(kind) = state.error.filter(|_| display.show_error_line) {
        let _ = writeln!(out, "Error: {kind}");
    }
    if let Some(address) = state.address.as_ref().filter(|_| display.show_address_panel) {
        let _ = writeln!(out, "Country: {}", address.country.as_deref().unwrap_or(""));
        let _ = writeln!(out, "State: {}", address.region.as_deref().unwrap_or(""));
        let _ = writeln!(out, "City: {}", address.locality);
    }
    if let Some(weather) = state.weather.as_ref().filter(|_| display.show_weather_panel) {
        let _ = writeln!(out, "Temperature: {}°C", weather.temperature_celsius);
        let _ = writeln!(out, "Weather: {}", weather.description);
        let _ = writeln!(out, "Icon: {}", icon_url(icon_base_url, &weather.icon_id));
    }
    match display.background.image_path() {
        Some(path) => {
            let _ = writeln!(out, "Background: {} ({path})", display.background.as_str());
        }
        None => {
            let _ = writeln!(out, "Background: {}", display.background.as_str());
        }
    }
    if let Some(center) = state.coordinates.filter(|_| display.show_map) {
        let tile = tile_for(center, state.map_zoom);
        let _ = writeln!(out, "Map: {}", tile_url(tile_url_template, tile));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoweather_core::{
        AddressResult, ConditionCategory, Coordinates, ErrorKind, WeatherResult,
    };

    #[test]
    fn test_full_report() {
        let state = AppState {
            coordinates: Some(Coordinates::new(35.0, 139.0)),
            weather: Some(WeatherResult {
                condition: ConditionCategory::Rain,
                description: "light rain".into(),
                temperature_celsius: 18.2,
                icon_id: "10d".into(),
            }),
            address: Some(AddressResult {
                country: Some("Japan".into()),
                region: None,
                locality: "unknown".into(),
            }),
            ..Default::default()
        };
        let report = render_report(
            &state,
            "https://openweathermap.org",
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        );
        assert_eq!(
            report,
            "Latitude: 35, Longitude: 139\n\
             Country: Japan\n\
             State: \n\
             City: unknown\n\
             Temperature: 18.2°C\n\
             Weather: light rain\n\
             Icon: https://openweathermap.org/img/wn/10d@2x.png\n\
             Background: rain (/images/rain.jpg)\n\
             Map: https://tile.openstreetmap.org/13/7259/3244.png\n"
        );
    }

    #[test]
    fn test_error_only_report() {
        let state = AppState {
            error: Some(ErrorKind::UnsupportedCapability),
            ..Default::default()
        };
        let report = render_report(&state, "", "");
        assert_eq!(
            report,
            format!(
                "Error: {}\nBackground: none\n",
                ErrorKind::UnsupportedCapability.message()
            )
        );
    }
}
