//! Actions
//!
//! Naming follows a category prefix with `Did` marking async results:
//! `LocationRequest` is an intent, `LocationDidAcquire` its outcome.

use crate::error::ErrorKind;
use crate::model::{AddressResult, Coordinates, WeatherResult};
use crate::state::FetchTag;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Location =====
    /// Intent: ask the position source for the current position
    LocationRequest,
    LocationDidAcquire(Coordinates),
    LocationDidFail(ErrorKind),

    // ===== Weather =====
    WeatherDidLoad { tag: FetchTag, weather: WeatherResult },
    WeatherDidError { tag: FetchTag, message: String },

    // ===== Address =====
    AddressDidLoad { tag: FetchTag, address: AddressResult },
    AddressDidError { tag: FetchTag, message: String },

    // ===== Map =====
    MapZoomIn,
    MapZoomOut,

    // ===== Global =====
    /// Periodic tick for the loading spinner
    Tick,
    Quit,
}

impl crate::store::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::LocationRequest => "LocationRequest",
            Action::LocationDidAcquire(_) => "LocationDidAcquire",
            Action::LocationDidFail(_) => "LocationDidFail",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::AddressDidLoad { .. } => "AddressDidLoad",
            Action::AddressDidError { .. } => "AddressDidError",
            Action::MapZoomIn => "MapZoomIn",
            Action::MapZoomOut => "MapZoomOut",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}

impl Action {
    /// Concise description for logs
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad { tag, weather } => format!(
                "WeatherDidLoad {{ gen: {}, {}: {}°C }}",
                tag.generation,
                weather.condition.as_str(),
                weather.temperature_celsius
            ),
            Action::AddressDidLoad { tag, address } => format!(
                "AddressDidLoad {{ gen: {}, locality: {} }}",
                tag.generation, address.locality
            ),
            other => format!("{other:?}"),
        }
    }
}
