//! Reducer - (state, action) -> (changed, effects)
//!
//! Every acquisition and fetch outcome is one discrete transition here.
//! Fetch results carry the [`FetchTag`](crate::state::FetchTag) of the
//! acquisition that spawned them; whether a stale tag is applied depends on
//! the state's [`StalePolicy`](crate::state::StalePolicy).

use crate::action::Action;
use crate::config::{MAX_MAP_ZOOM, MIN_MAP_ZOOM};
use crate::effect::Effect;
use crate::error::ErrorKind;
use crate::state::{AppState, FetchTag};
use crate::store::DispatchResult;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Location =====
        Action::LocationRequest => {
            if !state.geolocation_supported {
                state.error = Some(ErrorKind::UnsupportedCapability);
                return DispatchResult::changed();
            }
            if state.locating {
                tracing::debug!("position request already in flight; ignoring");
                return DispatchResult::unchanged();
            }
            state.locating = true;
            DispatchResult::changed_with(Effect::AcquireLocation)
        }

        Action::LocationDidAcquire(coordinates) => {
            state.locating = false;
            state.coordinates = Some(coordinates);
            state.error = None;
            state.generation += 1;
            state.weather_pending = true;
            state.address_pending = true;

            let tag = FetchTag {
                generation: state.generation,
                coordinates,
            };
            DispatchResult::changed_with_many(vec![
                Effect::FetchWeather(tag),
                Effect::FetchAddress(tag),
            ])
        }

        Action::LocationDidFail(kind) => {
            state.locating = false;
            state.error = Some(kind);
            DispatchResult::changed()
        }

        // ===== Weather =====
        Action::WeatherDidLoad { tag, weather } => {
            if !accept(state, &tag, "weather") {
                return DispatchResult::unchanged();
            }
            state.weather = Some(weather);
            settle_weather(state, &tag);
            clear_error(state, ErrorKind::WeatherFetchError);
            DispatchResult::changed()
        }

        Action::WeatherDidError { tag, message } => {
            if !accept(state, &tag, "weather") {
                return DispatchResult::unchanged();
            }
            tracing::warn!(generation = tag.generation, %message, "weather fetch failed");
            settle_weather(state, &tag);
            state.error = Some(ErrorKind::WeatherFetchError);
            DispatchResult::changed()
        }

        // ===== Address =====
        Action::AddressDidLoad { tag, address } => {
            if !accept(state, &tag, "address") {
                return DispatchResult::unchanged();
            }
            state.address = Some(address);
            settle_address(state, &tag);
            clear_error(state, ErrorKind::AddressFetchError);
            DispatchResult::changed()
        }

        Action::AddressDidError { tag, message } => {
            if !accept(state, &tag, "address") {
                return DispatchResult::unchanged();
            }
            tracing::warn!(generation = tag.generation, %message, "address fetch failed");
            settle_address(state, &tag);
            state.error = Some(ErrorKind::AddressFetchError);
            DispatchResult::changed()
        }

        // ===== Map =====
        Action::MapZoomIn => {
            let zoom = state.map_zoom.saturating_add(1);
            set_zoom(state, zoom)
        }
        Action::MapZoomOut => {
            let zoom = state.map_zoom.saturating_sub(1);
            set_zoom(state, zoom)
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.is_busy() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn accept(state: &AppState, tag: &FetchTag, what: &str) -> bool {
    let accepted = state.accepts(tag);
    if !accepted {
        tracing::debug!(
            what,
            stale_generation = tag.generation,
            current_generation = state.generation,
            "discarding stale response"
        );
    }
    accepted
}

// A stale result applied under LastResponseWins must not clear the pending
// flag of the newer request.
fn settle_weather(state: &mut AppState, tag: &FetchTag) {
    if tag.generation == state.generation {
        state.weather_pending = false;
    }
}

fn settle_address(state: &mut AppState, tag: &FetchTag) {
    if tag.generation == state.generation {
        state.address_pending = false;
    }
}

fn clear_error(state: &mut AppState, kind: ErrorKind) {
    if state.error == Some(kind) {
        state.error = None;
    }
}

fn set_zoom(state: &mut AppState, zoom: u8) -> DispatchResult<Effect> {
    let zoom = zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM);
    if zoom == state.map_zoom {
        return DispatchResult::unchanged();
    }
    state.map_zoom = zoom;
    DispatchResult::changed()
}
