//! Core of geoweather: location → weather + address → display state
//!
//! The pipeline follows a Redux/Elm-style loop:
//!
//! 1. An intent action (`LocationRequest`) reaches the [`reducer`]
//! 2. The reducer updates [`AppState`] and returns [`Effect`]s
//! 3. [`EffectHandler`] spawns one task per effect on a [`TaskManager`]
//! 4. Each task reports back with a `Did*` result action
//! 5. Front ends derive a [`DisplayState`] from the state and render it
//!
//! After a successful acquisition, the weather and address fetches run
//! concurrently with no ordering between them. Each result is tagged with the
//! acquisition generation that spawned it, and the state's [`StalePolicy`]
//! decides whether late results from an older generation are applied.
//!
//! ```ignore
//! use geoweather_core::{Action, Config, Pipeline};
//!
//! let mut pipeline = Pipeline::new(&config)?;
//! pipeline.dispatch(Action::LocationRequest);
//! pipeline.run_until_idle().await;
//! println!("{:?}", pipeline.state().weather);
//! ```

pub mod action;
pub mod api;
pub mod background;
pub mod config;
pub mod display;
pub mod effect;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod pipeline;
pub mod reducer;
pub mod state;
pub mod store;
pub mod tasks;

pub use action::Action;
pub use api::{icon_url, ReverseGeocodeClient, WeatherClient};
pub use background::BackgroundKey;
pub use config::{
    Config, GeocodeApiConfig, GeolocationConfig, LocatorConfig, MapConfig, WeatherApiConfig,
};
pub use display::DisplayState;
pub use effect::Effect;
pub use error::{ApiError, ConfigError, ErrorKind, GeolocationError, SetupError};
pub use geolocation::{FixedPosition, Geolocator, IpPosition, PositionOptions, PositionSource};
pub use model::{AddressResult, ConditionCategory, Coordinates, WeatherResult, UNKNOWN_LOCALITY};
pub use pipeline::{EffectHandler, Pipeline};
pub use reducer::reducer;
pub use state::{AppState, FetchTag, StalePolicy};
pub use store::{DispatchResult, EffectStore, Middleware, NoopMiddleware, TracingMiddleware};
pub use tasks::{TaskKey, TaskManager};
