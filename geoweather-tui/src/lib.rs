//! Terminal front end for geoweather
//!
//! 1. Event (keyboard) -> [`AppView`](components::AppView) `handle_event` -> actions
//! 2. Actions dispatched through the core pipeline's store
//! 3. The reducer updates state and returns effects
//! 4. Effects spawn tasks whose results come back as actions
//! 5. If state changed, re-render

pub mod cli;
pub mod component;
pub mod components;
pub mod event;
pub mod logging;
pub mod report;
pub mod runtime;
pub mod testing;
pub mod theme;

pub use component::Component;
pub use event::{EventKind, PollerConfig};
pub use runtime::Runtime;
pub use theme::Theme;
