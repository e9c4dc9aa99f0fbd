//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure; the effect handler turns these into tasks.

use crate::state::FetchTag;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start a single position acquisition
    AcquireLocation,
    FetchWeather(FetchTag),
    FetchAddress(FetchTag),
}
