//! Condition → background lookup
//!
//! The table is the single source of truth; unmapped conditions fall back to
//! [`BackgroundKey::Default`], and no weather at all yields [`BackgroundKey::None`].

use crate::model::ConditionCategory;

/// Background theme chosen from the current weather
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundKey {
    Clear,
    Clouds,
    Rain,
    Snow,
    Default,
    /// No weather loaded yet
    None,
}

/// Exact-match table keyed by the service's condition string
const BACKGROUNDS: &[(&str, BackgroundKey)] = &[
    ("Clear", BackgroundKey::Clear),
    ("Clouds", BackgroundKey::Clouds),
    ("Rain", BackgroundKey::Rain),
    ("Snow", BackgroundKey::Snow),
    ("Drizzle", BackgroundKey::Rain),
    ("Thunderstorm", BackgroundKey::Rain),
    ("Mist", BackgroundKey::Clouds),
    ("Fog", BackgroundKey::Clouds),
];

impl BackgroundKey {
    /// Look up the background for a condition category
    pub fn for_condition(condition: &ConditionCategory) -> Self {
        let raw = condition.as_str();
        BACKGROUNDS
            .iter()
            .find(|(name, _)| *name == raw)
            .map(|(_, key)| *key)
            .unwrap_or(BackgroundKey::Default)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundKey::Clear => "clear",
            BackgroundKey::Clouds => "clouds",
            BackgroundKey::Rain => "rain",
            BackgroundKey::Snow => "snow",
            BackgroundKey::Default => "default",
            BackgroundKey::None => "none",
        }
    }

    /// Asset path for front ends that draw real images
    pub fn image_path(self) -> Option<&'static str> {
        match self {
            BackgroundKey::Clear => Some("/images/clear.jpg"),
            BackgroundKey::Clouds => Some("/images/clouds.jpg"),
            BackgroundKey::Rain => Some("/images/rain.jpg"),
            BackgroundKey::Snow => Some("/images/snow.jpg"),
            BackgroundKey::Default => Some("/images/default.jpg"),
            BackgroundKey::None => None,
        }
    }
}
