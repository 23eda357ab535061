use serde::{Deserialize, Serialize};

/// UI color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a stored value; anything unrecognized is the default
    pub fn parse_stored(raw: &str) -> Self {
        match raw {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}
