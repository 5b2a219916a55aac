use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Store key holding the explicit preference.
pub const THEME_KEY: &str = "theme";

/// Class set on the document root while dark mode is in effect.
pub const DARK_CLASS: &str = "dark";

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub const fn scheme(self) -> &'static str {
        use Mode::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub const fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Light
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// What the user asked for, as opposed to what ends up applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preference {
    #[serde(rename = "system")]
    Unset,
    #[serde(rename = "light")]
    ExplicitLight,
    #[serde(rename = "dark")]
    ExplicitDark,
}

impl Preference {
    /// Interprets the raw value found under [`THEME_KEY`].
    ///
    /// Only the literal `"dark"` selects dark. Any other value that is present,
    /// including garbage like `"drak"`, is an explicit light choice so that
    /// stores written by older scripts keep their meaning.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None => Self::Unset,
            Some(value) if value == Mode::Dark.scheme() => Self::ExplicitDark,
            Some(_) => Self::ExplicitLight,
        }
    }

    /// Whether a stored value is one this crate writes itself.
    pub fn is_recognized(value: &str) -> bool {
        value == Mode::Dark.scheme() || value == Mode::Light.scheme()
    }

    /// Value to persist, `None` means the key should be absent.
    pub const fn stored_value(self) -> Option<&'static str> {
        match self.explicit() {
            Some(mode) => Some(mode.scheme()),
            None => None,
        }
    }

    pub const fn explicit(self) -> Option<Mode> {
        use Preference::*;
        match self {
            Unset => None,
            ExplicitLight => Some(Mode::Light),
            ExplicitDark => Some(Mode::Dark),
        }
    }

    pub const fn name(self) -> &'static str {
        match self.explicit() {
            Some(mode) => mode.scheme(),
            None => "system",
        }
    }

    /// The system query is only consulted when nothing explicit is stored.
    pub fn resolve(self, system_prefers_dark: impl FnOnce() -> bool) -> Mode {
        self.explicit()
            .unwrap_or_else(|| Mode::from_dark(system_prefers_dark()))
    }
}

impl Default for Preference {
    fn default() -> Self {
        Self::Unset
    }
}

impl From<Mode> for Preference {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Light => Self::ExplicitLight,
            Mode::Dark => Self::ExplicitDark,
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preference {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::ExplicitDark),
            "light" => Ok(Self::ExplicitLight),
            "system" | "auto" => Ok(Self::Unset),
            _ => Err(PreferenceError::InvalidPreference(s.to_string())),
        }
    }
}
