use alloc::string::String;

use crate::*;

/// String-keyed, string-valued persistent storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Point-in-time query of the operating system's color-scheme preference.
///
/// Platforms that cannot answer report `false`.
pub trait SystemPreference {
    fn prefers_dark(&self) -> bool;
}

/// The single presentation flag driven by the effective mode.
pub trait Presentation {
    fn set_dark(&mut self, dark: bool) -> Result<()>;
}
