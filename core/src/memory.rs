use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::*;

/// In-process store, mostly for tests and hosts without a browser.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Makes every subsequent access fail, like a disabled storage backend.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            Err(PreferenceError::StoreUnavailable(
                "memory store disabled".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedSystemPreference {
    dark: bool,
}

impl FixedSystemPreference {
    pub const fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn set(&mut self, dark: bool) {
        self.dark = dark;
    }
}

impl SystemPreference for FixedSystemPreference {
    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

/// Records the presentation flag along with how often it was written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RootFlag {
    dark: bool,
    writes: usize,
}

impl RootFlag {
    pub const fn is_dark(&self) -> bool {
        self.dark
    }

    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl Presentation for RootFlag {
    fn set_dark(&mut self, dark: bool) -> Result<()> {
        self.dark = dark;
        self.writes += 1;
        Ok(())
    }
}
