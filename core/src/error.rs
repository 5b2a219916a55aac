use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Preference store is unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Failed to read {key:?} from the preference store: {reason}")]
    StoreRead { key: String, reason: String },
    #[error("Failed to write {key:?} to the preference store: {reason}")]
    StoreWrite { key: String, reason: String },
    #[error("Document root is unavailable: {0}")]
    PresentationUnavailable(String),
    #[error("Unknown preference {0:?}, expected one of dark, light or system")]
    InvalidPreference(String),
}

pub type Result<T> = core::result::Result<T, PreferenceError>;
