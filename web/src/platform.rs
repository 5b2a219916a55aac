use darkmode_core::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, MediaQueryList, Storage};

fn js_reason(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return error.message().into();
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// `window.localStorage`, holding raw strings so values written by plain
/// scripts (`localStorage.theme = "dark"`) keep working.
#[derive(Clone, Debug)]
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    pub fn local() -> Result<Self> {
        match gloo::utils::window().local_storage() {
            Ok(Some(storage)) => Ok(Self::new(storage)),
            Ok(None) => Err(PreferenceError::StoreUnavailable(
                "localStorage is disabled".to_string(),
            )),
            Err(err) => Err(PreferenceError::StoreUnavailable(js_reason(&err))),
        }
    }

    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| PreferenceError::StoreRead {
                key: key.to_string(),
                reason: js_reason(&err),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| PreferenceError::StoreWrite {
                key: key.to_string(),
                reason: js_reason(&err),
            })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| PreferenceError::StoreWrite {
                key: key.to_string(),
                reason: js_reason(&err),
            })
    }
}

/// `window.matchMedia(...)` for a boolean media feature.
#[derive(Clone, Debug)]
pub struct MediaPreference {
    query: Option<MediaQueryList>,
}

impl MediaPreference {
    pub fn dark_scheme() -> Self {
        Self::matching(DARK_SCHEME_QUERY)
    }

    pub fn matching(query: &str) -> Self {
        let query = gloo::utils::window().match_media(query).ok().flatten();
        if query.is_none() {
            log::debug!("matchMedia unsupported, assuming light system preference");
        }
        Self { query }
    }

    pub fn media_query_list(&self) -> Option<&MediaQueryList> {
        self.query.as_ref()
    }
}

impl SystemPreference for MediaPreference {
    fn prefers_dark(&self) -> bool {
        self.query.as_ref().is_some_and(MediaQueryList::matches)
    }
}

/// Class list of the document root, `<html>` unless told otherwise.
#[derive(Clone, Debug)]
pub struct DocumentRoot {
    root: Element,
}

impl DocumentRoot {
    pub fn html() -> Result<Self> {
        gloo::utils::document()
            .document_element()
            .map(Self::new)
            .ok_or_else(|| {
                PreferenceError::PresentationUnavailable("document has no root element".to_string())
            })
    }

    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn is_dark(&self) -> bool {
        self.root.class_list().contains(DARK_CLASS)
    }
}

impl Presentation for DocumentRoot {
    fn set_dark(&mut self, dark: bool) -> Result<()> {
        self.root
            .class_list()
            .toggle_with_force(DARK_CLASS, dark)
            .map(|_| ())
            .map_err(|err| PreferenceError::PresentationUnavailable(js_reason(&err)))
    }
}
