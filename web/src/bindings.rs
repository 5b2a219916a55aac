use darkmode_core::Mode;
use wasm_bindgen::prelude::*;

use crate::controller::Controller;

/// Dark mode handle for plain JavaScript hosts.
///
/// ```js
/// const darkMode = new DarkMode();
/// darkMode.setMode(true);
/// darkMode.useSystemMode();
/// ```
#[wasm_bindgen]
pub struct DarkMode {
    controller: Controller,
}

#[wasm_bindgen]
impl DarkMode {
    /// Attaches to `localStorage` and `<html>`, and applies the current mode.
    #[wasm_bindgen(constructor)]
    pub fn install() -> Result<DarkMode, JsError> {
        Ok(Self {
            controller: Controller::install()?,
        })
    }

    /// Returns whether dark mode ended up applied.
    #[wasm_bindgen(js_name = applyMode)]
    pub fn apply_mode(&self) -> Result<bool, JsError> {
        Ok(self.controller.apply_mode()?.is_dark())
    }

    #[wasm_bindgen(js_name = isDarkModeActive)]
    pub fn is_dark_mode_active(&self) -> Result<bool, JsError> {
        Ok(self.controller.is_dark_mode_active()?)
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, dark: bool) -> Result<(), JsError> {
        Ok(self.controller.set_mode(Mode::from_dark(dark))?)
    }

    #[wasm_bindgen(js_name = useSystemMode)]
    pub fn use_system_mode(&self) -> Result<(), JsError> {
        Ok(self.controller.use_system_mode()?)
    }

    pub fn toggle(&self) -> Result<bool, JsError> {
        Ok(self.controller.toggle()?.is_dark())
    }

    /// `"dark"`, `"light"` or `"system"`.
    pub fn preference(&self) -> Result<String, JsError> {
        Ok(self.controller.preference()?.name().to_string())
    }

    #[wasm_bindgen(getter = darkMode)]
    pub fn dark_mode(&self) -> bool {
        self.controller.effective_mode().is_dark()
    }

    /// Calls `callback(isDark)` whenever the effective mode changes. The
    /// callback runs after the change is stored and may read this object.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.controller.watch(move |mode| {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(mode.is_dark())) {
                log::error!("dark mode change callback failed: {:?}", err);
            }
        });
    }
}

impl DarkMode {
    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}
