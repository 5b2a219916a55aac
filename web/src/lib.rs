pub use bindings::DarkMode;
pub use component::*;
pub use controller::*;
pub use darkmode_core::{Mode, Preference, PreferenceError};
pub use platform::*;

mod bindings;
mod component;
mod controller;
mod platform;

#[cfg(feature = "standalone")]
mod standalone {
    use clap::Parser;
    use darkmode_core::Preference;
    use wasm_bindgen::prelude::*;

    use crate::controller::Controller;

    #[derive(Parser, Debug)]
    #[command(version, about, long_about = None)]
    struct Args {
        /// What log level to use
        #[command(flatten)]
        verbose: clap_verbosity_flag::Verbosity,

        /// Force a preference on load (dark, light or system)
        #[arg(short, long)]
        mode: Option<Preference>,
    }

    /// Sets the current mode on page load, before any host code runs.
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsError> {
        use gloo::utils::window;

        #[cfg(feature = "console_error_panic_hook")]
        {
            console_error_panic_hook::set_once();
        }

        let location_hash = window().location().hash().unwrap_or_default();
        let args = Args::try_parse_from(location_hash.split(['#', '&']))?;
        if let Some(log_level) = args.verbose.log_level() {
            console_log::init_with_level(log_level)
                .map_err(|err| JsError::new(&err.to_string()))?;
        }

        let controller = Controller::install()?;
        if let Some(preference) = args.mode {
            log::debug!("forced preference: {}", preference);
            controller.set_preference(preference)?;
        }
        log::debug!("dark mode: {}", controller.effective_mode());
        Ok(())
    }
}
