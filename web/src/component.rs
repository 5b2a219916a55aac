use darkmode_core::{Mode, Preference, Result};
use yew::prelude::*;

use crate::controller::Controller;

/// Context value handed to everything below [`DarkModeProvider`].
#[derive(Clone)]
pub struct DarkModeHandle {
    controller: Controller,
    mode: Mode,
    preference: Preference,
    refresh: Callback<()>,
}

impl DarkModeHandle {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn preference(&self) -> Preference {
        self.preference
    }

    pub fn set_mode(&self, mode: Mode) -> Result<()> {
        self.controller.set_mode(mode)?;
        self.refresh.emit(());
        Ok(())
    }

    pub fn use_system_mode(&self) -> Result<()> {
        self.controller.use_system_mode()?;
        self.refresh.emit(());
        Ok(())
    }

    pub fn set_preference(&self, preference: Preference) -> Result<()> {
        self.controller.set_preference(preference)?;
        self.refresh.emit(());
        Ok(())
    }

    pub fn toggle(&self) -> Result<Mode> {
        let mode = self.controller.toggle()?;
        self.refresh.emit(());
        Ok(mode)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

impl PartialEq for DarkModeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.controller == other.controller
            && self.mode == other.mode
            && self.preference == other.preference
    }
}

#[derive(Properties, PartialEq)]
pub struct DarkModeProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Installs the dark mode controller once and shares it through context.
///
/// If the page has no usable storage the children are rendered without a
/// context and [`use_dark_mode`] returns `None`.
#[function_component]
pub fn DarkModeProvider(props: &DarkModeProviderProps) -> Html {
    let controller = use_memo((), |_| match Controller::install() {
        Ok(controller) => Some(controller),
        Err(err) => {
            log::error!("failed to install dark mode: {}", err);
            None
        }
    });
    let mode = use_state_eq(|| {
        (*controller)
            .as_ref()
            .map_or_else(Mode::default, Controller::effective_mode)
    });
    let force_update = use_force_update();

    {
        let mode = mode.setter();
        use_effect_with(controller.clone(), move |controller| {
            if let Some(controller) = &**controller {
                controller.watch(move |next| mode.set(next));
            }
        });
    }

    let Some(controller) = (*controller).clone() else {
        return props.children.clone();
    };

    let preference = controller.preference().unwrap_or_else(|err| {
        log::error!("failed to read theme preference: {}", err);
        Preference::Unset
    });
    let handle = DarkModeHandle {
        controller,
        mode: *mode,
        preference,
        refresh: Callback::from(move |_| force_update.force_update()),
    };

    html! {
        <ContextProvider<DarkModeHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<DarkModeHandle>>
    }
}

#[hook]
pub fn use_dark_mode() -> Option<DarkModeHandle> {
    use_context::<DarkModeHandle>()
}

fn switcher_choice(handle: &DarkModeHandle, preference: Preference, label: &'static str) -> Html {
    let class = classes!((handle.preference() == preference).then_some("active"));
    let onclick = {
        let handle = handle.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Err(err) = handle.set_preference(preference) {
                log::error!("failed to switch theme: {}", err);
            }
        })
    };

    html! {
        <li>
            <a href="#" {class} data-theme-switcher={preference.name()} {onclick}>{label}</a>
        </li>
    }
}

/// Auto / Light / Dark picker. Renders nothing outside a [`DarkModeProvider`].
#[function_component]
pub fn ThemeSwitcher() -> Html {
    let Some(handle) = use_dark_mode() else {
        return html! {};
    };

    html! {
        <ul class="theme-switcher">
            {switcher_choice(&handle, Preference::Unset, "Auto")}
            {switcher_choice(&handle, Preference::ExplicitLight, "Light")}
            {switcher_choice(&handle, Preference::ExplicitDark, "Dark")}
        </ul>
    }
}
