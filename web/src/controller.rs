use darkmode_core::*;
use gloo::events::EventListener;
use std::rc::Rc;

use crate::platform::*;

pub type BrowserResolver = Resolver<BrowserStore, MediaPreference, DocumentRoot>;

/// Shared handle to the page's resolver.
///
/// Clones point at the same state. While any clone is alive the effective
/// mode follows live system preference changes; dropping the last clone
/// removes the media query listener.
#[derive(Clone)]
pub struct Controller {
    shared: SharedResolver<BrowserStore, MediaPreference, DocumentRoot>,
    _listener: Rc<Option<EventListener>>,
}

impl Controller {
    pub fn install() -> Result<Self> {
        let resolver = Resolver::attach(
            BrowserStore::local()?,
            MediaPreference::dark_scheme(),
            DocumentRoot::html()?,
        )?;
        Ok(Self::from_resolver(resolver))
    }

    pub fn from_resolver(resolver: BrowserResolver) -> Self {
        let query = resolver.system().media_query_list().cloned();
        let shared = SharedResolver::new(resolver);
        let listener = query.map(|query| {
            let shared = shared.downgrade();
            EventListener::new(&query, "change", move |_event| {
                let Some(shared) = shared.upgrade() else {
                    return;
                };
                if let Err(err) = shared.system_changed() {
                    log::error!("failed to follow system preference: {}", err);
                }
            })
        });
        Self {
            shared,
            _listener: Rc::new(listener),
        }
    }

    pub fn apply_mode(&self) -> Result<Mode> {
        self.shared.apply_mode()
    }

    pub fn resolve_mode(&self) -> Result<Mode> {
        self.shared.resolve_mode()
    }

    pub fn is_dark_mode_active(&self) -> Result<bool> {
        self.shared.is_dark_mode_active()
    }

    pub fn effective_mode(&self) -> Mode {
        self.shared.effective_mode()
    }

    pub fn preference(&self) -> Result<Preference> {
        self.shared.preference()
    }

    pub fn set_mode(&self, mode: Mode) -> Result<()> {
        self.shared.set_mode(mode)
    }

    pub fn use_system_mode(&self) -> Result<()> {
        self.shared.use_system_mode()
    }

    pub fn set_preference(&self, preference: Preference) -> Result<()> {
        self.shared.set_preference(preference)
    }

    pub fn toggle(&self) -> Result<Mode> {
        self.shared.toggle()
    }

    /// Observers run after the change is committed and may use the controller.
    pub fn watch(&self, observer: impl FnMut(Mode) + 'static) {
        self.shared.watch(observer);
    }
}

impl PartialEq for Controller {
    fn eq(&self, other: &Self) -> bool {
        self.shared == other.shared
    }
}
