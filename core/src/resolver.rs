use crate::*;

/// Decides the effective mode from the stored preference and the system
/// query, and keeps the presentation flag in line with it.
///
/// The resolver owns its collaborators. Hosts that need to share it, or to
/// observe the effective mode, go through [`SharedResolver`].
pub struct Resolver<S, Q, P> {
    store: S,
    system: Q,
    presentation: P,
    effective: Mode,
}

impl<S, Q, P> Resolver<S, Q, P>
where
    S: PreferenceStore,
    Q: SystemPreference,
    P: Presentation,
{
    /// Builds the resolver and applies the current mode right away.
    pub fn attach(store: S, system: Q, presentation: P) -> Result<Self> {
        let mut resolver = Self {
            store,
            system,
            presentation,
            effective: Mode::default(),
        };
        resolver.apply_mode()?;
        Ok(resolver)
    }

    pub fn preference(&self) -> Result<Preference> {
        let stored = self.store.get(THEME_KEY)?;
        Ok(Preference::from_stored(stored.as_deref()))
    }

    pub fn resolve_mode(&self) -> Result<Mode> {
        Ok(self.preference()?.resolve(|| self.system.prefers_dark()))
    }

    pub fn is_dark_mode_active(&self) -> Result<bool> {
        Ok(self.resolve_mode()?.is_dark())
    }

    /// Last mode written by [`Self::apply_mode`].
    pub fn effective_mode(&self) -> Mode {
        self.effective
    }

    /// Recomputes the effective mode and pushes it to the presentation.
    pub fn apply_mode(&mut self) -> Result<Mode> {
        let stored = self.store.get(THEME_KEY)?;
        if let Some(value) = stored.as_deref() {
            if !Preference::is_recognized(value) {
                log::warn!("unrecognized stored theme {:?}, treating as light", value);
            }
        }
        let mode =
            Preference::from_stored(stored.as_deref()).resolve(|| self.system.prefers_dark());
        self.presentation.set_dark(mode.is_dark())?;
        self.effective = mode;
        log::debug!("effective mode: {}", mode);
        Ok(mode)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        log::debug!("explicit mode: {}", mode);
        self.store.set(THEME_KEY, mode.scheme())?;
        self.apply_mode()?;
        Ok(())
    }

    pub fn use_system_mode(&mut self) -> Result<()> {
        log::debug!("following system preference");
        self.store.remove(THEME_KEY)?;
        self.apply_mode()?;
        Ok(())
    }

    pub fn set_preference(&mut self, preference: Preference) -> Result<()> {
        match preference.explicit() {
            Some(mode) => self.set_mode(mode),
            None => self.use_system_mode(),
        }
    }

    /// Stores the opposite of the effective mode as an explicit choice.
    pub fn toggle(&mut self) -> Result<Mode> {
        let next = self.effective.toggled();
        self.set_mode(next)?;
        Ok(next)
    }

    /// To be called when the platform reports a new system preference.
    pub fn system_changed(&mut self) -> Result<Mode> {
        log::debug!("system preference changed");
        self.apply_mode()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn system(&self) -> &Q {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut Q {
        &mut self.system
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }
}
