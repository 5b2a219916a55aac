use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::*;

type Observer = Box<dyn FnMut(Mode)>;
type Observers = Rc<RefCell<Vec<Observer>>>;

/// Single-threaded shared handle to a [`Resolver`].
///
/// Clones point at the same resolver. Observers registered with
/// [`SharedResolver::watch`] are called after the resolver borrow is released,
/// so they are free to read the handle again. A mode change made from inside
/// an observer is applied but not announced a second time.
pub struct SharedResolver<S, Q, P> {
    resolver: Rc<RefCell<Resolver<S, Q, P>>>,
    observers: Observers,
}

/// Non-owning counterpart of [`SharedResolver`], for event listeners.
pub struct WeakResolver<S, Q, P> {
    resolver: Weak<RefCell<Resolver<S, Q, P>>>,
    observers: Weak<RefCell<Vec<Observer>>>,
}

impl<S, Q, P> Clone for SharedResolver<S, Q, P> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            observers: self.observers.clone(),
        }
    }
}

impl<S, Q, P> Clone for WeakResolver<S, Q, P> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            observers: self.observers.clone(),
        }
    }
}

impl<S, Q, P> PartialEq for SharedResolver<S, Q, P> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.resolver, &other.resolver)
    }
}

impl<S, Q, P> WeakResolver<S, Q, P> {
    pub fn upgrade(&self) -> Option<SharedResolver<S, Q, P>> {
        Some(SharedResolver {
            resolver: self.resolver.upgrade()?,
            observers: self.observers.upgrade()?,
        })
    }
}

fn notify(observers: &Observers, mode: Mode) {
    let mut pending = core::mem::take(&mut *observers.borrow_mut());
    for observer in pending.iter_mut() {
        observer(mode);
    }
    // keep anything registered while the callbacks ran
    let mut observers = observers.borrow_mut();
    pending.append(&mut observers);
    *observers = pending;
}

impl<S, Q, P> SharedResolver<S, Q, P>
where
    S: PreferenceStore,
    Q: SystemPreference,
    P: Presentation,
{
    pub fn new(resolver: Resolver<S, Q, P>) -> Self {
        Self {
            resolver: Rc::new(RefCell::new(resolver)),
            observers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn downgrade(&self) -> WeakResolver<S, Q, P> {
        WeakResolver {
            resolver: Rc::downgrade(&self.resolver),
            observers: Rc::downgrade(&self.observers),
        }
    }

    /// Read access to the resolver and its collaborators.
    pub fn with<T>(&self, f: impl FnOnce(&Resolver<S, Q, P>) -> T) -> T {
        f(&*self.resolver.borrow())
    }

    /// Runs a mutation, then tells observers if the effective mode moved.
    fn update<T>(&self, f: impl FnOnce(&mut Resolver<S, Q, P>) -> Result<T>) -> Result<T> {
        let (result, previous, current) = {
            let mut resolver = self.resolver.borrow_mut();
            let previous = resolver.effective_mode();
            let result = f(&mut *resolver);
            (result, previous, resolver.effective_mode())
        };
        if previous != current {
            notify(&self.observers, current);
        }
        result
    }

    pub fn resolve_mode(&self) -> Result<Mode> {
        self.resolver.borrow().resolve_mode()
    }

    pub fn is_dark_mode_active(&self) -> Result<bool> {
        self.resolver.borrow().is_dark_mode_active()
    }

    pub fn effective_mode(&self) -> Mode {
        self.resolver.borrow().effective_mode()
    }

    pub fn preference(&self) -> Result<Preference> {
        self.resolver.borrow().preference()
    }

    pub fn apply_mode(&self) -> Result<Mode> {
        self.update(Resolver::apply_mode)
    }

    pub fn set_mode(&self, mode: Mode) -> Result<()> {
        self.update(|resolver| resolver.set_mode(mode))
    }

    pub fn use_system_mode(&self) -> Result<()> {
        self.update(Resolver::use_system_mode)
    }

    pub fn set_preference(&self, preference: Preference) -> Result<()> {
        self.update(|resolver| resolver.set_preference(preference))
    }

    pub fn toggle(&self) -> Result<Mode> {
        self.update(Resolver::toggle)
    }

    pub fn system_changed(&self) -> Result<Mode> {
        self.update(Resolver::system_changed)
    }

    /// Calls `observer` with the new effective mode whenever it changes.
    pub fn watch(&self, observer: impl FnMut(Mode) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    type TestShared = SharedResolver<MemoryStore, FixedSystemPreference, RootFlag>;

    fn shared(system_dark: bool) -> TestShared {
        let resolver = Resolver::attach(
            MemoryStore::new(),
            FixedSystemPreference::new(system_dark),
            RootFlag::default(),
        )
        .unwrap();
        SharedResolver::new(resolver)
    }

    #[test]
    fn observers_hear_only_changes() {
        let seen = Rc::new(RefCell::new(vec![]));
        let shared = shared(false);
        {
            let seen = seen.clone();
            shared.watch(move |mode| seen.borrow_mut().push(mode));
        }

        shared.apply_mode().unwrap();
        shared.set_mode(Mode::Light).unwrap();
        shared.set_mode(Mode::Dark).unwrap();
        shared.set_mode(Mode::Dark).unwrap();
        shared.use_system_mode().unwrap();

        assert_eq!(*seen.borrow(), vec![Mode::Dark, Mode::Light]);
    }

    #[test]
    fn observers_can_read_the_handle() {
        let seen = Rc::new(RefCell::new(vec![]));
        let shared = shared(false);
        {
            let seen = seen.clone();
            let weak = shared.downgrade();
            shared.watch(move |mode| {
                let shared = weak.upgrade().unwrap();
                seen.borrow_mut().push((
                    mode,
                    shared.effective_mode(),
                    shared.preference().unwrap(),
                    shared.is_dark_mode_active().unwrap(),
                ));
            });
        }

        shared.set_mode(Mode::Dark).unwrap();
        shared.toggle().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                (Mode::Dark, Mode::Dark, Preference::ExplicitDark, true),
                (Mode::Light, Mode::Light, Preference::ExplicitLight, false),
            ]
        );
    }

    #[test]
    fn observers_can_change_the_mode() {
        let seen = Rc::new(RefCell::new(vec![]));
        let shared = shared(false);
        {
            let seen = seen.clone();
            let weak = shared.downgrade();
            shared.watch(move |mode| {
                seen.borrow_mut().push(mode);
                if mode.is_dark() {
                    weak.upgrade().unwrap().use_system_mode().unwrap();
                }
            });
        }

        shared.set_mode(Mode::Dark).unwrap();

        assert_eq!(*seen.borrow(), vec![Mode::Dark]);
        assert_eq!(shared.effective_mode(), Mode::Light);
        assert_eq!(shared.preference().unwrap(), Preference::Unset);

        // the observer is still registered afterwards
        shared.set_mode(Mode::Dark).unwrap();
        assert_eq!(*seen.borrow(), vec![Mode::Dark, Mode::Dark]);
    }

    #[test]
    fn observers_registered_during_notification_are_kept() {
        let count = Rc::new(RefCell::new(0));
        let shared = shared(false);
        {
            let count = count.clone();
            let weak = shared.downgrade();
            let mut registered = false;
            shared.watch(move |_| {
                if !registered {
                    registered = true;
                    let count = count.clone();
                    weak.upgrade()
                        .unwrap()
                        .watch(move |_| *count.borrow_mut() += 1);
                }
            });
        }

        shared.set_mode(Mode::Dark).unwrap();
        assert_eq!(*count.borrow(), 0);
        shared.set_mode(Mode::Light).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn system_change_is_announced_while_unset() {
        let seen = Rc::new(RefCell::new(vec![]));
        let shared = shared(false);
        {
            let seen = seen.clone();
            shared.watch(move |mode| seen.borrow_mut().push(mode));
        }

        shared.with(|resolver| assert!(!resolver.presentation().is_dark()));
        shared.resolver.borrow_mut().system_mut().set(true);
        assert_eq!(shared.system_changed().unwrap(), Mode::Dark);
        assert_eq!(*seen.borrow(), vec![Mode::Dark]);
        shared.with(|resolver| assert!(resolver.presentation().is_dark()));
    }

    #[test]
    fn failed_update_is_not_announced() {
        let seen = Rc::new(RefCell::new(vec![]));
        let shared = shared(false);
        {
            let seen = seen.clone();
            shared.watch(move |mode| seen.borrow_mut().push(mode));
        }

        shared.resolver.borrow_mut().store_mut().set_unavailable(true);
        assert!(shared.set_mode(Mode::Dark).is_err());
        assert!(seen.borrow().is_empty());
        assert_eq!(shared.effective_mode(), Mode::Light);
    }

    #[test]
    fn weak_handle_does_not_keep_resolver_alive() {
        let shared = shared(false);
        let weak = shared.downgrade();
        assert!(weak.upgrade().unwrap() == shared);

        drop(shared);
        assert!(weak.upgrade().is_none());
    }
}
