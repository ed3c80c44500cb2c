//! Module Imports - The call surface a compiled module sees.
//!
//! A sandboxed module gets instantiation, existence checks and the readiness
//! counter. Nothing else: it cannot register components or advance the
//! counter.

use spark_signals::Derived;

use crate::engine::Bridge;
use crate::error::Result;
use crate::types::InstanceHandle;

/// Read-and-instantiate view of a [`Bridge`].
pub struct ModuleImports<T: ?Sized + 'static> {
    bridge: Bridge<T>,
}

impl<T: ?Sized + 'static> Clone for ModuleImports<T> {
    fn clone(&self) -> Self {
        Self {
            bridge: self.bridge.clone(),
        }
    }
}

impl<T: ?Sized + 'static> ModuleImports<T> {
    pub(crate) fn new(bridge: Bridge<T>) -> Self {
        Self { bridge }
    }

    /// See [`Bridge::instantiate`].
    pub fn instantiate(&self, name: &str, target: &T) -> Result<InstanceHandle> {
        self.bridge.instantiate(name, target)
    }

    /// See [`Bridge::component_exists`].
    pub fn component_exists(&self, name: &str) -> bool {
        self.bridge.component_exists(name)
    }

    /// See [`Bridge::loading_progress`].
    pub fn loading_progress(&self) -> u32 {
        self.bridge.loading_progress()
    }

    /// Read-only view of the readiness counter, for module-side effects.
    pub fn progress_derived(&self) -> Derived<u32> {
        self.bridge.progress_derived()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use spark_signals::effect;

    use crate::pipeline::HostContext;
    use crate::types::Props;

    #[test]
    fn test_imports_see_later_registrations() {
        let host: HostContext<RefCell<u32>> = HostContext::new();
        host.initialize();
        let imports = host.imports().unwrap();

        assert!(!imports.component_exists("Late"));
        host.register_component("Late", |target: &RefCell<u32>, _: &Props| {
            *target.borrow_mut() += 1;
        })
        .unwrap();
        assert!(imports.component_exists("Late"));

        let target = RefCell::new(0);
        imports.clone().instantiate("Late", &target).unwrap();
        assert_eq!(*target.borrow(), 1);
    }

    #[test]
    fn test_module_effect_on_progress() {
        let host: HostContext<()> = HostContext::new();
        host.initialize();
        let imports = host.imports().unwrap();
        let tracker = host.load_tracker().unwrap();

        let ready = Rc::new(RefCell::new(false));
        let ready_clone = ready.clone();
        let progress = imports.progress_derived();
        let _effect = effect(move || {
            *ready_clone.borrow_mut() = progress.get() >= 2;
        });

        tracker.mark_loaded();
        assert!(!*ready.borrow());
        tracker.mark_loaded();
        assert!(*ready.borrow());
        assert_eq!(imports.loading_progress(), 2);
    }

    #[test]
    fn test_module_view_tracks_only_the_tracker() {
        let host: HostContext<()> = HostContext::new();
        host.initialize();
        let imports = host.imports().unwrap();
        let tracker = host.load_tracker().unwrap();
        let view = imports.progress_derived();

        let mut previous = imports.loading_progress();
        for _ in 0..3 {
            let loaded = tracker.mark_loaded();
            assert!(loaded > previous);
            assert_eq!(view.get(), loaded);
            assert_eq!(imports.loading_progress(), loaded);
            assert_eq!(tracker.loaded(), loaded);
            previous = loaded;
        }
        assert_eq!(host.loading_progress(), 3);
    }
}
