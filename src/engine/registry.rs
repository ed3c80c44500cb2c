//! Component Registry - Name → descriptor bridge.
//!
//! Holds the mapping the sandboxed module resolves component names against:
//! - Upsert registration (last registration under a name wins)
//! - Instantiation into an opaque mount target
//! - Existence checks
//! - Read access to the readiness counter
//!
//! Names are never removed. Once registered, a name stays resolvable for the
//! lifetime of the registry.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use spark_signals::Derived;
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::state::ReadinessCounter;
use crate::types::{ComponentDescriptor, InstanceHandle, Props};

// =============================================================================
// Registry State
// =============================================================================

struct BridgeInner<T: ?Sized> {
    /// Map component name to its descriptor.
    components: RefCell<HashMap<String, Rc<dyn ComponentDescriptor<T>>>>,

    /// Serial number for the next instance.
    next_serial: Cell<u64>,

    /// Completed-load counter, shared with the load trackers.
    progress: Rc<ReadinessCounter>,

    config: BridgeConfig,
}

/// Handle to an initialized component registry.
///
/// `T` is the mount target type handed to descriptors. Clones share the same
/// registry. Obtain one from [`HostContext::initialize`](crate::HostContext::initialize).
pub struct Bridge<T: ?Sized + 'static> {
    inner: Rc<BridgeInner<T>>,
}

impl<T: ?Sized + 'static> Clone for Bridge<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Bridge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("registered_components", &self.registered_names())
            .field("instances", &self.instance_count())
            .field("loading_progress", &self.inner.progress.peek())
            .finish()
    }
}

impl<T: ?Sized + 'static> Bridge<T> {
    pub(crate) fn new(config: BridgeConfig, progress: Rc<ReadinessCounter>) -> Self {
        Self {
            inner: Rc::new(BridgeInner {
                components: RefCell::new(HashMap::new()),
                next_serial: Cell::new(0),
                progress,
                config,
            }),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a component descriptor under `name`.
    ///
    /// Overwrites any previous registration with the same name. Fails with
    /// `InvalidComponentName` for an empty name and leaves the registry
    /// unchanged.
    pub fn register_component<D>(&self, name: &str, descriptor: D) -> Result<()>
    where
        D: ComponentDescriptor<T> + 'static,
    {
        if name.is_empty() {
            warn!("rejected component registration with an empty name");
            return Err(BridgeError::InvalidComponentName(name.to_string()));
        }

        let previous = self
            .inner
            .components
            .borrow_mut()
            .insert(name.to_string(), Rc::new(descriptor));

        if previous.is_some() {
            debug!(component = name, "replaced component registration");
        } else {
            debug!(component = name, "registered component");
        }
        Ok(())
    }

    // =========================================================================
    // Instantiation
    // =========================================================================

    /// Construct a new instance of `name` mounted at `target`.
    ///
    /// The descriptor receives `target` untouched and an empty [`Props`].
    /// Returns [`BridgeError::UnregisteredComponent`] without mounting
    /// anything when `name` has no registration.
    pub fn instantiate(&self, name: &str, target: &T) -> Result<InstanceHandle> {
        // Clone the descriptor out so construction can call back into the bridge.
        let descriptor = self.inner.components.borrow().get(name).cloned();
        let Some(descriptor) = descriptor else {
            warn!(component = name, "instantiate called for unregistered component");
            return Err(BridgeError::UnregisteredComponent(name.to_string()));
        };

        let serial = self.inner.next_serial.get();
        self.inner.next_serial.set(serial + 1);

        descriptor.construct(target, &Props::empty());

        let handle = InstanceHandle::new(name, serial);
        debug!(instance = %handle, "mounted component instance");
        Ok(handle)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Check if `name` is currently registered.
    pub fn component_exists(&self, name: &str) -> bool {
        self.inner.components.borrow().contains_key(name)
    }

    /// Number of completed asynchronous loads.
    ///
    /// Note: This creates a reactive dependency when called from a derived/effect.
    pub fn loading_progress(&self) -> u32 {
        self.inner.progress.get()
    }

    /// Read-only reactive view of the readiness counter, for building effects on it.
    ///
    /// Only a [`LoadTracker`](crate::LoadTracker) advances the counter.
    pub fn progress_derived(&self) -> Derived<u32> {
        self.inner.progress.derived()
    }

    /// All registered names, sorted.
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.components.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered names.
    pub fn component_count(&self) -> usize {
        self.inner.components.borrow().len()
    }

    /// Number of instances constructed so far.
    pub fn instance_count(&self) -> u64 {
        self.inner.next_serial.get()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.inner.config
    }

    pub(crate) fn progress(&self) -> &Rc<ReadinessCounter> {
        &self.inner.progress
    }

    /// Whether two handles refer to the same registry.
    pub fn same_registry(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LoadTracker;

    /// Mount target that records what was mounted into it.
    #[derive(Default)]
    struct Mount {
        mounted: RefCell<Vec<String>>,
    }

    fn new_bridge() -> Bridge<Mount> {
        Bridge::new(BridgeConfig::default(), ReadinessCounter::new())
    }

    fn widget(label: &'static str) -> impl Fn(&Mount, &Props) {
        move |target: &Mount, props: &Props| {
            assert!(props.is_empty());
            target.mounted.borrow_mut().push(label.to_string());
        }
    }

    #[test]
    fn test_register_and_exists() {
        let bridge = new_bridge();

        assert!(!bridge.component_exists("Widget"));
        bridge.register_component("Widget", widget("widget")).unwrap();
        assert!(bridge.component_exists("Widget"));

        // Other registrations don't disturb earlier ones
        bridge.register_component("Button", widget("button")).unwrap();
        bridge.register_component("Slider", widget("slider")).unwrap();
        assert!(bridge.component_exists("Widget"));
        assert_eq!(bridge.component_count(), 3);
        assert_eq!(bridge.registered_names(), vec!["Button", "Slider", "Widget"]);
    }

    #[test]
    fn test_instantiate_mounts_at_target() {
        let bridge = new_bridge();
        bridge.register_component("Widget", widget("widget")).unwrap();

        let mount = Mount::default();
        let handle = bridge.instantiate("Widget", &mount).unwrap();

        assert_eq!(*mount.mounted.borrow(), vec!["widget"]);
        assert_eq!(handle.component(), "Widget");
        assert_eq!(handle.serial(), 0);
    }

    #[test]
    fn test_reregister_uses_newest_descriptor() {
        let bridge = new_bridge();
        bridge.register_component("Widget", widget("first")).unwrap();
        bridge.register_component("Widget", widget("second")).unwrap();

        let mount = Mount::default();
        bridge.instantiate("Widget", &mount).unwrap();

        assert_eq!(*mount.mounted.borrow(), vec!["second"]);
        assert_eq!(bridge.component_count(), 1);
    }

    #[test]
    fn test_instantiate_unregistered_fails_without_mount() {
        let bridge = new_bridge();
        bridge.register_component("Widget", widget("widget")).unwrap();

        let mount = Mount::default();
        let err = bridge.instantiate("Missing", &mount).unwrap_err();

        assert_eq!(err, BridgeError::UnregisteredComponent("Missing".to_string()));
        assert!(mount.mounted.borrow().is_empty());
        assert_eq!(bridge.instance_count(), 0);

        // Still usable afterwards
        assert!(bridge.instantiate("Widget", &mount).is_ok());
    }

    #[test]
    fn test_serials_increase() {
        let bridge = new_bridge();
        bridge.register_component("Widget", widget("widget")).unwrap();

        let mount = Mount::default();
        let a = bridge.instantiate("Widget", &mount).unwrap();
        let b = bridge.instantiate("Widget", &mount).unwrap();

        assert_eq!(a.serial(), 0);
        assert_eq!(b.serial(), 1);
        assert_eq!(bridge.instance_count(), 2);
    }

    #[test]
    fn test_empty_name_rejected() {
        let bridge = new_bridge();
        bridge.register_component("Widget", widget("widget")).unwrap();

        assert_eq!(
            bridge.register_component("", widget("nameless")),
            Err(BridgeError::InvalidComponentName(String::new()))
        );
        assert_eq!(bridge.component_count(), 1);
        assert!(!bridge.component_exists(""));
    }

    #[test]
    fn test_descriptor_can_use_bridge_while_constructing() {
        let bridge = new_bridge();
        bridge.register_component("Child", widget("child")).unwrap();

        let inner = bridge.clone();
        bridge.register_component("Parent", move |target: &Mount, _props: &Props| {
            target.mounted.borrow_mut().push("parent".to_string());
            inner.instantiate("Child", target).unwrap();
        })
        .unwrap();

        let mount = Mount::default();
        bridge.instantiate("Parent", &mount).unwrap();

        assert_eq!(*mount.mounted.borrow(), vec!["parent", "child"]);
    }

    #[test]
    fn test_loading_progress_follows_tracker() {
        let bridge = new_bridge();
        let tracker = LoadTracker::new(bridge.progress().clone());

        assert_eq!(bridge.loading_progress(), 0);
        tracker.mark_loaded();
        assert_eq!(bridge.loading_progress(), 1);
        assert_eq!(bridge.progress_derived().get(), 1);
    }

    #[test]
    fn test_clones_share_registry() {
        let bridge = new_bridge();
        let other = bridge.clone();

        other.register_component("Widget", widget("widget")).unwrap();
        assert!(bridge.component_exists("Widget"));
        assert!(bridge.same_registry(&other));
        assert!(!bridge.same_registry(&new_bridge()));
    }
}
