//! Class Table - Handle-based view of the bridge for module code.
//!
//! The sandboxed module refers to component classes by small copyable
//! handles instead of strings. The table maps handles to class names and
//! resolves them against a [`Bridge`] when an instance is attached.
//!
//! Classes enter the table two ways:
//! - `preloaded`: the host already registered the name with the bridge
//! - `declare`: the name will be supplied by a module load still in flight

use tracing::debug;

use crate::error::{BridgeError, Result};
use crate::types::{ClassHandle, InstanceHandle};
use super::registry::Bridge;

/// A component class known to the module side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentClass {
    name: String,
}

impl ComponentClass {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Handle allocation for component classes.
#[derive(Debug, Default)]
pub struct ClassTable {
    data: Vec<ComponentClass>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a class handle by name.
    pub fn find_by_name(&self, name: &str) -> Option<ClassHandle> {
        self.data
            .iter()
            .position(|class| class.name == name)
            .map(|index| ClassHandle { index })
    }

    /// Get a handle for a class the host has already registered.
    ///
    /// Returns the existing handle if the name is in the table, allocates a
    /// new one if `bridge` knows the name, and `None` otherwise.
    pub fn preloaded<T: ?Sized + 'static>(
        &mut self,
        bridge: &Bridge<T>,
        name: &str,
    ) -> Option<ClassHandle> {
        if let Some(handle) = self.find_by_name(name) {
            return Some(handle);
        }
        if bridge.component_exists(name) {
            return Some(self.push(name));
        }
        None
    }

    /// Add handles for classes that a pending load will register.
    ///
    /// Names already in the table keep their handle.
    pub fn declare(&mut self, names: &[&str]) -> Vec<ClassHandle> {
        names
            .iter()
            .map(|name| self.find_by_name(name).unwrap_or_else(|| self.push(name)))
            .collect()
    }

    pub fn get(&self, handle: ClassHandle) -> Option<&ComponentClass> {
        self.data.get(handle.index)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Construct a new instance of the class behind `handle` at `target`.
    ///
    /// Fails with `UnknownClassHandle` when the handle did not come from this
    /// table, and with `UnregisteredComponent` when the class has not reached
    /// the bridge yet (e.g. its load is still pending).
    pub fn attach_new_instance<T: ?Sized + 'static>(
        &self,
        handle: ClassHandle,
        bridge: &Bridge<T>,
        target: &T,
    ) -> Result<InstanceHandle> {
        let class = self
            .get(handle)
            .ok_or(BridgeError::UnknownClassHandle(handle.index))?;
        bridge.instantiate(class.name(), target)
    }

    fn push(&mut self, name: &str) -> ClassHandle {
        let index = self.data.len();
        self.data.push(ComponentClass {
            name: name.to_string(),
        });
        debug!(class = name, index, "added component class");
        ClassHandle { index }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::config::BridgeConfig;
    use crate::state::ReadinessCounter;
    use crate::types::Props;

    fn bridge_with(names: &[&'static str]) -> Bridge<RefCell<Vec<String>>> {
        let bridge = Bridge::new(BridgeConfig::default(), ReadinessCounter::new());
        for &name in names {
            bridge.register_component(name, move |target: &RefCell<Vec<String>>, _: &Props| {
                target.borrow_mut().push(name.to_string());
            })
            .unwrap();
        }
        bridge
    }

    #[test]
    fn test_preloaded_registered_name() {
        let bridge = bridge_with(&["Header"]);
        let mut table = ClassTable::new();

        let handle = table.preloaded(&bridge, "Header").unwrap();
        assert_eq!(handle.index(), 0);
        assert_eq!(table.get(handle).unwrap().name(), "Header");

        // Second lookup reuses the handle
        assert_eq!(table.preloaded(&bridge, "Header"), Some(handle));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_preloaded_unknown_name() {
        let bridge = bridge_with(&[]);
        let mut table = ClassTable::new();

        assert_eq!(table.preloaded(&bridge, "Nope"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_declare_keeps_existing_handles() {
        let bridge = bridge_with(&["Header"]);
        let mut table = ClassTable::new();

        let header = table.preloaded(&bridge, "Header").unwrap();
        let handles = table.declare(&["Footer", "Header"]);

        assert_eq!(handles[0].index(), 1);
        assert_eq!(handles[1], header);
        assert_eq!(table.find_by_name("Footer"), Some(handles[0]));
    }

    #[test]
    fn test_attach_new_instance() {
        let bridge = bridge_with(&["Header"]);
        let mut table = ClassTable::new();
        let handle = table.preloaded(&bridge, "Header").unwrap();

        let target = RefCell::new(Vec::new());
        let instance = table.attach_new_instance(handle, &bridge, &target).unwrap();

        assert_eq!(instance.component(), "Header");
        assert_eq!(*target.borrow(), vec!["Header"]);
    }

    #[test]
    fn test_attach_foreign_handle() {
        let bridge = bridge_with(&["Header"]);
        let mut other = ClassTable::new();
        other.declare(&["A", "B", "C"]);
        let foreign = other.find_by_name("C").unwrap();

        let mut table = ClassTable::new();
        table.preloaded(&bridge, "Header").unwrap();

        let target = RefCell::new(Vec::new());
        assert_eq!(
            table.attach_new_instance(foreign, &bridge, &target),
            Err(BridgeError::UnknownClassHandle(2))
        );
        assert!(target.borrow().is_empty());
        assert_eq!(bridge.instance_count(), 0);
    }

    #[test]
    fn test_attach_declared_before_registration() {
        let bridge = bridge_with(&[]);
        let mut table = ClassTable::new();
        let handle = table.declare(&["Late"])[0];

        let target = RefCell::new(Vec::new());
        assert_eq!(
            table.attach_new_instance(handle, &bridge, &target),
            Err(BridgeError::UnregisteredComponent("Late".to_string()))
        );

        bridge.register_component("Late", |target: &RefCell<Vec<String>>, _: &Props| {
            target.borrow_mut().push("late".to_string());
        })
        .unwrap();
        assert!(table.attach_new_instance(handle, &bridge, &target).is_ok());
        assert_eq!(*target.borrow(), vec!["late"]);
    }
}
