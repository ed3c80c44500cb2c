//! Core types for spark-bridge.
//!
//! These types cross the boundary between the sandboxed module and the host.
//! The registry stores descriptors and passes mount targets through, but never
//! looks inside either of them.

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Props
// =============================================================================

/// Initial property set handed to a component when it is constructed.
///
/// The bridge always constructs with an empty set. Hosts that build their own
/// props can still use this type when calling descriptors directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Props {
    values: BTreeMap<String, String>,
}

impl Props {
    /// The empty property set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a property.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

// =============================================================================
// Component Descriptor
// =============================================================================

/// A host-defined, constructible component factory.
///
/// `T` is the mount target type. The bridge only ever calls `construct`,
/// handing over the target it received and an empty [`Props`].
///
/// Any `Fn(&T, &Props)` closure is a descriptor:
///
/// ```ignore
/// bridge.register_component("Counter", |target: &Element, _props: &Props| {
///     Counter::new(target).mount();
/// });
/// ```
pub trait ComponentDescriptor<T: ?Sized> {
    /// Construct a new live instance attached at `target`.
    fn construct(&self, target: &T, props: &Props);
}

impl<T: ?Sized, F> ComponentDescriptor<T> for F
where
    F: Fn(&T, &Props),
{
    fn construct(&self, target: &T, props: &Props) {
        self(target, props)
    }
}

// =============================================================================
// Instance Handle
// =============================================================================

/// Opaque handle for a component instance created through the bridge.
///
/// Carries the component name and a serial number unique within one registry.
/// The bridge does not track instances after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceHandle {
    component: String,
    serial: u64,
}

impl InstanceHandle {
    pub(crate) fn new(component: &str, serial: u64) -> Self {
        Self {
            component: component.to_string(),
            serial,
        }
    }

    /// Name the instance was created from.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Serial number, starting at 0 for the first instance of a registry.
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl fmt::Display for InstanceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.component, self.serial)
    }
}

// =============================================================================
// Class Handle
// =============================================================================

/// Index of a component class in a [`ClassTable`](crate::engine::ClassTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassHandle {
    pub(crate) index: usize,
}

impl ClassHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}
