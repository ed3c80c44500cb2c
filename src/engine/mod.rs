//! Bridge Engine - Component registry and class table.
//!
//! The engine manages the core data structures:
//! - Registry: name → descriptor mapping, instantiation, existence checks
//! - ClassTable: handle allocation for classes the module refers to
//!
//! # Architecture
//!
//! Descriptors are NOT inspected. They are stored by name and invoked once per
//! instantiation:
//!
//! ```text
//! host setup ── register_component("Widget", descriptor) ──▶ Bridge
//! module     ── instantiate("Widget", target) ──▶ descriptor.construct(target, {})
//! ```

mod classes;
mod registry;

pub use classes::*;
pub use registry::*;
