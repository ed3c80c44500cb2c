//! # spark-bridge
//!
//! Component bridge registry between sandboxed modules and host-defined UI components.
//!
//! A compiled module running in a sandbox cannot hold references into the host
//! page's object graph. The bridge gives it a narrow way in: the host registers
//! component descriptors under string names, and the module asks the bridge to
//! instantiate a name into a mount target, checks whether a name exists, or
//! polls a readiness counter.
//!
//! ## Architecture
//!
//! ```text
//! HostContext (composition root)
//!   └─ Bridge<T> ── name → ComponentDescriptor<T>
//!        ├─ ModuleImports<T>   (module side: instantiate, exists, progress)
//!        └─ ReadinessCounter   (Signal<u32> behind a Derived view, advanced by LoadTracker)
//! ```
//!
//! `T` is the mount target type. The bridge never looks at it or at the
//! descriptors; it stores, passes through, and calls `construct`.
//!
//! ## Modules
//!
//! - [`types`] - Props, descriptors, instance and class handles
//! - [`engine`] - Registry and class table
//! - [`state`] - Readiness counter and load tracker
//! - [`pipeline`] - Host context, module imports, class loader
//! - [`config`] - Host namespace settings
//! - [`error`] - Bridge errors

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::BridgeConfig;

pub use error::{BridgeError, Result};

pub use engine::{Bridge, ClassTable, ComponentClass};

pub use state::LoadTracker;

pub use pipeline::{
    ClassLoad, ClassLoader, HostContext, ModuleImports, PendingClasses, PendingLoad,
    build_class_loading_module, is_valid_class_name,
};
