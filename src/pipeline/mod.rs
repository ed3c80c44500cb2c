//! Bridge Pipeline
//!
//! Connects the two sides of the bridge to the registry.
//!
//! # Call Flow
//!
//! ```text
//! host setup ──▶ HostContext::initialize ──▶ Bridge ◀── ModuleImports ◀── compiled module
//!                HostContext::register_component         instantiate / component_exists
//!                                                        loading_progress
//! ```
//!
//! ## Pieces
//!
//! 1. **host** - Composition root. Creates the registry once, hands out handles
//! 2. **imports** - Narrow surface for the sandboxed module
//! 3. **loader** - Host module generation and pending loads on the readiness counter

pub mod host;
pub mod imports;
pub mod loader;

// Re-exports
pub use host::HostContext;
pub use imports::ModuleImports;
pub use loader::{
    ClassLoad, ClassLoader, PendingClasses, PendingLoad, build_class_loading_module,
    is_valid_class_name,
};
