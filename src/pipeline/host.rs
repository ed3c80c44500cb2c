//! Host Context - Composition root for the bridge.
//!
//! Owns the registry slot the host page and every compiled module share for
//! one page lifetime. The slot starts empty; `initialize` fills it once and
//! hands out handles to the same registry from then on.
//!
//! # Example
//!
//! ```ignore
//! use spark_bridge::HostContext;
//!
//! let host: HostContext<Element> = HostContext::new();
//!
//! // Host setup: initialize, then register
//! host.initialize();
//! host.register_component("Counter", counter_descriptor)?;
//!
//! // Module side: narrow import surface only
//! let imports = host.imports()?;
//! if imports.component_exists("Counter") {
//!     imports.instantiate("Counter", &mount_point)?;
//! }
//! ```

use std::cell::OnceCell;

use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::engine::Bridge;
use crate::error::{BridgeError, Result};
use crate::state::{LoadTracker, ReadinessCounter};
use crate::types::ComponentDescriptor;
use super::imports::ModuleImports;

// =============================================================================
// Host Context
// =============================================================================

/// Owner of the bridge registry for one hosting process.
///
/// Policy for calls made before [`initialize`](Self::initialize): registration,
/// import and tracker access fail with [`BridgeError::UninitializedRegistry`];
/// [`loading_progress`](Self::loading_progress) reports 0.
pub struct HostContext<T: ?Sized + 'static> {
    config: BridgeConfig,
    bridge: OnceCell<Bridge<T>>,
}

impl<T: ?Sized + 'static> Default for HostContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> HostContext<T> {
    /// Create a context with the default configuration. No registry exists yet.
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            config,
            bridge: OnceCell::new(),
        }
    }

    /// Ensure the registry exists and return a handle to it.
    ///
    /// The first call creates an empty registry with a zero readiness counter.
    /// Later calls return the same registry untouched.
    pub fn initialize(&self) -> Bridge<T> {
        self.bridge
            .get_or_init(|| {
                debug!(namespace = %self.config.namespace, "initializing component bridge");
                Bridge::new(self.config.clone(), ReadinessCounter::new())
            })
            .clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.bridge.get().is_some()
    }

    /// Handle to the registry, if it has been initialized.
    pub fn bridge(&self) -> Option<Bridge<T>> {
        self.bridge.get().cloned()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Register a component descriptor under `name`.
    ///
    /// Same as [`Bridge::register_component`], plus `UninitializedRegistry`
    /// before `initialize`.
    pub fn register_component<D>(&self, name: &str, descriptor: D) -> Result<()>
    where
        D: ComponentDescriptor<T> + 'static,
    {
        let bridge = self.require("register_component", name)?;
        bridge.register_component(name, descriptor)
    }

    /// Number of completed asynchronous loads, 0 before initialization.
    pub fn loading_progress(&self) -> u32 {
        self.bridge
            .get()
            .map(Bridge::loading_progress)
            .unwrap_or(0)
    }

    /// The import surface handed to a compiled module.
    pub fn imports(&self) -> Result<ModuleImports<T>> {
        let bridge = self.require("imports", "")?;
        Ok(ModuleImports::new(bridge.clone()))
    }

    /// Write handle for the readiness counter, for the code that runs loads.
    pub fn load_tracker(&self) -> Result<LoadTracker> {
        let bridge = self.require("load_tracker", "")?;
        Ok(LoadTracker::new(bridge.progress().clone()))
    }

    fn require(&self, operation: &'static str, component: &str) -> Result<&Bridge<T>> {
        self.bridge.get().ok_or_else(|| {
            warn!(operation, component, "component bridge used before initialization");
            BridgeError::UninitializedRegistry
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
