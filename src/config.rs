//! Bridge configuration.
//!
//! The registry itself needs no settings. The configuration names the host-side
//! namespace the class loader writes into when it generates module source.

/// Default host namespace holding the bridge state.
pub const DEFAULT_NAMESPACE: &str = "__spark_bridge";

/// Default key of the component map inside the namespace.
pub const DEFAULT_COMPONENTS_KEY: &str = "components";

/// Default key of the readiness counter inside the namespace.
pub const DEFAULT_LOADED_KEY: &str = "loaded";

/// Settings shared by a host context and every bridge it creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Global object key under which the host keeps bridge state.
    pub namespace: String,
    /// Key of the name → component map inside the namespace.
    pub components_key: String,
    /// Key of the readiness counter inside the namespace.
    pub loaded_key: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            components_key: DEFAULT_COMPONENTS_KEY.to_string(),
            loaded_key: DEFAULT_LOADED_KEY.to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different host namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Use a different component map key.
    pub fn with_components_key(mut self, key: impl Into<String>) -> Self {
        self.components_key = key.into();
        self
    }

    /// Use a different readiness counter key.
    pub fn with_loaded_key(mut self, key: impl Into<String>) -> Self {
        self.loaded_key = key.into();
        self
    }

    /// Host expression for the namespace object, e.g. `window.__spark_bridge`.
    pub fn namespace_path(&self) -> String {
        format!("window.{}", self.namespace)
    }

    /// Host expression for the component map.
    pub fn components_path(&self) -> String {
        format!("{}.{}", self.namespace_path(), self.components_key)
    }

    /// Host expression for the readiness counter.
    pub fn loaded_path(&self) -> String {
        format!("{}.{}", self.namespace_path(), self.loaded_key)
    }
}
