//! Bridge error types.

/// Errors reported by the component bridge.
///
/// All variants are local and recoverable. The registry stays usable after
/// any of them is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// `instantiate` was asked for a name with no registration.
    #[error("Component '{0}' is not registered with the bridge")]
    UnregisteredComponent(String),

    /// A registration was attempted before the registry was initialized.
    #[error("Component bridge used before initialization. Call initialize() first.")]
    UninitializedRegistry,

    /// A component name that cannot be used as a registry key or class identifier.
    #[error("Invalid component name: '{0}'")]
    InvalidComponentName(String),

    /// A class handle that does not belong to the class table it was used with.
    #[error("Unknown component class handle: {0}")]
    UnknownClassHandle(usize),

    /// A module source specifier that cannot be embedded in generated code.
    #[error("Invalid module source: '{0}'")]
    InvalidModuleSource(String),
}

/// Result alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
