//! Class Loader - Host module generation and pending loads.
//!
//! Loading classes that are not yet in the bridge happens in two halves:
//!
//! ```text
//! module side                            host side
//! ───────────                            ─────────
//! load(["A","B"], "./ui.js")
//!   → declare handles in ClassTable
//!   → issue ticket n
//!   → generated source ───────────────▶  evaluate source
//!                                          import { A, B } from './ui.js'
//!                                          components.A = A; components.B = B
//!   PendingClasses (waits) ◀──────────── loaded += 1  (LoadTracker::mark_loaded)
//! ```
//!
//! A pending load with ticket `n` resolves once the readiness counter is
//! greater than `n`. Loads are expected to complete in the order they were
//! requested.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use tracing::debug;

use crate::config::BridgeConfig;
use crate::engine::ClassTable;
use crate::error::{BridgeError, Result};
use crate::state::{LoadTracker, ReadinessCounter};
use crate::types::ClassHandle;
use super::host::HostContext;

// =============================================================================
// Source Generation
// =============================================================================

/// Check that `name` can be used as a class identifier in generated source.
pub fn is_valid_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn validate(classes: &[&str], src: &str) -> Result<()> {
    if let Some(bad) = classes.iter().find(|name| !is_valid_class_name(name)) {
        return Err(BridgeError::InvalidComponentName(bad.to_string()));
    }
    if src.is_empty() || src.contains(['\'', '"', '\\', '\n', '\r']) {
        return Err(BridgeError::InvalidModuleSource(src.to_string()));
    }
    Ok(())
}

/// Build host module source that imports `classes` from `src`, installs them
/// in the bridge namespace and bumps the readiness counter.
pub fn build_class_loading_module(
    config: &BridgeConfig,
    classes: &[&str],
    src: &str,
) -> Result<String> {
    validate(classes, src)?;

    let namespace = config.namespace_path();
    let components = config.components_path();
    let loaded = config.loaded_path();

    let mut code = format!("import {{ {} }} from '{}';\n", classes.join(", "), src);
    code += &format!(
        "{namespace} = {namespace} || {{ {}: {{}}, {}: 0 }};\n",
        config.components_key, config.loaded_key
    );
    for class in classes {
        code += &format!("{components}.{class} = {class};\n");
    }
    code += &format!("{loaded} = ({loaded} || 0) + 1;\n");
    Ok(code)
}

// =============================================================================
// Pending Loads
// =============================================================================

/// Future that resolves once the load holding `ticket` has completed.
///
/// The load itself happens on the host regardless of whether this future is
/// polled. Polling only checks the readiness counter.
pub struct PendingLoad {
    ticket: u32,
    counter: Rc<ReadinessCounter>,
}

impl PendingLoad {
    pub fn ticket(&self) -> u32 {
        self.ticket
    }

    /// Check completion without polling.
    pub fn is_ready(&self) -> bool {
        self.counter.is_complete(self.ticket)
    }
}

impl Future for PendingLoad {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.is_ready() {
            Poll::Ready(())
        } else {
            self.counter.register_waker(cx.waker());
            Poll::Pending
        }
    }
}

/// A pending load that yields the class handles it declared.
pub struct PendingClasses {
    load: PendingLoad,
    handles: Vec<ClassHandle>,
}

impl PendingClasses {
    /// Handles declared for this load. Usable once the load resolves.
    pub fn handles(&self) -> &[ClassHandle] {
        &self.handles
    }

    pub fn ticket(&self) -> u32 {
        self.load.ticket
    }
}

impl Future for PendingClasses {
    type Output = Vec<ClassHandle>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Vec<ClassHandle>> {
        match Pin::new(&mut self.load).poll(cx) {
            Poll::Ready(()) => Poll::Ready(std::mem::take(&mut self.handles)),
            Poll::Pending => Poll::Pending,
        }
    }
}

// =============================================================================
// Class Loader
// =============================================================================

/// Output of [`ClassLoader::load`].
pub struct ClassLoad {
    /// Module source for the host to evaluate.
    pub source: String,
    /// Resolves to the declared handles once the host reports completion.
    pub pending: PendingClasses,
}

/// Issues class loads against one bridge's readiness counter.
pub struct ClassLoader {
    config: BridgeConfig,
    tracker: LoadTracker,
}

impl ClassLoader {
    pub fn new(config: BridgeConfig, tracker: LoadTracker) -> Self {
        Self { config, tracker }
    }

    /// Loader for an initialized host context.
    pub fn from_host<T: ?Sized + 'static>(host: &HostContext<T>) -> Result<Self> {
        Ok(Self::new(host.config().clone(), host.load_tracker()?))
    }

    /// Start loading `classes` from `src`.
    ///
    /// Declares handles for the classes in `table`, issues a ticket and
    /// returns the host module source plus a future for completion. Invalid
    /// names or sources fail before anything is declared.
    pub fn load(&self, table: &mut ClassTable, classes: &[&str], src: &str) -> Result<ClassLoad> {
        let source = build_class_loading_module(&self.config, classes, src)?;
        let handles = table.declare(classes);
        let pending = PendingClasses {
            load: self.pending(self.tracker.issue_ticket()),
            handles,
        };
        debug!(
            classes = classes.len(),
            src,
            ticket = pending.ticket(),
            "prepared class loading module"
        );
        Ok(ClassLoad { source, pending })
    }

    /// Future for an already issued ticket.
    pub fn pending(&self, ticket: u32) -> PendingLoad {
        PendingLoad {
            ticket,
            counter: self.tracker.counter().clone(),
        }
    }

    pub fn tracker(&self) -> &LoadTracker {
        &self.tracker
    }
}

// =============================================================================
// Tests
// =============================================================================
