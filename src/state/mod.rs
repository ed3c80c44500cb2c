//! State Module - Runtime state shared across the bridge
//!
//! - **Progress** - Readiness counter, load tickets, pending-load wakers

mod progress;

pub use progress::LoadTracker;
pub(crate) use progress::ReadinessCounter;
