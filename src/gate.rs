//! Reader/writer gate serializing compound namespace operations.
//!
//! One gate is created per root handle and shared (by `Arc`) with every
//! handle derived from it. Writes exclude each other and all reads; reads may
//! overlap. The gate is in-process only.

mod gate_permit;
pub use gate_permit::{Access, GatePermit};

mod gate_scope;
pub use gate_scope::GateScope;

mod rw_gate;
pub use rw_gate::RwGate;

/// Acquisition protocol every gate implementation follows.
///
/// `read()` and `write()` resolve once the caller holds the gate in that
/// mode; every successful acquisition is paired with exactly one `unlock()`.
/// Prefer [`GatePermit::acquire`], which pairs the two automatically.
#[async_trait::async_trait]
pub trait Gate: Send + Sync {
    async fn read(&self);

    async fn write(&self);

    /// Releases one acquisition.
    ///
    /// # Panics
    /// Implementations may panic when nothing is held; that indicates broken
    /// acquisition accounting and is not recoverable.
    fn unlock(&self);
}
