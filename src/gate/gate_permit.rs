use super::{Gate, GateScope};
use std::sync::Arc;
use tracing::trace;

/// Mode in which a permit holds the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Holds one gate acquisition and releases it on drop.
///
/// An operation that bails out early with `?` still unlocks the gate.
#[must_use = "the gate is released as soon as the permit is dropped"]
pub struct GatePermit {
    gate: Arc<dyn Gate>,
}

impl GatePermit {
    /// Acquires `gate` in `access` mode unless `scope` says it is already held.
    ///
    /// # Returns:
    /// - `Some(GatePermit)`: A fresh acquisition, released on drop.
    /// - `None`: `scope` was [`GateScope::Held`]; nothing was acquired.
    pub async fn acquire(gate: &Arc<dyn Gate>, access: Access, scope: GateScope) -> Option<Self> {
        if scope == GateScope::Held {
            return None;
        }

        match access {
            Access::Read => gate.read().await,
            Access::Write => gate.write().await,
        }

        trace!(?access, "gate acquired");
        Some(Self {
            gate: Arc::clone(gate),
        })
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.gate.unlock();
    }
}
