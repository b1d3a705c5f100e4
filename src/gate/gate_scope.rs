/// Execution context threaded through internal namespace calls.
///
/// Compound operations acquire the gate once, at the outermost call; nested
/// steps (batch element resolution, ancestor walks) run with
/// [`GateScope::Held`] so they never try to re-acquire it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateScope {
    /// The caller does not hold the gate; acquire it for the duration.
    Acquire,

    /// An enclosing call already holds the gate.
    Held,
}
