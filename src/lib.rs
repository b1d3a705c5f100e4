//! Hierarchical sub-namespaces over a flat, ordered key-value store.
//!
//! A [`Namespace`] scopes `get`/`put`/`del`/`batch` and iteration to one
//! partition of the store's key space. Partitions nest: writing below a name
//! turns that name into a *link* to a sub-namespace, and reading or iterating
//! the parent yields an [`Entry::Namespace`] handle for it instead of a value.
//!
//! Every mutation is submitted to the backing store as exactly one atomic
//! batch, which also keeps the link markers of all ancestors consistent.
//!
//! ```rust
//! use std::sync::Arc;
//! use sublink::{Entry, MemoryStore};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let root = sublink::open(Arc::new(MemoryStore::new()));
//!
//! root.put("x", b"42").await?;
//! root.sublink("y").put("x", b"42").await?;
//!
//! assert!(matches!(root.get("y").await?, Some(Entry::Namespace(_))));
//! # Ok::<(), std::io::Error>(())
//! # }).unwrap();
//! ```

pub mod backing_store;
pub use backing_store::traits::{AsyncStoreReader, AsyncStoreWriter, BackingStore};
pub use backing_store::{BatchOp, MemoryStore, ScanOptions};

pub mod constants;

pub mod gate;
pub use gate::{Gate, GateScope, RwGate};

pub mod key_codec;

mod namespace;
pub use namespace::{Entry, Namespace, Op, ReadOptions};

use std::sync::Arc;

/// Opens the root namespace of `store`, guarded by a fresh [`RwGate`].
pub fn open<S: BackingStore>(store: Arc<S>) -> Namespace<S> {
    Namespace::open(store)
}

/// Opens the root namespace of `store`, guarded by `gate`.
///
/// Every handle derived from the returned root shares `gate`.
pub fn open_with_gate<S: BackingStore>(store: Arc<S>, gate: Arc<dyn Gate>) -> Namespace<S> {
    Namespace::open_with_gate(store, gate)
}
