//! Contract for the flat, ordered key-value engine namespaces are layered on,
//! plus an in-memory reference implementation.

mod batch_op;
pub use batch_op::BatchOp;

mod memory_store;
pub use memory_store::MemoryStore;

mod scan_options;
pub use scan_options::ScanOptions;

pub mod traits;
