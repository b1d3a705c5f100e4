mod reader;
pub use reader::AsyncStoreReader;

mod writer;
pub use writer::AsyncStoreWriter;

/// Everything a [`Namespace`](crate::Namespace) needs from its backing store.
///
/// Implemented automatically for any type providing both halves of the
/// contract.
pub trait BackingStore: AsyncStoreReader + AsyncStoreWriter + 'static {}

impl<T> BackingStore for T where T: AsyncStoreReader + AsyncStoreWriter + 'static {}
