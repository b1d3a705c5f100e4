use crate::backing_store::ScanOptions;
use futures::stream::BoxStream;
use std::io::Result;

#[async_trait::async_trait]
pub trait AsyncStoreReader: Send + Sync {
    /// Point lookup of a physical key.
    ///
    /// # Returns:
    /// - `Ok(Some(value))`: The stored value.
    /// - `Ok(None)`: The key is absent. A miss is **not** an error.
    /// - `Err(std::io::Error)`: On engine failure.
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Lazily yields the physical keys inside `opts`, in byte order
    /// (descending when `opts.reverse` is set).
    ///
    /// The stream is finite and owns everything it needs; calling the method
    /// again starts a fresh iteration over the store's current contents.
    fn scan_keys(&self, opts: ScanOptions) -> BoxStream<'static, Result<Vec<u8>>>;

    /// Like [`Self::scan_keys`], yielding `(key, value)` pairs.
    fn scan_entries(&self, opts: ScanOptions) -> BoxStream<'static, Result<(Vec<u8>, Vec<u8>)>>;
}
