use crate::backing_store::BatchOp;
use std::io::Result;

#[async_trait::async_trait]
pub trait AsyncStoreWriter: Send + Sync {
    /// Removes a single physical key. Removing an absent key succeeds.
    async fn del(&self, key: &[u8]) -> Result<()>;

    /// Applies `ops` in order as **one atomic unit**.
    ///
    /// Either every operation becomes visible or none does. Later operations
    /// on the same key override earlier ones.
    ///
    /// # Returns:
    /// - `Ok(())`: The whole batch was applied.
    /// - `Err(std::io::Error)`: Nothing was applied.
    async fn batch(&self, ops: Vec<BatchOp>) -> Result<()>;
}
