use crate::backing_store::traits::{AsyncStoreReader, BackingStore};
use crate::key_codec::{encode_key, encode_link};
use std::io::Result;
use tracing::trace;

/// Point probes deciding whether a name in one namespace is a value or a link.
pub(crate) struct LinkLedger<'a, S: BackingStore> {
    store: &'a S,
    prefix: &'a [u8],
}

impl<'a, S: BackingStore> LinkLedger<'a, S> {
    pub(crate) fn new(store: &'a S, prefix: &'a [u8]) -> Self {
        Self { store, prefix }
    }

    /// `true` when `name` carries a link marker.
    pub(crate) async fn is_linked(&self, name: &str) -> Result<bool> {
        let linked = self.store.get(&encode_link(self.prefix, name)).await?.is_some();
        trace!(name, linked, "link probe");
        Ok(linked)
    }

    /// Physical value stored under the bare `name`, ignoring any link marker.
    pub(crate) async fn value(&self, name: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(&encode_key(self.prefix, name)).await
    }
}
