use super::{Entry, Namespace, ReadOptions};
use crate::backing_store::traits::{AsyncStoreReader, BackingStore};
use crate::key_codec::decode_key;
use futures::stream::{self, BoxStream, StreamExt};
use std::io::Result;

impl<S: BackingStore> Namespace<S> {
    /// Lazily iterates the keys of this namespace in byte order.
    ///
    /// Sub-namespaces appear under their own name, with the link suffix
    /// stripped. Entries of nested namespaces are not included.
    ///
    /// # Notes:
    /// - The stream holds no gate; writes may proceed while it is consumed,
    ///   and each yielded key reflects a fully applied batch.
    /// - The stream is not a snapshot: a write landing mid-iteration can be
    ///   visible to later items but not earlier ones, so one stream may mix
    ///   keys from before and after that write.
    /// - Calling the method again restarts iteration from the current state.
    /// - Invalid bounds are reported as the stream's only item.
    pub fn key_stream(&self, opts: ReadOptions) -> BoxStream<'static, Result<String>> {
        let scan = match opts.to_scan_options(&self.prefix) {
            Ok(scan) => scan,
            Err(err) => return stream::once(async move { Err(err) }).boxed(),
        };

        let prefix = self.prefix.clone();
        self.store
            .scan_keys(scan)
            .map(move |key| -> Result<String> { Ok(decode_key(&prefix, &key?)?.key) })
            .boxed()
    }

    /// Lazily iterates `(key, entry)` pairs of this namespace in byte order.
    ///
    /// For a linked name the stored sentinel is replaced by a fresh
    /// [`Entry::Namespace`] handle; every other key yields [`Entry::Value`].
    /// Same consumption rules as [`Self::key_stream`].
    pub fn read_stream(&self, opts: ReadOptions) -> BoxStream<'static, Result<(String, Entry<S>)>> {
        let scan = match opts.to_scan_options(&self.prefix) {
            Ok(scan) => scan,
            Err(err) => return stream::once(async move { Err(err) }).boxed(),
        };

        let namespace = self.clone();
        self.store
            .scan_entries(scan)
            .map(move |entry| -> Result<(String, Entry<S>)> {
                let (key, value) = entry?;
                let decoded = decode_key(namespace.prefix(), &key)?;
                let entry = if decoded.is_link {
                    Entry::Namespace(namespace.sublink(&decoded.key))
                } else {
                    Entry::Value(value)
                };
                Ok((decoded.key, entry))
            })
            .boxed()
    }
}
