use super::{Entry, Namespace};
use crate::backing_store::traits::{AsyncStoreReader, BackingStore};
use crate::backing_store::{BatchOp, ScanOptions};
use crate::constants::LINK_SENTINEL;
use crate::gate::GateScope;
use crate::key_codec::{encode_key, encode_link, namespace_range};
use futures::TryStreamExt;
use std::collections::HashSet;
use std::io::Result;
use tracing::trace;

impl<S: BackingStore> Namespace<S> {
    /// Appends the link markers this namespace's ancestors are missing.
    ///
    /// Walks upward from `self`. At each step the parent is probed for a
    /// marker naming the current namespace; the walk stops at the first one
    /// found, since everything above it is already linked. Otherwise any plain
    /// value shadowed by the new marker is deleted and the marker is written.
    ///
    /// The caller holds the gate.
    pub(crate) async fn extend_links(&self, ops: &mut Vec<BatchOp>) -> Result<()> {
        let mut current = self.clone();

        while let Some(parent) = current.superlink() {
            let Some(name) = current.name() else { break };
            match parent.get_in(name, GateScope::Held).await? {
                Some(Entry::Namespace(_)) => break,
                Some(Entry::Value(_)) => {
                    ops.push(BatchOp::del(encode_key(parent.prefix(), name)));
                }
                None => {}
            }
            trace!(namespace = %parent, name, "creating link marker");
            ops.push(BatchOp::put(encode_link(parent.prefix(), name), LINK_SENTINEL));

            current = parent;
        }
        Ok(())
    }

    /// Appends deletions for the link markers of namespaces `ops` empties.
    ///
    /// Walks upward from `self`. A namespace is empty when a capped scan of
    /// its own range finds nothing besides keys `ops` already deletes (and
    /// `ops` writes nothing into it); its marker in the parent is then
    /// deleted, which in turn may empty the parent. The walk stops at the
    /// first namespace that keeps an entry, or at the root.
    ///
    /// The caller holds the gate.
    pub(crate) async fn retire_links(&self, ops: &mut Vec<BatchOp>) -> Result<()> {
        let mut current = self.clone();

        while let Some(parent) = current.superlink() {
            let Some(name) = current.name() else { break };

            if current.retains_entries(ops).await? {
                break;
            }

            trace!(namespace = %parent, name, "retiring link marker");
            ops.push(BatchOp::del(encode_link(parent.prefix(), name)));

            current = parent;
        }
        Ok(())
    }

    /// Whether this namespace still holds an entry once `pending` applies.
    ///
    /// At most `pending deletions in range + 1` keys are scanned: if a
    /// surviving key exists, it is among them.
    async fn retains_entries(&self, pending: &[BatchOp]) -> Result<bool> {
        let range = namespace_range(&self.prefix);

        let mut deleted = HashSet::new();
        for op in pending.iter().filter(|op| range.contains(op.key())) {
            if op.is_put() {
                return Ok(true);
            }
            deleted.insert(op.key());
        }

        let probe = ScanOptions::from(&range).with_limit(deleted.len() + 1);
        let mut keys = self.store.scan_keys(probe);
        while let Some(key) = keys.try_next().await? {
            if !deleted.contains(key.as_slice()) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
