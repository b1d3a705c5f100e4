use crate::backing_store::traits::{AsyncStoreReader, AsyncStoreWriter, BackingStore};
use crate::backing_store::{BatchOp, ScanOptions};
use crate::gate::{Access, Gate, GatePermit, GateScope, RwGate};
use crate::key_codec::{child_prefix, encode_key, encode_link, subtree_range, validate_segment};
use futures::TryStreamExt;
use std::fmt;
use std::io::Result;
use std::sync::Arc;
use tracing::debug;

mod ancestors;

mod batch;
pub use batch::Op;

mod entry;
pub use entry::Entry;

mod link_ledger;
use link_ledger::LinkLedger;

mod read_options;
pub use read_options::ReadOptions;

mod streams;

/// Handle on one namespace of a backing store.
///
/// A handle is just `(store, path)`: deriving children with [`Self::sublink`]
/// or the parent with [`Self::superlink`] performs no I/O, and handles are
/// never persisted. Only the effects of their operations are.
///
/// Every handle derived from the same root shares that root's [`Gate`], so
/// compound operations issued through different handles still exclude each
/// other.
pub struct Namespace<S: BackingStore> {
    store: Arc<S>,
    gate: Arc<dyn Gate>,
    path: Vec<String>,
    prefix: Vec<u8>,
}

impl<S: BackingStore> Clone for Namespace<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            gate: Arc::clone(&self.gate),
            path: self.path.clone(),
            prefix: self.prefix.clone(),
        }
    }
}

impl<S: BackingStore> Namespace<S> {
    /// Opens the root namespace of `store` with a fresh [`RwGate`].
    pub fn open(store: Arc<S>) -> Self {
        Self::open_with_gate(store, Arc::new(RwGate::new()))
    }

    /// Opens the root namespace of `store`, sharing `gate` with every handle
    /// derived from it.
    pub fn open_with_gate(store: Arc<S>, gate: Arc<dyn Gate>) -> Self {
        Self {
            store,
            gate,
            path: Vec::new(),
            prefix: Vec::new(),
        }
    }

    /// Derives the handle of the child namespace `name`. Pure; no I/O.
    ///
    /// A name containing the reserved `\0` byte is reported by the first
    /// operation on the derived handle.
    pub fn sublink(&self, name: &str) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(name.to_owned());

        Self {
            store: Arc::clone(&self.store),
            gate: Arc::clone(&self.gate),
            prefix: child_prefix(&self.prefix, name),
            path,
        }
    }

    /// Derives the parent handle, or `None` for the root. Pure; no I/O.
    pub fn superlink(&self) -> Option<Self> {
        let (name, parent_path) = self.path.split_last()?;
        let prefix_len = self.prefix.len() - name.len() - 2;

        Some(Self {
            store: Arc::clone(&self.store),
            gate: Arc::clone(&self.gate),
            path: parent_path.to_vec(),
            prefix: self.prefix[..prefix_len].to_vec(),
        })
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Own name (last path segment); `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Encoded prefix shared by every physical key of this namespace.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn gate(&self) -> &Arc<dyn Gate> {
        &self.gate
    }

    /// Reads `key`.
    ///
    /// # Returns:
    /// - `Ok(Some(Entry::Namespace(_)))`: `key` is linked; the handle of that
    ///   sub-namespace is returned and any bare value is ignored.
    /// - `Ok(Some(Entry::Value(_)))`: The value stored under `key`.
    /// - `Ok(None)`: Nothing is stored under `key`.
    /// - `Err(std::io::Error)`: Invalid key or backing-store failure.
    pub async fn get(&self, key: &str) -> Result<Option<Entry<S>>> {
        self.get_in(key, GateScope::Acquire).await
    }

    /// Writes `value` under `key`.
    ///
    /// If `key` currently names a sub-namespace, that whole subtree and its
    /// link marker are removed in the same atomic batch. Link markers for this
    /// namespace are created in every ancestor still missing one.
    pub async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.put_in(key, value, GateScope::Acquire).await
    }

    /// Removes `key`, or the entire sub-namespace it names.
    ///
    /// Ancestors left without any entry lose their link markers, bottom-up,
    /// in the same atomic batch.
    pub async fn del(&self, key: &str) -> Result<()> {
        self.del_in(key, GateScope::Acquire).await
    }

    /// Applies `ops` as one atomic batch. See [`Op`] for resolution rules.
    pub async fn batch(&self, ops: Vec<Op>) -> Result<()> {
        self.batch_in(ops, GateScope::Acquire).await
    }

    pub(crate) async fn get_in(&self, key: &str, scope: GateScope) -> Result<Option<Entry<S>>> {
        self.check_key(key)?;
        let _permit = GatePermit::acquire(&self.gate, Access::Read, scope).await;

        let ledger = self.ledger();
        if ledger.is_linked(key).await? {
            return Ok(Some(Entry::Namespace(self.sublink(key))));
        }
        Ok(ledger.value(key).await?.map(Entry::Value))
    }

    pub(crate) async fn put_in(&self, key: &str, value: &[u8], scope: GateScope) -> Result<()> {
        self.check_key(key)?;
        let _permit = GatePermit::acquire(&self.gate, Access::Write, scope).await;

        let mut ops = self.plan_put(key, value).await?;
        self.extend_links(&mut ops).await?;
        self.submit(ops).await
    }

    pub(crate) async fn del_in(&self, key: &str, scope: GateScope) -> Result<()> {
        self.check_key(key)?;
        let _permit = GatePermit::acquire(&self.gate, Access::Write, scope).await;

        let mut ops = self.plan_del(key).await?;
        self.retire_links(&mut ops).await?;
        self.submit(ops).await
    }

    /// Operations replacing whatever `key` holds with `value`.
    ///
    /// The caller holds the gate.
    async fn plan_put(&self, key: &str, value: &[u8]) -> Result<Vec<BatchOp>> {
        let mut ops = if self.ledger().is_linked(key).await? {
            self.plan_unlink(key).await?
        } else {
            Vec::with_capacity(1)
        };
        ops.push(BatchOp::put(encode_key(&self.prefix, key), value));
        Ok(ops)
    }

    /// Operations removing whatever `key` holds.
    ///
    /// The caller holds the gate.
    async fn plan_del(&self, key: &str) -> Result<Vec<BatchOp>> {
        if self.ledger().is_linked(key).await? {
            self.plan_unlink(key).await
        } else {
            Ok(vec![BatchOp::del(encode_key(&self.prefix, key))])
        }
    }

    /// Deletes every physical key below the linked name `key`, then its marker.
    async fn plan_unlink(&self, key: &str) -> Result<Vec<BatchOp>> {
        let range = subtree_range(&self.prefix, key);
        let mut ops: Vec<BatchOp> = self
            .store
            .scan_keys(ScanOptions::from(&range))
            .map_ok(BatchOp::del)
            .try_collect()
            .await?;

        debug!(
            namespace = %self,
            key,
            displaced = ops.len(),
            "dropping displaced sub-namespace"
        );
        ops.push(BatchOp::del(encode_link(&self.prefix, key)));
        Ok(ops)
    }

    async fn submit(&self, ops: Vec<BatchOp>) -> Result<()> {
        debug!(namespace = %self, ops = ops.len(), "submitting batch");
        self.store.batch(ops).await
    }

    fn ledger(&self) -> LinkLedger<'_, S> {
        LinkLedger::new(&self.store, &self.prefix)
    }

    fn check_key(&self, key: &str) -> Result<()> {
        for segment in &self.path {
            validate_segment(segment)?;
        }
        validate_segment(key)
    }
}

impl<S: BackingStore> fmt::Display for Namespace<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "<Sublink {name}>"),
            None => f.write_str("<Sublink>"),
        }
    }
}

impl<S: BackingStore> fmt::Debug for Namespace<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
