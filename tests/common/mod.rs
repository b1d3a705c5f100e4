//! Backing-store and gate doubles shared by the integration tests.
#![allow(dead_code)]

use futures::stream::BoxStream;
use std::io::{Error, ErrorKind, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sublink::{
    AsyncStoreReader, AsyncStoreWriter, BatchOp, Gate, MemoryStore, Namespace, ScanOptions,
};

/// Installs a `tracing` subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fresh root namespace over a fresh in-memory store.
pub fn create_root() -> (Arc<MemoryStore>, Namespace<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let root = sublink::open(Arc::clone(&store));
    (store, root)
}

/// Builds the physical key `SEP a SEP SEP b SEP x` from `"~a~~b~x"`.
pub fn physical(readable: &str) -> Vec<u8> {
    readable
        .bytes()
        .map(|b| match b {
            b'~' => sublink::constants::SEPARATOR,
            b'^' => sublink::constants::LINK_SUFFIX,
            other => other,
        })
        .collect()
}

pub fn put(readable: &str, value: &str) -> BatchOp {
    BatchOp::put(physical(readable), value)
}

pub fn link(readable: &str) -> BatchOp {
    BatchOp::put(physical(readable), sublink::constants::LINK_SENTINEL)
}

pub fn del(readable: &str) -> BatchOp {
    BatchOp::del(physical(readable))
}

/// Every physical `(key, value)` pair in the store, with keys made readable.
pub fn dump(store: &MemoryStore) -> Vec<(String, String)> {
    store
        .entries()
        .unwrap()
        .into_iter()
        .map(|(key, value)| (readable(&key), readable(&value)))
        .collect()
}

pub fn readable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            sublink::constants::SEPARATOR => '~',
            sublink::constants::LINK_SUFFIX => '^',
            other => other as char,
        })
        .collect()
}

/// Wraps a [`MemoryStore`], recording every submitted batch.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    batches: Mutex<Vec<Vec<BatchOp>>>,
}

impl RecordingStore {
    /// Drains the batches recorded so far.
    pub fn take_batches(&self) -> Vec<Vec<BatchOp>> {
        std::mem::take(&mut *self.batches.lock().unwrap())
    }
}

#[async_trait::async_trait]
impl AsyncStoreReader for RecordingStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    fn scan_keys(&self, opts: ScanOptions) -> BoxStream<'static, Result<Vec<u8>>> {
        self.inner.scan_keys(opts)
    }

    fn scan_entries(&self, opts: ScanOptions) -> BoxStream<'static, Result<(Vec<u8>, Vec<u8>)>> {
        self.inner.scan_entries(opts)
    }
}

#[async_trait::async_trait]
impl AsyncStoreWriter for RecordingStore {
    async fn del(&self, key: &[u8]) -> Result<()> {
        self.inner.del(key).await
    }

    async fn batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        self.batches.lock().unwrap().push(ops.clone());
        self.inner.batch(ops).await
    }
}

/// Wraps a [`MemoryStore`], sleeping before every point lookup and batch so
/// that concurrent operations interleave at each suspension point.
#[derive(Debug)]
pub struct DelayedStore {
    pub inner: MemoryStore,
    delay: Duration,
}

impl DelayedStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl AsyncStoreReader for DelayedStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(key).await
    }

    fn scan_keys(&self, opts: ScanOptions) -> BoxStream<'static, Result<Vec<u8>>> {
        self.inner.scan_keys(opts)
    }

    fn scan_entries(&self, opts: ScanOptions) -> BoxStream<'static, Result<(Vec<u8>, Vec<u8>)>> {
        self.inner.scan_entries(opts)
    }
}

#[async_trait::async_trait]
impl AsyncStoreWriter for DelayedStore {
    async fn del(&self, key: &[u8]) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.del(key).await
    }

    async fn batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.batch(ops).await
    }
}

/// Wraps a [`MemoryStore`] and fails every call once `fail` is set.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_reads: std::sync::atomic::AtomicBool,
    pub fail_batches: std::sync::atomic::AtomicBool,
}

impl FailingStore {
    fn check(flag: &std::sync::atomic::AtomicBool) -> Result<()> {
        if flag.load(std::sync::atomic::Ordering::SeqCst) {
            Err(Error::new(ErrorKind::BrokenPipe, "injected store failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl AsyncStoreReader for FailingStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Self::check(&self.fail_reads)?;
        self.inner.get(key).await
    }

    fn scan_keys(&self, opts: ScanOptions) -> BoxStream<'static, Result<Vec<u8>>> {
        self.inner.scan_keys(opts)
    }

    fn scan_entries(&self, opts: ScanOptions) -> BoxStream<'static, Result<(Vec<u8>, Vec<u8>)>> {
        self.inner.scan_entries(opts)
    }
}

#[async_trait::async_trait]
impl AsyncStoreWriter for FailingStore {
    async fn del(&self, key: &[u8]) -> Result<()> {
        Self::check(&self.fail_batches)?;
        self.inner.del(key).await
    }

    async fn batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        Self::check(&self.fail_batches)?;
        self.inner.batch(ops).await
    }
}

/// A gate that never blocks anything.
#[derive(Debug, Default)]
pub struct NoopGate;

#[async_trait::async_trait]
impl Gate for NoopGate {
    async fn read(&self) {}

    async fn write(&self) {}

    fn unlock(&self) {}
}
