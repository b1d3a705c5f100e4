use crate::backing_store::traits::{AsyncStoreReader, AsyncStoreWriter};
use crate::backing_store::{BatchOp, ScanOptions};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::BTreeMap;
use std::io::{Error, ErrorKind, Result};
use std::ops::Bound;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// Ordered, in-memory backing store.
///
/// Keys are kept in a `BTreeMap` behind a `RwLock`, giving byte-order
/// iteration and atomic batches (the whole batch is applied under one write
/// guard). Clones share the same underlying map.
///
/// Scans are **lazy**: every poll re-enters the map, fetches the single next
/// entry after the cursor and releases the lock again, so nothing is buffered
/// and writers are never blocked by a slow consumer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<Entries>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of physical keys currently stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_guard()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_guard()?.is_empty())
    }

    /// Copies out every physical `(key, value)` pair in key order.
    pub fn entries(&self) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self
            .read_guard()?
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Entries>> {
        read_entries(&self.entries)
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Entries>> {
        self.entries
            .write()
            .map_err(|_| Error::new(ErrorKind::Other, "Failed to acquire write lock"))
    }

    fn scan(&self, opts: ScanOptions) -> BoxStream<'static, Result<(Vec<u8>, Vec<u8>)>> {
        let cursor = ScanCursor {
            entries: Arc::clone(&self.entries),
            opts,
            position: None,
            yielded: 0,
        };

        stream::unfold(Some(cursor), |state| async move {
            let mut cursor = state?;
            match cursor.advance() {
                Ok(Some(entry)) => Some((Ok(entry), Some(cursor))),
                Ok(None) => None,
                // Surface the failure once, then end the stream.
                Err(err) => Some((Err(err), None)),
            }
        })
        .boxed()
    }
}

fn read_entries(entries: &RwLock<Entries>) -> Result<RwLockReadGuard<'_, Entries>> {
    entries
        .read()
        .map_err(|_| Error::new(ErrorKind::Other, "Failed to acquire read lock"))
}

/// Resumable position inside a range scan.
struct ScanCursor {
    entries: Arc<RwLock<Entries>>,
    opts: ScanOptions,
    /// Last key yielded; the next entry is strictly beyond it.
    position: Option<Vec<u8>>,
    yielded: usize,
}

impl ScanCursor {
    fn advance(&mut self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        if self.opts.limit.is_some_and(|limit| self.yielded >= limit) {
            return Ok(None);
        }

        let next = {
            let entries = read_entries(&self.entries)?;

            let mut lower = self.opts.lower_bound();
            let mut upper = self.opts.upper_bound();
            if let Some(position) = self.position.as_deref() {
                if self.opts.reverse {
                    upper = Bound::Excluded(position);
                } else {
                    lower = Bound::Excluded(position);
                }
            }

            if is_empty_range(lower, upper) {
                return Ok(None);
            }

            let mut range = entries.range::<[u8], _>((lower, upper));
            let found = if self.opts.reverse {
                range.next_back()
            } else {
                range.next()
            };
            found.map(|(key, value)| (key.clone(), value.clone()))
        };

        if let Some((key, _)) = &next {
            self.position = Some(key.clone());
            self.yielded += 1;
        }
        Ok(next)
    }
}

/// `BTreeMap::range` panics on inverted or empty-exclusive bounds.
fn is_empty_range(lower: Bound<&[u8]>, upper: Bound<&[u8]>) -> bool {
    match (lower, upper) {
        (Bound::Included(start), Bound::Included(end)) => start > end,
        (Bound::Included(start), Bound::Excluded(end))
        | (Bound::Excluded(start), Bound::Included(end))
        | (Bound::Excluded(start), Bound::Excluded(end)) => start >= end,
        _ => false,
    }
}

#[async_trait::async_trait]
impl AsyncStoreReader for MemoryStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.read_guard()?.get(key).cloned())
    }

    fn scan_keys(&self, opts: ScanOptions) -> BoxStream<'static, Result<Vec<u8>>> {
        self.scan(opts)
            .map(|entry| entry.map(|(key, _)| key))
            .boxed()
    }

    fn scan_entries(&self, opts: ScanOptions) -> BoxStream<'static, Result<(Vec<u8>, Vec<u8>)>> {
        self.scan(opts)
    }
}

#[async_trait::async_trait]
impl AsyncStoreWriter for MemoryStore {
    async fn del(&self, key: &[u8]) -> Result<()> {
        self.write_guard()?.remove(key);
        Ok(())
    }

    async fn batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        let mut entries = self.write_guard()?;
        trace!(ops = ops.len(), "applying memory batch");

        for op in ops {
            match op {
                BatchOp::Put { key, value } => {
                    entries.insert(key, value);
                }
                BatchOp::Del { key } => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}
