use super::Namespace;
use crate::backing_store::BatchOp;
use crate::backing_store::traits::BackingStore;
use crate::gate::{Access, GatePermit, GateScope};
use crate::key_codec::encode_key;
use futures::future::try_join_all;
use std::collections::HashSet;
use std::io::Result;

/// One element of a namespace batch, addressed by logical key.
///
/// Each element is resolved on its own exactly like [`Namespace::put`] or
/// [`Namespace::del`]: a put or delete aimed at a linked name also drops that
/// sub-namespace. Every element probes the state from **before** the batch.
/// The resolved operations are then merged in sequence order and, where two
/// of them touch the same physical key, the later one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Put { key: String, value: Vec<u8> },
    Del { key: String },
}

impl Op {
    pub fn put(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn del(key: impl Into<String>) -> Self {
        Self::Del { key: key.into() }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Del { key } => key,
        }
    }
}

impl<S: BackingStore> Namespace<S> {
    pub(crate) async fn batch_in(&self, ops: Vec<Op>, scope: GateScope) -> Result<()> {
        if ops.is_empty() {
            return Ok(());
        }
        for op in &ops {
            self.check_key(op.key())?;
        }

        let _permit = GatePermit::acquire(&self.gate, Access::Write, scope).await;

        // Elements resolve concurrently; the first failure aborts the batch.
        let mut resolved = try_join_all(ops.iter().map(|op| self.plan(op))).await?;

        // Unlinking leaves the bare key alone, so a delete following a put of
        // the same key must name it explicitly to override that put.
        for (index, op) in ops.iter().enumerate() {
            if let Op::Del { key } = op {
                let put_earlier = ops[..index]
                    .iter()
                    .any(|earlier| matches!(earlier, Op::Put { key: put_key, .. } if put_key == key));
                if put_earlier {
                    resolved[index].push(BatchOp::del(encode_key(&self.prefix, key)));
                }
            }
        }

        let mut net = last_writer_wins(resolved.into_iter().flatten().collect());

        if net.iter().any(BatchOp::is_put) {
            self.extend_links(&mut net).await?;
        } else {
            self.retire_links(&mut net).await?;
        }

        self.submit(net).await
    }

    async fn plan(&self, op: &Op) -> Result<Vec<BatchOp>> {
        match op {
            Op::Put { key, value } => self.plan_put(key, value).await,
            Op::Del { key } => self.plan_del(key).await,
        }
    }
}

/// Keeps only the last operation per physical key.
///
/// Scans from the end keeping the first occurrence of each key; survivors
/// keep their original relative order.
fn last_writer_wins(ops: Vec<BatchOp>) -> Vec<BatchOp> {
    let mut seen = HashSet::with_capacity(ops.len());
    let mut kept: Vec<BatchOp> = ops
        .into_iter()
        .rev()
        .filter(|op| seen.insert(op.key().to_vec()))
        .collect();
    kept.reverse();
    kept
}
