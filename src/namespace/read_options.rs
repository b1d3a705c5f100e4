use crate::backing_store::ScanOptions;
use crate::constants::{LINK_SUFFIX, SEPARATOR};
use crate::key_codec::{encode_key, validate_segment};
use std::io::Result;

/// Bounds for iterating one namespace, expressed in logical keys.
///
/// Bounds are applied on top of the namespace's own key range, so iteration
/// never leaves the namespace. A bound on a name covers its link marker too:
/// `lte("y")` includes the sub-namespace `y`, `gt("y")` excludes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub gt: Option<String>,
    pub gte: Option<String>,
    pub lt: Option<String>,
    pub lte: Option<String>,
    pub limit: Option<usize>,
    pub reverse: bool,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gt(mut self, key: impl Into<String>) -> Self {
        self.gt = Some(key.into());
        self
    }

    pub fn gte(mut self, key: impl Into<String>) -> Self {
        self.gte = Some(key.into());
        self
    }

    pub fn lt(mut self, key: impl Into<String>) -> Self {
        self.lt = Some(key.into());
        self
    }

    pub fn lte(mut self, key: impl Into<String>) -> Self {
        self.lte = Some(key.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Translates these bounds into a physical scan of the namespace at
    /// `prefix`.
    pub(crate) fn to_scan_options(&self, prefix: &[u8]) -> Result<ScanOptions> {
        for bound in [&self.gt, &self.gte, &self.lt, &self.lte].into_iter().flatten() {
            validate_segment(bound)?;
        }

        let with_link = |key: &str| {
            let mut physical = encode_key(prefix, key);
            physical.push(LINK_SUFFIX);
            physical
        };
        let namespace_end = || {
            let mut end = prefix.to_vec();
            end.push(SEPARATOR);
            end
        };

        Ok(ScanOptions {
            gt: self.gt.as_deref().map(with_link),
            gte: Some(encode_key(prefix, self.gte.as_deref().unwrap_or_default())),
            lt: Some(
                self.lt
                    .as_deref()
                    .map_or_else(namespace_end, |key| encode_key(prefix, key)),
            ),
            lte: self.lte.as_deref().map(with_link),
            limit: self.limit,
            reverse: self.reverse,
        })
    }
}
