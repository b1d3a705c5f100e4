use crate::key_codec::KeyRange;
use std::ops::Bound;

/// Bounds for a backing-store range scan, over physical keys.
///
/// When both an exclusive and an inclusive bound are given on the same side,
/// the tighter one applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub gt: Option<Vec<u8>>,
    pub gte: Option<Vec<u8>>,
    pub lt: Option<Vec<u8>>,
    pub lte: Option<Vec<u8>>,
    pub limit: Option<usize>,
    pub reverse: bool,
}

impl ScanOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Effective lower bound.
    pub fn lower_bound(&self) -> Bound<&[u8]> {
        match (self.gt.as_deref(), self.gte.as_deref()) {
            (Some(gt), Some(gte)) if gte > gt => Bound::Included(gte),
            (Some(gt), _) => Bound::Excluded(gt),
            (None, Some(gte)) => Bound::Included(gte),
            (None, None) => Bound::Unbounded,
        }
    }

    /// Effective upper bound.
    pub fn upper_bound(&self) -> Bound<&[u8]> {
        match (self.lt.as_deref(), self.lte.as_deref()) {
            (Some(lt), Some(lte)) if lte < lt => Bound::Included(lte),
            (Some(lt), _) => Bound::Excluded(lt),
            (None, Some(lte)) => Bound::Included(lte),
            (None, None) => Bound::Unbounded,
        }
    }
}

impl From<&KeyRange> for ScanOptions {
    fn from(range: &KeyRange) -> Self {
        Self {
            gte: Some(range.start.clone()),
            lt: range.end.clone(),
            ..Self::default()
        }
    }
}
