use super::child_prefix;
use crate::constants::SEPARATOR;

/// Half-open physical key range `[start, end)`; `end = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: Vec<u8>,
    pub end: Option<Vec<u8>>,
}

impl KeyRange {
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && self.end.as_deref().is_none_or(|end| key < end)
    }
}

/// Keys (values and link markers) held directly by the namespace at `prefix`.
pub fn namespace_range(prefix: &[u8]) -> KeyRange {
    let mut end = Vec::with_capacity(prefix.len() + 1);
    end.extend_from_slice(prefix);
    end.push(SEPARATOR);

    KeyRange {
        start: prefix.to_vec(),
        end: Some(end),
    }
}

/// Every physical key stored anywhere below the child namespace `name`.
///
/// The child's own link marker lives in the parent's range and is not
/// included.
pub fn subtree_range(prefix: &[u8], name: &str) -> KeyRange {
    let start = child_prefix(prefix, name);
    let end = prefix_successor(&start);
    KeyRange { start, end }
}

/// Smallest key greater than every key starting with `prefix`.
///
/// Trailing `0xFF` bytes are dropped and the last remaining byte is
/// incremented. `None` means no such key exists (the range is unbounded).
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let keep = prefix.iter().rposition(|&b| b != u8::MAX)?;
    let mut successor = prefix[..=keep].to_vec();
    successor[keep] += 1;
    Some(successor)
}
