use crate::constants::{LINK_SUFFIX, SEPARATOR};

/// Encodes a path into the prefix shared by every key stored under it.
///
/// Each segment contributes `SEPARATOR + segment + SEPARATOR`; the root path
/// encodes to an empty prefix.
///
/// ## Example
/// ```rust
/// use sublink::key_codec::encode_prefix;
///
/// assert_eq!(encode_prefix(&["a"]), vec![0xFF, b'a', 0xFF]);
/// assert!(encode_prefix::<&str>(&[]).is_empty());
/// ```
pub fn encode_prefix<S: AsRef<str>>(path: &[S]) -> Vec<u8> {
    let capacity = path.iter().map(|segment| segment.as_ref().len() + 2).sum();
    let mut prefix = Vec::with_capacity(capacity);
    for segment in path {
        push_segment(&mut prefix, segment.as_ref());
    }
    prefix
}

/// Prefix of the namespace `name` nested directly below `prefix`.
pub fn child_prefix(prefix: &[u8], name: &str) -> Vec<u8> {
    let mut child = Vec::with_capacity(prefix.len() + name.len() + 2);
    child.extend_from_slice(prefix);
    push_segment(&mut child, name);
    child
}

/// Physical key of the bare `key` inside the namespace at `prefix`.
pub fn encode_key(prefix: &[u8], key: &str) -> Vec<u8> {
    let mut physical = Vec::with_capacity(prefix.len() + key.len());
    physical.extend_from_slice(prefix);
    physical.extend_from_slice(key.as_bytes());
    physical
}

/// Physical key of the link marker for `key` inside the namespace at `prefix`.
pub fn encode_link(prefix: &[u8], key: &str) -> Vec<u8> {
    let mut physical = Vec::with_capacity(prefix.len() + key.len() + 1);
    physical.extend_from_slice(prefix);
    physical.extend_from_slice(key.as_bytes());
    physical.push(LINK_SUFFIX);
    physical
}

#[inline]
fn push_segment(buffer: &mut Vec<u8>, segment: &str) {
    buffer.push(SEPARATOR);
    buffer.extend_from_slice(segment.as_bytes());
    buffer.push(SEPARATOR);
}
