use crate::constants::{LINK_SUFFIX, SEPARATOR};
use std::io::{Error, ErrorKind, Result};

/// A physical key with its namespace prefix removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedKey {
    /// The logical key, with any link suffix stripped.
    pub key: String,

    /// `true` when the physical key was a link marker.
    pub is_link: bool,
}

/// Strips a known namespace `prefix` from a physical key.
///
/// # Returns:
/// - `Ok(DecodedKey)`: The logical key and whether it was a link marker.
/// - `Err(std::io::Error)`: `InvalidData` if the key does not start with
///   `prefix` or the remainder is not UTF-8.
pub fn decode_key(prefix: &[u8], physical: &[u8]) -> Result<DecodedKey> {
    let rest = physical.strip_prefix(prefix).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidData,
            format!("Key {physical:?} is outside the namespace prefix {prefix:?}"),
        )
    })?;

    decode_tail(rest)
}

/// Recovers the full `(path, key)` pair from a physical key.
///
/// This is the inverse of [`encode_prefix`](super::encode_prefix) followed by
/// [`encode_key`](super::encode_key) (or [`encode_link`](super::encode_link)).
pub fn decode_path(physical: &[u8]) -> Result<(Vec<String>, DecodedKey)> {
    let mut path = Vec::new();
    let mut rest = physical;

    while let Some((&SEPARATOR, tail)) = rest.split_first() {
        let end = tail.iter().position(|&b| b == SEPARATOR).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidData,
                format!("Unterminated path segment in key {physical:?}"),
            )
        })?;
        path.push(utf8(&tail[..end])?);
        rest = &tail[end + 1..];
    }

    Ok((path, decode_tail(rest)?))
}

fn decode_tail(rest: &[u8]) -> Result<DecodedKey> {
    match rest.split_last() {
        Some((&LINK_SUFFIX, bare)) => Ok(DecodedKey {
            key: utf8(bare)?,
            is_link: true,
        }),
        _ => Ok(DecodedKey {
            key: utf8(rest)?,
            is_link: false,
        }),
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|err| Error::new(ErrorKind::InvalidData, err))
}
