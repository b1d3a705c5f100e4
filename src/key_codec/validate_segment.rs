use crate::constants::LINK_SUFFIX;
use std::io::{Error, ErrorKind, Result};

/// Rejects segments and keys that could be mistaken for a link marker.
///
/// `SEPARATOR` cannot appear in a `&str`, so only `LINK_SUFFIX` needs checking.
#[inline]
pub fn validate_segment(segment: &str) -> Result<()> {
    if segment.as_bytes().contains(&LINK_SUFFIX) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("Key or segment {segment:?} contains the reserved link suffix byte."),
        ));
    }
    Ok(())
}
