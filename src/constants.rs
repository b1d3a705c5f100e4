/// Byte framing every path segment of a physical key (`SEP segment SEP`).
///
/// `0xFF` can never occur in UTF-8, so it sorts after every byte a key or
/// segment can hold. A namespace's direct keys therefore live in
/// `[prefix, prefix + SEPARATOR)`, and the contents of its children (which
/// begin with `prefix + SEPARATOR`) fall outside that range.
pub const SEPARATOR: u8 = 0xFF;

/// Suffix appended to a bare key to form its link marker.
///
/// `0x00` sorts immediately after the bare key and before any other suffix of
/// it, so one point lookup on `key + LINK_SUFFIX` decides link-ness.
pub const LINK_SUFFIX: u8 = 0x00;

/// Payload stored under every link marker.
pub const LINK_SENTINEL: [u8; 1] = [LINK_SUFFIX];
