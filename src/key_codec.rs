//! Flat byte encoding of hierarchical paths.
//!
//! A key `k` stored under the path `["a", "b"]` is physically laid out as
//! `SEP a SEP SEP b SEP k`; its link marker (when `k` is itself a namespace) is
//! the same bytes followed by [`LINK_SUFFIX`](crate::constants::LINK_SUFFIX).

mod decode_key;
pub use decode_key::{DecodedKey, decode_key, decode_path};

mod encode_key;
pub use encode_key::{child_prefix, encode_key, encode_link, encode_prefix};

mod key_range;
pub use key_range::{KeyRange, namespace_range, prefix_successor, subtree_range};

mod validate_segment;
pub use validate_segment::validate_segment;
