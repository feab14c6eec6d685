//! Block id conventions
//!
//! Block ids look like `block-<type>-<index>`. The type is also written to
//! an explicit `data-block-type` attribute, which takes precedence; parsing
//! it back out of the id is only a fallback for older markup.

use crate::ContentBlock;

pub const BLOCK_ID_PREFIX: &str = "block-";

/// Explicit block type attribute
pub const BLOCK_TYPE_ATTR: &str = "data-block-type";

/// Marks the element whose children are the card's blocks
pub const CONTAINER_ATTR: &str = "data-block-container";

pub fn compose_block_id(block_type: &str, index: usize) -> String {
    format!("{}{}-{}", BLOCK_ID_PREFIX, block_type, index)
}

pub fn is_block_id(id: &str) -> bool {
    id.len() > BLOCK_ID_PREFIX.len() && id.starts_with(BLOCK_ID_PREFIX)
}

/// Recover the type segment of a conventional block id
pub fn type_from_id(id: &str) -> Option<&str> {
    let rest = id.strip_prefix(BLOCK_ID_PREFIX)?;
    let (block_type, index) = rest.rsplit_once('-')?;

    if block_type.is_empty() || index.parse::<u32>().is_err() {
        return None;
    }
    Some(block_type)
}

/// First free `block-<type>-<n>` id, starting at `n = blocks.len()`.
///
/// An id is free when no block in `blocks` carries it and `reserved`
/// rejects it (ids of removed blocks that are still tracked).
pub fn next_block_id(block_type: &str, blocks: &[ContentBlock], reserved: impl Fn(&str) -> bool) -> String {
    (blocks.len()..)
        .map(|n| compose_block_id(block_type, n))
        .find(|candidate| !reserved(candidate) && blocks.iter().all(|b| &b.id != candidate))
        .unwrap_or_else(|| compose_block_id(block_type, blocks.len()))
}

/// Block types end up inside ids and attribute values
pub fn is_valid_block_type(block_type: &str) -> bool {
    !block_type.is_empty()
        && block_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
