//! Strict document checks.
//!
//! The serializer renders malformed input leniently. These checks let callers
//! reject such input up front instead.

use crate::model::{Block, Document, EntityKey, EntityType};

/// A violated document invariant.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A range reaches past the end of the block text.
    #[error("block {block}: range {offset}+{length} exceeds text length {text_len}")]
    InvalidRange {
        /// Block index in the document.
        block: usize,
        /// Range offset.
        offset: usize,
        /// Range length.
        length: usize,
        /// Block text length in chars.
        text_len: usize,
    },
    /// An entity range references a key missing from the entity map.
    #[error("block {block}: entity key {key} not found in entity map")]
    UnknownEntityKey {
        /// Block index in the document.
        block: usize,
        /// The missing key.
        key: EntityKey,
    },
    /// Two entity ranges of one block overlap.
    #[error("block {block}: entity ranges for {first} and {second} overlap")]
    OverlappingEntityRanges {
        /// Block index in the document.
        block: usize,
        /// Key of the earlier range.
        first: EntityKey,
        /// Key of the later range.
        second: EntityKey,
    },
    /// An entity type with no default markup and no custom transform.
    #[error("block {block}: entity type {entity_type} has no markup")]
    UnknownEntityType {
        /// Block index in the document.
        block: usize,
        /// The unrecognized type name.
        entity_type: String,
    },
}

/// Validate all blocks of a document.
///
/// With `allow_custom_types`, entities of unrecognized type pass; otherwise
/// they are reported as [`ValidationError::UnknownEntityType`].
pub(crate) fn document(doc: &Document, allow_custom_types: bool) -> Result<(), ValidationError> {
    for (index, block) in doc.blocks.iter().enumerate() {
        block_ranges(index, block)?;
        block_entities(index, block, doc, allow_custom_types)?;
    }
    Ok(())
}

fn block_ranges(index: usize, block: &Block) -> Result<(), ValidationError> {
    let text_len = block.text.chars().count();
    let spans = block
        .inline_style_ranges
        .iter()
        .map(|r| (r.offset, r.length))
        .chain(block.entity_ranges.iter().map(|r| (r.offset, r.length)));
    for (offset, length) in spans {
        if offset.checked_add(length).is_none_or(|end| end > text_len) {
            return Err(ValidationError::InvalidRange {
                block: index,
                offset,
                length,
                text_len,
            });
        }
    }
    Ok(())
}

fn block_entities(
    index: usize,
    block: &Block,
    doc: &Document,
    allow_custom_types: bool,
) -> Result<(), ValidationError> {
    for range in &block.entity_ranges {
        let Some(entity) = doc.entity(&range.key) else {
            return Err(ValidationError::UnknownEntityKey {
                block: index,
                key: range.key.clone(),
            });
        };
        if let EntityType::Other(name) = &entity.entity_type
            && !allow_custom_types
        {
            return Err(ValidationError::UnknownEntityType {
                block: index,
                entity_type: name.clone(),
            });
        }
    }

    let mut sorted: Vec<_> = block.entity_ranges.iter().collect();
    sorted.sort_by_key(|r| r.offset);
    for pair in sorted.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.offset + first.length > second.offset {
            return Err(ValidationError::OverlappingEntityRanges {
                block: index,
                first: first.key.clone(),
                second: second.key.clone(),
            });
        }
    }
    Ok(())
}
