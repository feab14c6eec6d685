//! # Block Mutations
//!
//! Structural operations on a card's block list.
//!
//! ## Design Principles
//!
//! 1. **Whole-list in, whole-list out**: a mutation rewrites the block list,
//!    the session re-serializes it into a new document
//! 2. **Validated**: every mutation is checked before it touches the list
//! 3. **Same path as typing**: the resulting document goes through history
//!    and block diffing exactly like a manual edit
//!
//! ## Mutation Semantics
//!
//! ### Reorder
//! - Removes the block at `from` and reinserts it at `to`
//! - Block content and markup are untouched, only position changes
//! - Still produces a new document, so it is undoable like any edit
//!
//! ### UpdateContent
//! - Rewrites the inner content of one block (the `src` of an image)
//! - Other blocks are not touched
//!
//! ### RemoveBlock
//! - Filters the list by id; an unknown id leaves the list unchanged

use cardrev_markup::ids::{is_valid_block_type, next_block_id};
use cardrev_markup::{new_block, with_content, ContentBlock};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural edits to the block list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlockMutation {
    /// Move a block to a new position
    Reorder { from: usize, to: usize },

    /// Append a new block with default content
    #[serde(rename_all = "camelCase")]
    AddBlock { block_type: String },

    /// Drop a block by id
    #[serde(rename_all = "camelCase")]
    RemoveBlock { block_id: String },

    /// Replace one block's inner content
    #[serde(rename_all = "camelCase")]
    UpdateContent { block_id: String, content: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Index {index} out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid block type: {0:?}")]
    InvalidBlockType(String),

    #[error("Block markup is malformed: {0}")]
    MalformedBlock(String),
}

impl BlockMutation {
    /// Apply to `blocks` after validating
    pub fn apply(&self, blocks: &mut Vec<ContentBlock>) -> Result<(), MutationError> {
        self.apply_reserving(blocks, |_| false)
    }

    /// Like [`apply`](Self::apply), but new blocks never take an id that
    /// `reserved` accepts
    pub fn apply_reserving(
        &self,
        blocks: &mut Vec<ContentBlock>,
        reserved: impl Fn(&str) -> bool,
    ) -> Result<(), MutationError> {
        self.validate(blocks)?;

        match self {
            BlockMutation::Reorder { from, to } => {
                let block = blocks.remove(*from);
                blocks.insert(*to, block);
                Ok(())
            }

            BlockMutation::AddBlock { block_type } => {
                let id = next_block_id(block_type, blocks, reserved);
                blocks.push(new_block(id, block_type.as_str()));
                Ok(())
            }

            BlockMutation::RemoveBlock { block_id } => {
                blocks.retain(|b| &b.id != block_id);
                Ok(())
            }

            BlockMutation::UpdateContent { block_id, content } => {
                let block = blocks
                    .iter_mut()
                    .find(|b| &b.id == block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;

                *block = with_content(block, content)
                    .ok_or_else(|| MutationError::MalformedBlock(block_id.clone()))?;
                Ok(())
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, blocks: &[ContentBlock]) -> Result<(), MutationError> {
        match self {
            BlockMutation::Reorder { from, to } => {
                for index in [*from, *to] {
                    if index >= blocks.len() {
                        return Err(MutationError::IndexOutOfRange {
                            index,
                            len: blocks.len(),
                        });
                    }
                }
                Ok(())
            }

            BlockMutation::AddBlock { block_type } => {
                if is_valid_block_type(block_type) {
                    Ok(())
                } else {
                    Err(MutationError::InvalidBlockType(block_type.clone()))
                }
            }

            BlockMutation::RemoveBlock { .. } => Ok(()),

            BlockMutation::UpdateContent { block_id, .. } => {
                if blocks.iter().any(|b| &b.id == block_id) {
                    Ok(())
                } else {
                    Err(MutationError::BlockNotFound(block_id.clone()))
                }
            }
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            BlockMutation::Reorder { .. } => "reorder",
            BlockMutation::AddBlock { .. } => "add_block",
            BlockMutation::RemoveBlock { .. } => "remove_block",
            BlockMutation::UpdateContent { .. } => "update_content",
        }
    }
}
