use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last committed content per block id
pub type BaselineMap = BTreeMap<String, String>;

/// Block type per block id, kept beside a baseline
pub type BlockTypeMap = BTreeMap<String, String>;

/// An individually addressable unit of a card (heading, paragraph, image, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    /// Stable identifier carried in the element's `id` attribute
    pub id: String,

    /// Block category (`h1`, `p`, `img`, `background`, ...)
    #[serde(rename = "type")]
    pub block_type: String,

    /// Inner markup, or the `src` attribute for void elements
    pub content: String,

    /// The element's full markup, start tag through end tag
    pub raw_markup: String,
}

/// Blocks found in a document plus their id → content baseline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub blocks: Vec<ContentBlock>,
    pub baseline: BaselineMap,
}

impl Extraction {
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        let baseline = baseline_of(&blocks);
        Self { blocks, baseline }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Build a baseline map from a block list
pub fn baseline_of(blocks: &[ContentBlock]) -> BaselineMap {
    blocks
        .iter()
        .map(|b| (b.id.clone(), b.content.clone()))
        .collect()
}

/// Id → type map for a block list
pub fn block_types_of(blocks: &[ContentBlock]) -> BlockTypeMap {
    blocks
        .iter()
        .map(|b| (b.id.clone(), b.block_type.clone()))
        .collect()
}
