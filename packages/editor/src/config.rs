use crate::EditorError;
use cardrev_markup::{BlockExtractor, DEFAULT_BLOCK_TYPE, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "cardrev.config.json";

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Maximum undo snapshots kept per session (0 = unlimited)
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Written between blocks when the document does not suggest spacing
    #[serde(default = "default_block_separator")]
    pub block_separator: String,

    /// Type for blocks whose markup does not name one
    #[serde(default = "default_block_type")]
    pub default_block_type: String,
}

fn default_max_history() -> usize {
    100
}

fn default_block_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_block_type() -> String {
    DEFAULT_BLOCK_TYPE.to_string()
}

impl EngineConfig {
    /// Load `cardrev.config.json` from a directory, defaults if absent
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Extractor configured with these settings
    pub fn extractor(&self) -> BlockExtractor {
        BlockExtractor::new()
            .with_default_type(self.default_block_type.clone())
            .with_separator(self.block_separator.clone())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            block_separator: default_block_separator(),
            default_block_type: default_block_type(),
        }
    }
}
