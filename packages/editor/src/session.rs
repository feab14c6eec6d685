//! # Edit Session
//!
//! Owns every piece of per-card editing state: the current document, its
//! blocks and shell, the baseline, undo history, the modification tracker
//! and the version log.
//!
//! Every change to the document funnels through one path:
//!
//! ```text
//! typed edit ─────────────┐
//! reorder / add / remove ─┤ (serialize blocks into shell)
//! block content rewrite ──┘
//!            ↓
//!   history push ─▶ re-extract blocks ─▶ diff against baseline
//! ```
//!
//! Undo and redo move the history cursor and re-run extraction and diffing
//! without pushing. Save and restore are explicit and go through the
//! version log.

use crate::{
    BlockMutation, EditorError, EngineConfig, HistoryStack, ModificationTracker, ModifiedBlock,
    Template, Version, VersionLog,
};
use cardrev_markup::ids::next_block_id;
use cardrev_markup::{
    baseline_of, block_types_of, BaselineMap, BlockExtractor, BlockTypeMap, ContentBlock, DocumentShell,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Single-card editing session
#[derive(Debug, Clone)]
pub struct EditSession {
    config: EngineConfig,
    extractor: BlockExtractor,
    template: Template,

    /// Current document
    content: String,

    /// Markup around the block region of `content`
    shell: DocumentShell,

    /// Blocks of `content`, in document order
    blocks: Vec<ContentBlock>,

    /// Block content at the last save or reset
    baseline: BaselineMap,

    /// Block types at the last save or reset
    baseline_types: BlockTypeMap,

    history: HistoryStack,
    tracker: ModificationTracker,
    versions: VersionLog,

    /// Edits happened since the last save, reset or restore
    unsaved: bool,
}

/// Read-only view of a session for the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub template_id: String,
    pub content: String,
    pub blocks: Vec<ContentBlock>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub versions: Vec<Version>,
    pub current_version: Option<u32>,
    pub modified_blocks: Vec<ModifiedBlock>,
    pub has_unsaved_changes: bool,
}

impl EditSession {
    /// Start a session from a template with the default configuration
    pub fn new(template: Template) -> Self {
        Self::with_config(template, EngineConfig::default())
    }

    /// Start a session from a template. The template content becomes the
    /// first history entry, the baseline and version 1.
    pub fn with_config(template: Template, config: EngineConfig) -> Self {
        let extractor = config.extractor();
        let content = template.content.clone();
        let (extraction, shell) = extractor.parse(&content);

        if extraction.is_empty() {
            debug!(template_id = %template.id, "template has no trackable blocks");
        }
        info!(
            template_id = %template.id,
            blocks = extraction.blocks.len(),
            "editing session started"
        );

        Self {
            history: HistoryStack::with_max_levels(content.clone(), config.max_history),
            versions: VersionLog::new(content.clone()),
            tracker: ModificationTracker::new(),
            baseline_types: block_types_of(&extraction.blocks),
            baseline: extraction.baseline,
            blocks: extraction.blocks,
            shell,
            content,
            template,
            extractor,
            config,
            unsaved: false,
        }
    }

    /// Handle a new document from the editing surface.
    ///
    /// Returns `false` when the document equals the current one.
    pub fn on_content_change(&mut self, document: impl Into<String>) -> bool {
        let document = document.into();
        if !self.history.push(document.clone()) {
            return false;
        }

        self.load(document);
        self.refresh_diff();
        self.unsaved = true;

        debug!(
            blocks = self.blocks.len(),
            modified = self.tracker.len(),
            "document changed"
        );
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo().map(str::to_string) else {
            debug!("nothing to undo");
            return false;
        };

        self.load(previous);
        self.refresh_diff();
        self.unsaved = true;
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo().map(str::to_string) else {
            debug!("nothing to redo");
            return false;
        };

        self.load(next);
        self.refresh_diff();
        self.unsaved = true;
        true
    }

    /// Save the current document as a new version.
    ///
    /// A no-op (returns `None`) when nothing changed since the last save,
    /// reset or restore. On success the baseline moves to the current
    /// blocks and the tracker is cleared.
    pub fn save(&mut self) -> Option<u32> {
        if !self.unsaved || self.tracker.is_empty() {
            debug!("no pending changes to save");
            return None;
        }

        let id = self.versions.save(&self.content, self.tracker.entries())?.id;
        self.baseline = baseline_of(&self.blocks);
        self.baseline_types = block_types_of(&self.blocks);
        self.tracker.clear();
        self.unsaved = false;

        info!(version_id = id, blocks = self.blocks.len(), "saved version");
        Some(id)
    }

    /// Abandon edits and go back to the template content.
    ///
    /// History collapses to the template, the baseline is rebuilt from it
    /// and the tracker is cleared. The version log is kept.
    pub fn reset(&mut self) {
        let content = self.template.content.clone();
        let (extraction, shell) = self.extractor.parse(&content);

        self.history.reset(content.clone());
        self.shell = shell;
        self.baseline_types = block_types_of(&extraction.blocks);
        self.blocks = extraction.blocks;
        self.baseline = extraction.baseline;
        self.content = content;
        self.tracker.clear();
        self.versions.set_current(1);
        self.unsaved = false;

        info!(template_id = %self.template.id, "session reset to template");
    }

    /// Replace the session with a fresh one for another template
    pub fn select_template(&mut self, template: Template) {
        *self = Self::with_config(template, self.config.clone());
    }

    /// Bring back a saved version. Unknown ids are a no-op.
    ///
    /// The restored document is pushed onto the history, so the restore
    /// itself can be undone. The tracker takes over the version's diff set
    /// and the session counts as saved until the next edit.
    pub fn restore_version(&mut self, version_id: u32) -> bool {
        let Some(version) = self.versions.restore(version_id).cloned() else {
            debug!(version_id, "unknown version");
            return false;
        };

        self.history.push(version.content.clone());
        self.load(version.content);
        self.tracker.replace(version.modified_blocks);
        self.unsaved = false;

        info!(version_id, "restored version");
        true
    }

    /// Apply a structural mutation and feed the result through the edit path
    #[instrument(skip(self, mutation), fields(kind = mutation.name()))]
    pub fn apply(&mut self, mutation: BlockMutation) -> Result<bool, EditorError> {
        let mut blocks = self.blocks.clone();
        mutation.apply_reserving(&mut blocks, |id| self.is_reserved_id(id))?;

        let document = self.shell.serialize(&blocks);
        Ok(self.on_content_change(document))
    }

    pub fn reorder_blocks(&mut self, from: usize, to: usize) -> Result<bool, EditorError> {
        self.apply(BlockMutation::Reorder { from, to })
    }

    /// Append a block of `block_type`, returning its id.
    ///
    /// Ids of removed blocks that are still in the baseline or the diff set
    /// are never handed out again.
    pub fn add_block(&mut self, block_type: &str) -> Result<String, EditorError> {
        let id = next_block_id(block_type, &self.blocks, |id| self.is_reserved_id(id));
        self.apply(BlockMutation::AddBlock {
            block_type: block_type.to_string(),
        })?;
        Ok(id)
    }

    pub fn remove_block(&mut self, block_id: &str) -> Result<bool, EditorError> {
        self.apply(BlockMutation::RemoveBlock {
            block_id: block_id.to_string(),
        })
    }

    pub fn update_block_content(&mut self, block_id: &str, content: &str) -> Result<bool, EditorError> {
        self.apply(BlockMutation::UpdateContent {
            block_id: block_id.to_string(),
            content: content.to_string(),
        })
    }

    fn load(&mut self, document: String) {
        let (extraction, shell) = self.extractor.parse(&document);

        // With every block gone the new shell would lose the insertion
        // point, keep the one that produced this document
        if !(extraction.is_empty() && document == self.shell.empty_document()) {
            self.shell = shell;
        }

        self.blocks = extraction.blocks;
        self.content = document;
    }

    fn refresh_diff(&mut self) {
        self.tracker.diff_against(
            &self.baseline,
            &self.baseline_types,
            &self.blocks,
            self.extractor.default_type(),
        );
    }

    fn is_reserved_id(&self, id: &str) -> bool {
        self.baseline.contains_key(id) || self.tracker.get(id).is_some()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn block(&self, id: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn baseline(&self) -> &BaselineMap {
        &self.baseline
    }

    pub fn shell(&self) -> &DocumentShell {
        &self.shell
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn versions(&self) -> &[Version] {
        self.versions.versions()
    }

    pub fn current_version(&self) -> Option<u32> {
        self.versions.current()
    }

    pub fn modified_blocks(&self) -> &[ModifiedBlock] {
        self.tracker.entries()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            template_id: self.template.id.clone(),
            content: self.content.clone(),
            blocks: self.blocks.clone(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            versions: self.versions().to_vec(),
            current_version: self.current_version(),
            modified_blocks: self.modified_blocks().to_vec(),
            has_unsaved_changes: self.unsaved,
        }
    }
}
