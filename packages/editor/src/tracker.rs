//! # Modification Tracker
//!
//! Keeps one diff record per block whose content differs from the baseline.
//!
//! Entries are keyed by block id. The first change to a block fixes its
//! `original_content`; later changes only move `new_content` and the
//! timestamp. A record whose new content matches its original is dropped,
//! so the list never carries zero-diff entries.

use cardrev_markup::{BaselineMap, BlockTypeMap, ContentBlock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A block that has diverged from its baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedBlock {
    pub id: String,

    #[serde(rename = "type")]
    pub block_type: String,

    pub original_content: String,
    pub new_content: String,
    pub timestamp: DateTime<Utc>,
}

/// Diff set of modified blocks, in first-change order
#[derive(Debug, Clone, Default)]
pub struct ModificationTracker {
    entries: Vec<ModifiedBlock>,
}

impl ModificationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a change for `id`. Returns whether the list changed.
    pub fn record_change(&mut self, id: &str, block_type: &str, old_content: &str, new_content: &str) -> bool {
        if old_content == new_content {
            return false;
        }

        if let Some(pos) = self.entries.iter().position(|e| e.id == id) {
            if self.entries[pos].original_content == new_content {
                self.entries.remove(pos);
                return true;
            }

            let entry = &mut self.entries[pos];
            if entry.new_content == new_content {
                return false;
            }
            entry.new_content = new_content.to_string();
            entry.timestamp = Utc::now();
            return true;
        }

        debug!(block_id = %id, "block diverged from baseline");
        self.entries.push(ModifiedBlock {
            id: id.to_string(),
            block_type: block_type.to_string(),
            original_content: old_content.to_string(),
            new_content: new_content.to_string(),
            timestamp: Utc::now(),
        });
        true
    }

    /// Drop the record for a block that is back at its baseline
    pub fn revert(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Compare the current blocks against `baseline` and update the diff set.
    ///
    /// Blocks missing from the baseline are additions (original `""`);
    /// baseline ids missing from `blocks` are removals (new `""`). A removal
    /// takes its type from `types`, then from an existing record, then
    /// `default_type`.
    pub fn diff_against(
        &mut self,
        baseline: &BaselineMap,
        types: &BlockTypeMap,
        blocks: &[ContentBlock],
        default_type: &str,
    ) {
        let mut present = HashSet::with_capacity(blocks.len());

        for block in blocks {
            present.insert(block.id.as_str());
            let original = baseline.get(&block.id).map(String::as_str).unwrap_or("");

            if original == block.content {
                self.revert(&block.id);
            } else {
                self.record_change(&block.id, &block.block_type, original, &block.content);
            }
        }

        for (id, original) in baseline {
            if present.contains(id.as_str()) {
                continue;
            }
            let block_type = types
                .get(id)
                .cloned()
                .or_else(|| self.get(id).map(|e| e.block_type.clone()))
                .unwrap_or_else(|| default_type.to_string());
            if original.is_empty() {
                self.revert(id);
            } else {
                self.record_change(id, &block_type, original, "");
            }
        }

        // Added blocks that are gone again
        self.entries
            .retain(|e| present.contains(e.id.as_str()) || baseline.contains_key(&e.id));
    }

    /// Replace the whole list (used when restoring a version)
    pub fn replace(&mut self, entries: Vec<ModifiedBlock>) {
        self.entries = entries;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: &str) -> Option<&ModifiedBlock> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[ModifiedBlock] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, content: &str) -> ContentBlock {
        ContentBlock {
            id: id.to_string(),
            block_type: "p".to_string(),
            content: content.to_string(),
            raw_markup: format!("<p id=\"{}\">{}</p>", id, content),
        }
    }

    fn baseline(pairs: &[(&str, &str)]) -> BaselineMap {
        pairs
            .iter()
            .map(|(id, content)| (id.to_string(), content.to_string()))
            .collect()
    }

    fn diff(tracker: &mut ModificationTracker, base: &BaselineMap, blocks: &[ContentBlock]) {
        tracker.diff_against(base, &BlockTypeMap::new(), blocks, "text");
    }

    #[test]
    fn test_equal_content_is_noop() {
        let mut tracker = ModificationTracker::new();
        assert!(!tracker.record_change("block-p-0", "p", "x", "x"));
        assert!(tracker.is_empty());

        tracker.record_change("block-p-0", "p", "x", "y");
        let before = tracker.entries().to_vec();
        assert!(!tracker.record_change("block-p-0", "p", "y", "y"));
        assert_eq!(tracker.entries(), &before[..]);
    }

    #[test]
    fn test_upsert_keeps_original() {
        let mut tracker = ModificationTracker::new();
        tracker.record_change("block-h1-0", "h1", "Hello", "Hi");
        tracker.record_change("block-h1-0", "h1", "Hi", "Hey");

        assert_eq!(tracker.len(), 1);
        let entry = tracker.get("block-h1-0").unwrap();
        assert_eq!(entry.original_content, "Hello");
        assert_eq!(entry.new_content, "Hey");
        assert_eq!(entry.block_type, "h1");
    }

    #[test]
    fn test_change_back_to_original_drops_entry() {
        let mut tracker = ModificationTracker::new();
        tracker.record_change("block-h1-0", "h1", "Hello", "Hi");
        tracker.record_change("block-h1-0", "h1", "Hi", "Hello");

        assert!(tracker.is_empty());
    }

    #[test]
    fn test_diff_against_baseline() {
        let mut tracker = ModificationTracker::new();
        let base = baseline(&[("a", "one"), ("b", "two"), ("c", "three")]);

        let blocks = vec![block("a", "one"), block("b", "TWO"), block("d", "new")];
        diff(&mut tracker, &base, &blocks);

        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.get("b").unwrap().new_content, "TWO");
        assert_eq!(tracker.get("d").unwrap().original_content, "");
        let removed = tracker.get("c").unwrap();
        assert_eq!(removed.block_type, "text");
        assert_eq!(removed.original_content, "three");
        assert_eq!(removed.new_content, "");
    }

    #[test]
    fn test_removal_takes_type_from_baseline_types() {
        let mut tracker = ModificationTracker::new();
        let base = baseline(&[("block-h1-0", "Hero"), ("hero", "Welcome"), ("kept", "x")]);
        let types: BlockTypeMap = [("block-h1-0", "background"), ("hero", "p"), ("kept", "p")]
            .iter()
            .map(|(id, t)| (id.to_string(), t.to_string()))
            .collect();

        tracker.diff_against(&base, &types, &[block("kept", "x")], "text");

        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.get("block-h1-0").unwrap().block_type, "background");
        assert_eq!(tracker.get("hero").unwrap().block_type, "p");
    }

    #[test]
    fn test_diff_reverts_blocks_back_at_baseline() {
        let mut tracker = ModificationTracker::new();
        let base = baseline(&[("a", "one")]);

        diff(&mut tracker, &base, &[block("a", "uno")]);
        assert_eq!(tracker.len(), 1);

        diff(&mut tracker, &base, &[block("a", "one")]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_diff_drops_added_block_once_removed() {
        let mut tracker = ModificationTracker::new();
        let base = baseline(&[("a", "one")]);

        diff(&mut tracker, &base, &[block("a", "one"), block("new", "fresh")]);
        assert_eq!(tracker.len(), 1);

        diff(&mut tracker, &base, &[block("a", "one")]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_clear_and_replace() {
        let mut tracker = ModificationTracker::new();
        tracker.record_change("a", "p", "1", "2");
        let saved = tracker.entries().to_vec();

        tracker.clear();
        assert!(tracker.is_empty());

        tracker.replace(saved.clone());
        assert_eq!(tracker.entries(), &saved[..]);
    }
}
