//! # Version Log
//!
//! Append-only list of saved card snapshots. Version ids are 1-based and
//! equal to the position in the log, so they strictly increase and are
//! never reused.

use crate::tracker::ModifiedBlock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved snapshot of the card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: u32,
    pub content: String,
    pub timestamp: DateTime<Utc>,

    /// Diff set at save time (a copy, never shared with the tracker)
    pub modified_blocks: Vec<ModifiedBlock>,
}

#[derive(Debug, Clone)]
pub struct VersionLog {
    versions: Vec<Version>,

    /// Version the session currently reflects (last saved or restored)
    current: Option<u32>,
}

impl VersionLog {
    /// Start a log whose first version is the session's starting content
    pub fn new(initial_content: impl Into<String>) -> Self {
        let mut log = Self {
            versions: Vec::new(),
            current: None,
        };
        log.append(initial_content.into(), Vec::new());
        log
    }

    /// Append a version unless there is nothing to save
    pub fn save(&mut self, content: &str, modified: &[ModifiedBlock]) -> Option<&Version> {
        if modified.is_empty() {
            return None;
        }
        Some(self.append(content.to_string(), modified.to_vec()))
    }

    fn append(&mut self, content: String, modified_blocks: Vec<ModifiedBlock>) -> &Version {
        let id = self.next_id();
        self.versions.push(Version {
            id,
            content,
            timestamp: Utc::now(),
            modified_blocks,
        });
        self.current = Some(id);
        &self.versions[self.versions.len() - 1]
    }

    /// Look up a version for restoring and mark it current
    pub fn restore(&mut self, id: u32) -> Option<&Version> {
        let index = (id as usize).checked_sub(1)?;
        if index >= self.versions.len() {
            return None;
        }
        self.current = Some(id);
        Some(&self.versions[index])
    }

    pub fn get(&self, id: u32) -> Option<&Version> {
        let index = (id as usize).checked_sub(1)?;
        self.versions.get(index)
    }

    pub fn set_current(&mut self, id: u32) {
        if self.get(id).is_some() {
            self.current = Some(id);
        }
    }

    pub fn current(&self) -> Option<u32> {
        self.current
    }

    pub fn next_id(&self) -> u32 {
        self.versions.len() as u32 + 1
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(id: &str, from: &str, to: &str) -> ModifiedBlock {
        ModifiedBlock {
            id: id.to_string(),
            block_type: "p".to_string(),
            original_content: from.to_string(),
            new_content: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_log_starts_with_initial_version() {
        let log = VersionLog::new("t0");
        assert_eq!(log.len(), 1);
        assert_eq!(log.versions()[0].id, 1);
        assert_eq!(log.versions()[0].content, "t0");
        assert!(log.versions()[0].modified_blocks.is_empty());
        assert_eq!(log.current(), Some(1));
    }

    #[test]
    fn test_save_without_changes_is_noop() {
        let mut log = VersionLog::new("t0");
        assert!(log.save("t0", &[]).is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_save_appends_sequential_ids() {
        let mut log = VersionLog::new("t0");
        let first = log.versions()[0].clone();

        let v2 = log.save("t1", &[change("a", "x", "y")]).unwrap().id;
        let v3 = log.save("t2", &[change("a", "y", "z")]).unwrap().id;

        assert_eq!((v2, v3), (2, 3));
        assert_eq!(log.current(), Some(3));
        assert_eq!(log.versions()[0], first);
        assert_eq!(log.get(2).unwrap().modified_blocks[0].new_content, "y");
    }

    #[test]
    fn test_restore_unknown_version() {
        let mut log = VersionLog::new("t0");
        assert!(log.restore(0).is_none());
        assert!(log.restore(2).is_none());
        assert_eq!(log.current(), Some(1));
    }

    #[test]
    fn test_restore_marks_current() {
        let mut log = VersionLog::new("t0");
        log.save("t1", &[change("a", "x", "y")]);

        let restored = log.restore(1).unwrap();
        assert_eq!(restored.content, "t0");
        assert_eq!(log.current(), Some(1));
    }
}
