//! # Cardrev Editor
//!
//! Revision and block-tracking engine for invitation cards.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ markup: card markup → blocks + shell        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - HistoryStack: undo/redo snapshots        │
//! │  - ModificationTracker: diff vs baseline    │
//! │  - VersionLog: append-only saves            │
//! │  - BlockMutation: reorder/add/remove/edit   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: every edit produces a whole new document
//! 2. **One change path**: structural edits are serialized and then handled
//!    exactly like typed edits
//! 3. **Block-level diffs**: a block is modified when its whole content
//!    differs from the baseline
//! 4. **Append-only versions**: saving never rewrites an earlier version
//!
//! ## Usage
//!
//! ```rust
//! use cardrev_editor::{EditSession, Template};
//!
//! let template = Template::new(
//!     "welcome",
//!     "Welcome",
//!     r#"<h1 id="block-h1-0">Hello</h1>"#,
//! );
//! let mut session = EditSession::new(template);
//!
//! session.on_content_change(r#"<h1 id="block-h1-0">Hi</h1>"#);
//! assert_eq!(session.modified_blocks()[0].new_content, "Hi");
//!
//! assert_eq!(session.save(), Some(2));
//! assert!(session.modified_blocks().is_empty());
//! ```

mod actions;
mod config;
mod errors;
mod history;
mod mutations;
mod session;
mod template;
mod tracker;
mod versions;

pub use actions::SessionAction;
pub use config::{EngineConfig, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use history::HistoryStack;
pub use mutations::{BlockMutation, MutationError};
pub use session::{EditSession, SessionState};
pub use template::Template;
pub use tracker::{ModificationTracker, ModifiedBlock};
pub use versions::{Version, VersionLog};

// Re-export the block model for convenience
pub use cardrev_markup::{BaselineMap, BlockTypeMap, ContentBlock, DocumentShell};
