//! UI events as data, for scripted sessions and replay

use crate::{EditSession, EditorError, Template};
use serde::{Deserialize, Serialize};

/// One handler invocation from the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum SessionAction {
    ContentChange { content: String },
    Undo,
    Redo,
    Save,
    Reset,
    #[serde(rename_all = "camelCase")]
    RestoreVersion { version_id: u32 },
    Reorder { from: usize, to: usize },
    #[serde(rename_all = "camelCase")]
    AddBlock { block_type: String },
    #[serde(rename_all = "camelCase")]
    RemoveBlock { block_id: String },
    #[serde(rename_all = "camelCase")]
    UpdateBlockContent { block_id: String, content: String },
    SelectTemplate { template: Template },
}

impl EditSession {
    /// Run one action. Returns whether the session state changed.
    pub fn dispatch(&mut self, action: SessionAction) -> Result<bool, EditorError> {
        match action {
            SessionAction::ContentChange { content } => Ok(self.on_content_change(content)),
            SessionAction::Undo => Ok(self.undo()),
            SessionAction::Redo => Ok(self.redo()),
            SessionAction::Save => Ok(self.save().is_some()),
            SessionAction::Reset => {
                self.reset();
                Ok(true)
            }
            SessionAction::RestoreVersion { version_id } => Ok(self.restore_version(version_id)),
            SessionAction::Reorder { from, to } => self.reorder_blocks(from, to),
            SessionAction::AddBlock { block_type } => self.add_block(&block_type).map(|_| true),
            SessionAction::RemoveBlock { block_id } => self.remove_block(&block_id),
            SessionAction::UpdateBlockContent { block_id, content } => {
                self.update_block_content(&block_id, &content)
            }
            SessionAction::SelectTemplate { template } => {
                self.select_template(template);
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: &str = r#"<h1 id="block-h1-0">Hello</h1>
<p id="block-p-1">Details</p>"#;

    #[test]
    fn test_parse_script() {
        let json = r#"[
            { "action": "updateBlockContent", "blockId": "block-h1-0", "content": "Hi" },
            { "action": "reorder", "from": 0, "to": 1 },
            { "action": "save" },
            { "action": "restoreVersion", "versionId": 1 }
        ]"#;

        let actions: Vec<SessionAction> = serde_json::from_str(json).unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[2], SessionAction::Save);
        assert_eq!(actions[3], SessionAction::RestoreVersion { version_id: 1 });
    }

    #[test]
    fn test_dispatch_sequence() {
        let mut session = EditSession::new(Template::new("tpl", "Test", T0));

        let actions = vec![
            SessionAction::UpdateBlockContent {
                block_id: "block-h1-0".to_string(),
                content: "Hi".to_string(),
            },
            SessionAction::AddBlock {
                block_type: "img".to_string(),
            },
            SessionAction::Save,
        ];

        for action in actions {
            assert!(session.dispatch(action).unwrap());
        }

        assert_eq!(session.versions().len(), 2);
        assert_eq!(session.blocks().len(), 3);
        assert!(!session.dispatch(SessionAction::Save).unwrap());
    }

    #[test]
    fn test_dispatch_propagates_mutation_errors() {
        let mut session = EditSession::new(Template::new("tpl", "Test", T0));
        let result = session.dispatch(SessionAction::Reorder { from: 0, to: 9 });
        assert!(matches!(result, Err(EditorError::Mutation(_))));
    }
}
