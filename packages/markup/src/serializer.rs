use crate::ContentBlock;
use serde::{Deserialize, Serialize};

/// Markup surrounding a card's block region
///
/// Serializing writes `head`, then each block's raw markup joined by
/// `separator`, then `tail`. Anything that sat between blocks in the
/// original document other than whitespace is not preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentShell {
    pub head: String,
    pub tail: String,
    pub separator: String,
}

impl DocumentShell {
    pub fn new(head: impl Into<String>, tail: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            tail: tail.into(),
            separator: separator.into(),
        }
    }

    /// The document this shell produces with no blocks in it
    pub fn empty_document(&self) -> String {
        format!("{}{}", self.head, self.tail)
    }

    pub fn serialize(&self, blocks: &[ContentBlock]) -> String {
        let body_len: usize = blocks.iter().map(|b| b.raw_markup.len() + self.separator.len()).sum();
        let mut output = String::with_capacity(self.head.len() + body_len + self.tail.len());

        output.push_str(&self.head);
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                output.push_str(&self.separator);
            }
            output.push_str(&block.raw_markup);
        }
        output.push_str(&self.tail);

        output
    }
}

/// Re-insert blocks into a shell, in list order
pub fn serialize(blocks: &[ContentBlock], shell: &DocumentShell) -> String {
    shell.serialize(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, raw: &str) -> ContentBlock {
        ContentBlock {
            id: id.to_string(),
            block_type: "p".to_string(),
            content: String::new(),
            raw_markup: raw.to_string(),
        }
    }

    #[test]
    fn test_serialize_joins_blocks() {
        let shell = DocumentShell::new("<main>", "</main>", "\n");
        let blocks = vec![block("a", "<p>a</p>"), block("b", "<p>b</p>")];

        assert_eq!(serialize(&blocks, &shell), "<main><p>a</p>\n<p>b</p></main>");
    }

    #[test]
    fn test_serialize_empty_list() {
        let shell = DocumentShell::new("<main>", "</main>", "\n");
        assert_eq!(serialize(&[], &shell), "<main></main>");
        assert_eq!(shell.empty_document(), "<main></main>");
    }
}
