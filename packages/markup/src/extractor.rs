//! # Block Extractor
//!
//! Finds the content blocks of a card document.
//!
//! A block is any element with an `id` that either follows the
//! `block-<type>-<index>` convention or carries an explicit
//! `data-block-type` attribute. Blocks never nest: once a block element is
//! found, everything inside it is its content.
//!
//! Extraction is total. Markup without recognizable blocks (including
//! malformed markup) yields an empty result, never an error.

use crate::ids::{is_block_id, type_from_id, BLOCK_TYPE_ATTR, CONTAINER_ATTR};
use crate::lexer::{scan, StartTag, TagEvent};
use crate::{ContentBlock, DocumentShell, Extraction};
use std::collections::HashSet;
use std::ops::Range;
use tracing::{debug, instrument, warn};

pub const DEFAULT_BLOCK_TYPE: &str = "text";
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Byte ranges of one element inside the scanned source
#[derive(Debug, Clone)]
pub(crate) struct ElementSpan {
    pub outer: Range<usize>,
    pub inner: Range<usize>,
    /// Index of the closing event (the start event itself for void elements)
    pub end_index: usize,
}

/// Locate the element opened by the start event at `index`.
///
/// Only end tags with the same name are counted, so stray unclosed tags of
/// other kinds inside the element do not confuse the match.
pub(crate) fn element_at(events: &[TagEvent], index: usize) -> Option<ElementSpan> {
    let TagEvent::Start(open) = events.get(index)? else {
        return None;
    };

    if open.is_void() {
        return Some(ElementSpan {
            outer: open.span.clone(),
            inner: open.span.end..open.span.end,
            end_index: index,
        });
    }

    let mut depth = 0usize;
    for (i, event) in events.iter().enumerate().skip(index + 1) {
        match event {
            TagEvent::Start(tag) if tag.name == open.name && !tag.is_void() => depth += 1,
            TagEvent::End { name, span } if *name == open.name => {
                if depth == 0 {
                    return Some(ElementSpan {
                        outer: open.span.start..span.end,
                        inner: open.span.end..span.start,
                        end_index: i,
                    });
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    None
}

#[derive(Default)]
struct ScannedBlocks {
    blocks: Vec<ContentBlock>,
    outer: Vec<Range<usize>>,
    container: Option<Range<usize>>,
}

/// Extracts blocks and document shells
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    default_type: String,
    separator: String,
}

impl BlockExtractor {
    pub fn new() -> Self {
        Self {
            default_type: DEFAULT_BLOCK_TYPE.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Type assigned when neither the attribute nor the id names one
    pub fn with_default_type(mut self, block_type: impl Into<String>) -> Self {
        self.default_type = block_type.into();
        self
    }

    /// Separator used when the document does not suggest one
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    /// Extract the ordered block list and its baseline
    #[instrument(skip(self, document), fields(len = document.len()))]
    pub fn extract(&self, document: &str) -> Extraction {
        let scanned = self.scan_blocks(document);
        Extraction::from_blocks(scanned.blocks)
    }

    /// The markup surrounding the block region of `document`
    pub fn shell_of(&self, document: &str) -> DocumentShell {
        let scanned = self.scan_blocks(document);
        self.build_shell(document, &scanned)
    }

    /// Extraction and shell from a single scan
    pub fn parse(&self, document: &str) -> (Extraction, DocumentShell) {
        let scanned = self.scan_blocks(document);
        let shell = self.build_shell(document, &scanned);
        (Extraction::from_blocks(scanned.blocks), shell)
    }

    fn scan_blocks(&self, document: &str) -> ScannedBlocks {
        let events = scan(document);
        let mut seen = HashSet::new();
        let mut scanned = ScannedBlocks::default();
        let mut index = 0;

        while index < events.len() {
            let TagEvent::Start(tag) = &events[index] else {
                index += 1;
                continue;
            };

            if scanned.container.is_none() && tag.has_attr(CONTAINER_ATTR) {
                scanned.container = element_at(&events, index).map(|el| el.inner);
                index += 1;
                continue;
            }

            let Some((id, block_type)) = self.block_identity(tag) else {
                index += 1;
                continue;
            };

            let Some(element) = element_at(&events, index) else {
                debug!(block_id = %id, "block element is never closed, skipping");
                index += 1;
                continue;
            };
            let next = element.end_index + 1;

            if !seen.insert(id.clone()) {
                warn!(block_id = %id, "duplicate block id, ignoring later element");
                index = next;
                continue;
            }

            let content = if tag.is_void() {
                tag.attr_value("src").unwrap_or_default().to_string()
            } else {
                document[element.inner.clone()].to_string()
            };

            scanned.blocks.push(ContentBlock {
                id,
                block_type,
                content,
                raw_markup: document[element.outer.clone()].to_string(),
            });
            scanned.outer.push(element.outer);
            index = next;
        }

        if scanned.blocks.is_empty() {
            debug!(len = document.len(), "no trackable blocks in document");
        }

        scanned
    }

    fn block_identity(&self, tag: &StartTag) -> Option<(String, String)> {
        let id = tag.attr_value("id").filter(|id| !id.is_empty())?;
        let explicit = tag.attr_value(BLOCK_TYPE_ATTR).filter(|t| !t.is_empty());

        if explicit.is_none() && !is_block_id(id) {
            return None;
        }

        let block_type = match explicit.or_else(|| type_from_id(id)) {
            Some(block_type) => block_type.to_string(),
            None => {
                debug!(block_id = %id, fallback = %self.default_type, "block type not recognised");
                self.default_type.clone()
            }
        };

        Some((id.to_string(), block_type))
    }

    fn build_shell(&self, document: &str, scanned: &ScannedBlocks) -> DocumentShell {
        // Reuse the template's own spacing between the first two blocks
        let separator = scanned
            .outer
            .windows(2)
            .next()
            .map(|pair| &document[pair[0].end..pair[1].start])
            .filter(|gap| gap.chars().all(char::is_whitespace))
            .unwrap_or(self.separator.as_str());

        let region = match (scanned.outer.first(), scanned.outer.last()) {
            (Some(first), Some(last)) => Some(first.start..last.end),
            _ => scanned.container.clone(),
        };

        match region {
            Some(region) => DocumentShell::new(
                &document[..region.start],
                &document[region.end..],
                separator,
            ),
            None => DocumentShell::new(document, "", separator),
        }
    }
}

impl Default for BlockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract blocks with the default settings
pub fn extract(document: &str) -> Extraction {
    BlockExtractor::new().extract(document)
}

/// Shell of `document` with the default settings
pub fn shell_of(document: &str) -> DocumentShell {
    BlockExtractor::new().shell_of(document)
}
