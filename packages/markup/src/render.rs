//! Markup for new blocks and in-place content rewrites

use crate::extractor::element_at;
use crate::ids::BLOCK_TYPE_ATTR;
use crate::kind::BlockKind;
use crate::lexer::{quote_attr, scan, TagEvent};
use crate::ContentBlock;

/// Default markup for a block of `block_type`
pub fn render_block(id: &str, block_type: &str, content: &str) -> String {
    let kind = BlockKind::from_type(block_type);
    let tag = kind.tag_name();

    if kind.is_void() {
        format!(
            "<{tag} id={} {BLOCK_TYPE_ATTR}={} src={}>",
            quote_attr(id),
            quote_attr(block_type),
            quote_attr(content),
        )
    } else {
        format!(
            "<{tag} id={} {BLOCK_TYPE_ATTR}={}>{content}</{tag}>",
            quote_attr(id),
            quote_attr(block_type),
        )
    }
}

/// A fresh block with the default content for its type
pub fn new_block(id: impl Into<String>, block_type: impl Into<String>) -> ContentBlock {
    let id = id.into();
    let block_type = block_type.into();
    let content = BlockKind::from_type(&block_type).default_content().to_string();
    let raw_markup = render_block(&id, &block_type, &content);

    ContentBlock {
        id,
        block_type,
        content,
        raw_markup,
    }
}

/// Replace the content of a block's markup, leaving its tags intact.
///
/// For void elements the `src` attribute is rewritten (or added). Returns
/// `None` when `raw_markup` does not start with a complete element.
pub fn rewrite_content(raw_markup: &str, new_content: &str) -> Option<String> {
    let events = scan(raw_markup);
    let element = element_at(&events, 0)?;
    let TagEvent::Start(open) = &events[0] else {
        return None;
    };

    if !open.is_void() {
        return Some(format!(
            "{}{}{}",
            &raw_markup[..element.inner.start],
            new_content,
            &raw_markup[element.inner.end..]
        ));
    }

    let quoted = quote_attr(new_content);
    match open.attr("src").and_then(|a| a.value_span.clone()) {
        Some(span) => {
            let bytes = raw_markup.as_bytes();
            let was_quoted = span.start > 0 && matches!(bytes[span.start - 1], b'"' | b'\'');
            let range = if was_quoted {
                span.start - 1..span.end + 1
            } else {
                span
            };
            Some(format!(
                "{}{}{}",
                &raw_markup[..range.start],
                quoted,
                &raw_markup[range.end..]
            ))
        }
        None => {
            let before_close = &raw_markup[..open.span.end - 1];
            let insert_at = if open.self_closing {
                before_close.trim_end().len().saturating_sub(1)
            } else {
                before_close.len()
            };
            Some(format!(
                "{} src={}{}",
                &raw_markup[..insert_at],
                quoted,
                &raw_markup[insert_at..]
            ))
        }
    }
}

/// Apply [`rewrite_content`] to a block, keeping `content` in sync.
///
/// Returns `None` if the new content would end the element early, or if
/// the rewritten `src` would not read back as `new_content`.
pub fn with_content(block: &ContentBlock, new_content: &str) -> Option<ContentBlock> {
    let raw_markup = rewrite_content(&block.raw_markup, new_content)?;

    let events = scan(&raw_markup);
    if element_at(&events, 0)?.outer != (0..raw_markup.len()) {
        return None;
    }
    if let TagEvent::Start(open) = &events[0] {
        if open.is_void() && open.attr_value("src") != Some(new_content) {
            return None;
        }
    }

    Some(ContentBlock {
        content: new_content.to_string(),
        raw_markup,
        ..block.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;

    #[test]
    fn test_render_heading_and_image() {
        assert_eq!(
            render_block("block-h2-3", "h2", "Save the date"),
            r#"<h2 id="block-h2-3" data-block-type="h2">Save the date</h2>"#
        );
        assert_eq!(
            render_block("block-img-1", "img", "cake.png"),
            r#"<img id="block-img-1" data-block-type="img" src="cake.png">"#
        );
    }

    #[test]
    fn test_new_block_extracts_to_itself() {
        for block_type in ["h1", "p", "img", "background", "rsvp"] {
            let block = new_block(format!("block-{}-0", block_type), block_type);
            let extraction = extract(&block.raw_markup);

            assert_eq!(extraction.blocks, vec![block]);
        }
    }

    #[test]
    fn test_rewrite_inner_content() {
        let raw = r#"<p id="block-p-0" class="lead">Old <i>text</i></p>"#;
        let rewritten = rewrite_content(raw, "New").unwrap();
        assert_eq!(rewritten, r#"<p id="block-p-0" class="lead">New</p>"#);
    }

    #[test]
    fn test_rewrite_image_src() {
        let raw = r#"<img id="block-img-0" src='old.png' alt="x">"#;
        let rewritten = rewrite_content(raw, "new.png").unwrap();
        assert_eq!(rewritten, r#"<img id="block-img-0" src="new.png" alt="x">"#);
    }

    #[test]
    fn test_rewrite_adds_missing_src() {
        let raw = r#"<img id="block-img-0"/>"#;
        let rewritten = rewrite_content(raw, "a.png").unwrap();
        assert_eq!(rewritten, r#"<img id="block-img-0" src="a.png"/>"#);

        let extraction = extract(&rewritten);
        assert_eq!(extraction.blocks[0].content, "a.png");
    }

    #[test]
    fn test_with_content_rejects_closing_markup() {
        let block = new_block("block-p-0", "p");

        assert!(with_content(&block, "one</p><p>two").is_none());

        let updated = with_content(&block, "one <em>two</em>").unwrap();
        assert_eq!(updated.content, "one <em>two</em>");
        assert_eq!(updated.id, block.id);
    }

    #[test]
    fn test_with_content_rejects_src_that_reads_back_differently() {
        let block = new_block("block-img-0", "img");

        assert!(with_content(&block, r#"it's "x".png"#).is_none());

        let updated = with_content(&block, r#"say "cheese".png"#).unwrap();
        assert_eq!(extract(&updated.raw_markup).blocks[0].content, updated.content);
    }

    #[test]
    fn test_rewrite_rejects_fragments() {
        assert!(rewrite_content("just text", "x").is_none());
        assert!(rewrite_content("<p>unclosed", "x").is_none());
    }
}
