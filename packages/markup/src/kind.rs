/// Rendering category of a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    Image,
    Background,
    Other,
}

impl BlockKind {
    pub fn from_type(block_type: &str) -> Self {
        match block_type.to_ascii_lowercase().as_str() {
            "h1" => BlockKind::Heading(1),
            "h2" => BlockKind::Heading(2),
            "h3" => BlockKind::Heading(3),
            "h4" => BlockKind::Heading(4),
            "h5" => BlockKind::Heading(5),
            "h6" => BlockKind::Heading(6),
            "heading" => BlockKind::Heading(2),
            "p" | "paragraph" => BlockKind::Paragraph,
            "img" | "image" => BlockKind::Image,
            "background" | "bg" => BlockKind::Background,
            _ => BlockKind::Other,
        }
    }

    /// Element used when rendering a new block of this kind
    pub fn tag_name(self) -> &'static str {
        match self {
            BlockKind::Heading(1) => "h1",
            BlockKind::Heading(2) => "h2",
            BlockKind::Heading(3) => "h3",
            BlockKind::Heading(4) => "h4",
            BlockKind::Heading(5) => "h5",
            BlockKind::Heading(_) => "h6",
            BlockKind::Paragraph => "p",
            BlockKind::Image => "img",
            BlockKind::Background | BlockKind::Other => "div",
        }
    }

    pub fn default_content(self) -> &'static str {
        match self {
            BlockKind::Heading(_) => "New heading",
            BlockKind::Paragraph => "New paragraph",
            BlockKind::Image | BlockKind::Background => "",
            BlockKind::Other => "New text",
        }
    }

    /// Image blocks keep their content in `src` rather than inner markup
    pub fn is_void(self) -> bool {
        matches!(self, BlockKind::Image)
    }
}
