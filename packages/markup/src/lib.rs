//! # Cardrev Markup
//!
//! Block model for invitation card markup.
//!
//! ```text
//! card markup ──scan──▶ tag events ──extract──▶ [ContentBlock] + baseline
//!      ▲                                               │
//!      └──────────── serialize(blocks, shell) ◀────────┘
//! ```
//!
//! Round trip: for any document `d`,
//! `extract(serialize(extract(d).blocks, shell_of(d)))` yields the same
//! blocks, in the same order, as `extract(d)`.

pub mod ids;
pub mod lexer;

mod block;
mod extractor;
mod kind;
mod render;
mod serializer;

pub use block::{baseline_of, block_types_of, BaselineMap, BlockTypeMap, ContentBlock, Extraction};
pub use extractor::{extract, shell_of, BlockExtractor, DEFAULT_BLOCK_TYPE, DEFAULT_SEPARATOR};
pub use kind::BlockKind;
pub use render::{new_block, render_block, rewrite_content, with_content};
pub use serializer::{serialize, DocumentShell};
