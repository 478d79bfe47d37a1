//! Turns a text selection from a PDF page into Notion blocks.
//!
//! - [`segment`] normalizes whitespace and splits the selection into
//!   sentence-like bullets
//! - [`blocks`] models the subset of Notion's block schema we emit and
//!   assembles the divider/header/bullets/callout sequence

pub mod blocks;
pub mod segment;

pub use blocks::{
    build_blocks, AnnotationRequest, Annotations, AppendChildren, Block, Color, Icon, RichText,
};
pub use segment::{format_bullets, NormalizedText, Sentences};
