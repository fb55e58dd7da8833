//! Write-up markup: a small markdown subset turned into typed blocks.
//!
//! Rendering is split in two stages. The tokenizer turns raw text into a
//! `MarkupDocument` made only of the closed `Block`/`Inline` variant set,
//! and the renderer maps each variant to a fixed, allow-listed HTML element.
//! Supported syntax: `#`-`###` headings, `**bold**`, `` `code` ``, fenced
//! code blocks, `![alt](src)` images, `---` rules and single list lines.

mod inline;
mod links;
mod renderer;
mod tokenizer;

pub use links::AssetResolver;
pub use renderer::{MarkupRenderer, is_safe_source};
pub use tokenizer::transform;

/// Inline content inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    /// `**text**`; may contain inline code.
    Strong(Vec<Inline>),
    /// `` `text` ``, rendered literally.
    Code(String),
}

/// Marker that introduced a list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `-` or `*`
    Bullet,
    /// `1.`, `2.`, ...
    Ordered(u64),
}

/// One block-level unit of a write-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with level 1 to 3.
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// Fenced code; `body` is the literal text between the fences.
    CodeBlock {
        language: Option<String>,
        body: String,
    },
    Image { alt: String, src: String },
    Rule,
    /// A single list line. Consecutive lines are not grouped.
    ListItem {
        marker: ListMarker,
        content: Vec<Inline>,
    },
}

/// Ordered block sequence derived from write-up text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupDocument {
    blocks: Vec<Block>,
}

impl MarkupDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text of the first heading with visible text, if any.
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading { content, .. } => {
                Some(plain_text(content)).filter(|title| !title.trim().is_empty())
            }
            _ => None,
        })
    }

    /// Image sources in document order.
    pub fn image_sources(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Image { src, .. } => Some(src.as_str()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a MarkupDocument {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Flattens inline content to its visible text.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(inner) => out.push_str(&plain_text(inner)),
        }
    }
    out
}
