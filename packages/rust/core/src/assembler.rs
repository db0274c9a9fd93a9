//! Document assembler.
//!
//! Collects part breaks, processed chapter bodies, and page breaks in output
//! order, then renders them into the single Pandoc input text.

use std::path::Path;

use tracing::{debug, instrument};

use versebook_shared::{MarkerConfig, Result, VersebookError};

/// One block of the assembled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `\part{name}` emitted before the first chapter of a part.
    PartBreak { name: String },
    /// A fully processed chapter.
    Chapter { filename: String, body: String },
    /// Page break emitted after each chapter.
    PageBreak,
}

/// Ordered sequence of blocks making up the final document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_part_break(&mut self, name: impl Into<String>) {
        self.blocks.push(Block::PartBreak { name: name.into() });
    }

    /// Append a processed chapter followed by its page break.
    pub fn push_chapter(&mut self, filename: impl Into<String>, body: impl Into<String>) {
        self.blocks.push(Block::Chapter {
            filename: filename.into(),
            body: body.into(),
        });
        self.blocks.push(Block::PageBreak);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Filenames of the emitted chapters, in order.
    pub fn chapter_filenames(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Chapter { filename, .. } => Some(filename.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render to the final text: blocks joined by a newline, part breaks as
    /// `\n\<part_command>{name}\n\n`, page breaks as `\n\n<page_break>\n\n`.
    pub fn render(&self, markers: &MarkerConfig) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::PartBreak { name } => {
                    format!("\n\\{}{{{name}}}\n\n", markers.part_command)
                }
                Block::Chapter { body, .. } => body.clone(),
                Block::PageBreak => format!("\n\n{}\n\n", markers.page_break),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Write the rendered document to `path`.
#[instrument(skip(text), fields(path = %path.display(), bytes = text.len()))]
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| VersebookError::io(path, e))?;
    debug!("wrote document");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
