//! Markdown transform passes for Pandoc/LaTeX book output.
//!
//! Each pass is a pure `&str -> String` function over one or a few compiled
//! regexes. A pass that finds nothing to rewrite returns its input unchanged;
//! no pass fails on malformed markdown. [`process_chapter`] runs them in order:
//!
//! 1. [`strip_test_comments`] — drop `versetest` annotations
//! 2. [`convert_admonitions`] — `!!! kind "title"` blocks to fenced divs
//! 3. [`convert_cross_references`] — file links to in-document anchors
//! 4. [`number_code_blocks`] — `.numberLines` on the configured language
//! 5. [`inject_chapter_header`] — generated `Chapter N: Title` heading

mod admonition;
mod cleanup;
mod xref;

use tracing::{instrument, trace};

use versebook_shared::{AnchorFixes, AnchorMap, ChapterSpec, RenderConfig};

pub use admonition::{AdmonitionKind, DEFAULT_CONTAINER, container_for, convert_admonitions};
pub use cleanup::{inject_chapter_header, number_code_blocks, strip_test_comments};
pub use xref::convert_cross_references;

/// Everything a chapter needs from the surrounding book to be processed.
#[derive(Debug, Clone, Copy)]
pub struct ChapterContext<'a> {
    /// The registry entry being processed.
    pub chapter: &'a ChapterSpec,
    /// Filename → anchor map for the whole book.
    pub anchors: &'a AnchorMap,
    /// Stale anchor corrections.
    pub fixes: &'a AnchorFixes,
    /// Render settings.
    pub config: &'a RenderConfig,
}

impl ChapterContext<'_> {
    /// Chapter number of record, taken from the anchor map.
    ///
    /// `None` for unnumbered chapters, so the header and the `chapter-NN`
    /// link targets can never disagree.
    pub fn number(&self) -> Option<u32> {
        if !self.chapter.numbered {
            return None;
        }
        self.anchors
            .get(&self.chapter.filename)
            .and_then(|anchor| anchor.number)
    }
}

/// Run all passes over one chapter's raw markdown.
#[instrument(skip_all, fields(file = %ctx.chapter.filename))]
pub fn process_chapter(content: &str, ctx: &ChapterContext<'_>) -> String {
    let result = strip_test_comments(content);
    let result = convert_admonitions(&result);
    let result = convert_cross_references(&result, ctx.anchors, ctx.fixes);
    let result = number_code_blocks(&result, &ctx.config.code.number_lines_language);
    let result = inject_chapter_header(&result, &ctx.chapter.title, ctx.number());

    trace!(
        input_len = content.len(),
        output_len = result.len(),
        "chapter processed"
    );

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
