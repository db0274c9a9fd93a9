//! End-to-end preprocessing: docs directory → registry order → passes → document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use versebook_markdown::{ChapterContext, process_chapter};
use versebook_shared::{ChapterSpec, RenderConfig, Result, VersebookError};

use crate::anchors::{anchor_fixes, build_anchor_map};
use crate::assembler::Document;
use crate::registry::Registry;

/// Result of a preprocessing run.
#[derive(Debug)]
pub struct AssembleResult {
    /// The assembled block sequence.
    pub document: Document,
    /// Rendered document text, ready for Pandoc.
    pub text: String,
    /// Chapters that were registered but could not be read.
    pub skipped: Vec<SkippedChapter>,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

impl AssembleResult {
    /// Number of chapters that made it into the document.
    pub fn chapter_count(&self) -> usize {
        self.document.chapter_filenames().count()
    }
}

/// A registered chapter that was left out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedChapter {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Why a chapter was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file is not on disk.
    NotFound,
    /// The file exists but could not be read as UTF-8 text.
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Unreadable(err) => write!(f, "unreadable: {err}"),
        }
    }
}

/// Progress callback for reporting per-chapter status.
pub trait ProgressReporter {
    /// Called right before a chapter is run through the passes.
    fn chapter_started(&self, chapter: &ChapterSpec);
    /// Called when a registered chapter is skipped.
    fn chapter_skipped(&self, _skipped: &SkippedChapter) {}
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn chapter_started(&self, _chapter: &ChapterSpec) {}
}

/// Assemble every chapter found in `docs_dir` into one document.
///
/// 1. Build the anchor map from the full registry (numbers never depend on
///    which files exist)
/// 2. For each registered chapter in order: skip it if unreadable, emit its
///    part break if it opens a part, run the passes, append a page break
/// 3. Render the blocks
///
/// Only a missing docs directory is fatal.
#[instrument(skip_all, fields(docs_dir = %docs_dir.display()))]
pub fn assemble(
    docs_dir: &Path,
    registry: &Registry,
    config: &RenderConfig,
    progress: &dyn ProgressReporter,
) -> Result<AssembleResult> {
    let start = Instant::now();

    if !docs_dir.is_dir() {
        return Err(VersebookError::MissingInput {
            path: docs_dir.to_path_buf(),
        });
    }

    let anchors = build_anchor_map(registry.ordered_chapters());
    let fixes = anchor_fixes();

    let mut document = Document::new();
    let mut skipped = Vec::new();

    for chapter in registry.ordered_chapters() {
        let path = docs_dir.join(&chapter.filename);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                let reason = match e.kind() {
                    ErrorKind::NotFound => SkipReason::NotFound,
                    _ => SkipReason::Unreadable(e.to_string()),
                };
                warn!(path = %path.display(), %reason, "chapter skipped");
                let entry = SkippedChapter { path, reason };
                progress.chapter_skipped(&entry);
                skipped.push(entry);
                continue;
            }
        };

        if let Some(part) = registry.part_trigger(&chapter.filename) {
            debug!(part, "entering part");
            document.push_part_break(part);
        }

        progress.chapter_started(chapter);

        let ctx = ChapterContext {
            chapter,
            anchors: &anchors,
            fixes: &fixes,
            config,
        };
        document.push_chapter(&chapter.filename, process_chapter(&content, &ctx));
    }

    let text = document.render(&config.markers);

    let result = AssembleResult {
        document,
        text,
        skipped,
        elapsed: start.elapsed(),
    };

    info!(
        chapters = result.chapter_count(),
        skipped = result.skipped.len(),
        bytes = result.text.len(),
        elapsed_ms = result.elapsed.as_millis() as u64,
        "document assembled"
    );

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
