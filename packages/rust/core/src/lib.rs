//! Book assembly for versebook.
//!
//! Ties the chapter registry, anchor resolution, and the markdown passes
//! together into one document (see [`pipeline::assemble`]).

pub mod anchors;
pub mod assembler;
pub mod pipeline;
pub mod registry;

pub use anchors::{anchor_fixes, build_anchor_map, slugify_title};
pub use assembler::{Block, Document, write_document};
pub use pipeline::{
    AssembleResult, ProgressReporter, SilentProgress, SkipReason, SkippedChapter, assemble,
};
pub use registry::{ChapterListing, Registry};
