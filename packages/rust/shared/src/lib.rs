//! Shared types, error model, and configuration for versebook.
//!
//! This crate is the foundation depended on by all other versebook crates.
//! It provides:
//! - [`VersebookError`] — the unified error type
//! - Domain types ([`ChapterSpec`], [`PartSpec`], [`AnchorMap`], [`AnchorFixes`])
//! - Render configuration ([`RenderConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{CodeConfig, MarkerConfig, RenderConfig, load_config, load_config_from};
pub use error::{Result, VersebookError};
pub use types::{
    AnchorFixes, AnchorMap, CHAPTER_FILENAME_RE, ChapterAnchor, ChapterSpec, PartSpec,
};
