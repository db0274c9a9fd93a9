//! Render configuration for versebook.
//!
//! The book structure (chapters, parts, anchor fixes) is compiled in. This file
//! only covers rendering knobs, loaded from an optional TOML file. Every field
//! defaults to the output the Pandoc/LaTeX templates expect.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VersebookError};

/// Top-level render config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Code block settings.
    #[serde(default)]
    pub code: CodeConfig,

    /// LaTeX structure markers.
    #[serde(default)]
    pub markers: MarkerConfig,
}

/// `[code]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeConfig {
    /// Fence language whose blocks get the `.numberLines` attribute.
    #[serde(default = "default_number_lines_language")]
    pub number_lines_language: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            number_lines_language: default_number_lines_language(),
        }
    }
}

fn default_number_lines_language() -> String {
    "verse".into()
}

/// `[markers]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerConfig {
    /// Raw LaTeX emitted after every chapter.
    #[serde(default = "default_page_break")]
    pub page_break: String,

    /// LaTeX command name used for part breaks (`\part{...}`).
    #[serde(default = "default_part_command")]
    pub part_command: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            page_break: default_page_break(),
            part_command: default_part_command(),
        }
    }
}

fn default_page_break() -> String {
    "\\newpage".into()
}
fn default_part_command() -> String {
    "part".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the render config from an optional path. Returns defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => {
            tracing::debug!("no render config given, using defaults");
            Ok(RenderConfig::default())
        }
    }
}

/// Load the render config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| VersebookError::io(path, e))?;

    let config: RenderConfig = toml::from_str(&content).map_err(|e| {
        VersebookError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    if config.code.number_lines_language.trim().is_empty() {
        return Err(VersebookError::config(
            "code.number_lines_language must not be empty",
        ));
    }

    tracing::debug!(?path, "loaded render config");
    Ok(config)
}
