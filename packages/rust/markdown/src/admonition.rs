//! MkDocs-style admonitions (`!!! warning "Title"`) to Pandoc fenced divs.
//!
//! The LaTeX template defines one tcolorbox environment per container name
//! (`warningbox`, `notebox`, ...), and Pandoc maps `::: {name}` onto it.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Container used when a keyword has no dedicated box.
pub const DEFAULT_CONTAINER: &str = "notebox";

/// Severity keywords recognized after `!!!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdmonitionKind {
    Warning,
    Note,
    Info,
    Tip,
    Danger,
    Important,
}

impl AdmonitionKind {
    pub const ALL: [AdmonitionKind; 6] = [
        Self::Warning,
        Self::Note,
        Self::Info,
        Self::Tip,
        Self::Danger,
        Self::Important,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Note => "note",
            Self::Info => "info",
            Self::Tip => "tip",
            Self::Danger => "danger",
            Self::Important => "important",
        }
    }

    /// LaTeX container environment for this kind.
    pub fn container(self) -> &'static str {
        match self {
            Self::Warning | Self::Important => "warningbox",
            Self::Note => "notebox",
            Self::Info => "infobox",
            Self::Tip => "tipbox",
            Self::Danger => "dangerbox",
        }
    }
}

/// Container name for a keyword, falling back to [`DEFAULT_CONTAINER`].
pub fn container_for(keyword: &str) -> &'static str {
    AdmonitionKind::from_keyword(keyword)
        .map(AdmonitionKind::container)
        .unwrap_or(DEFAULT_CONTAINER)
}

/// Convert every admonition block into a labeled fenced div.
///
/// An admonition is an opener line `!!! <keyword> ["title"]` followed by the
/// lines indented by exactly four spaces. The body is de-indented, the title
/// defaults to the capitalized keyword.
pub fn convert_admonitions(md: &str) -> String {
    static ADMONITION_RE: LazyLock<Regex> = LazyLock::new(|| {
        let keywords = AdmonitionKind::ALL
            .iter()
            .map(|kind| kind.keyword())
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r#"(?m)^(!{{3}})\s+({keywords})(?:\s+"([^"]*)")?\s*\n((?:[ ]{{4}}.*\n?)*)"#
        ))
        .expect("valid regex")
    });

    ADMONITION_RE
        .replace_all(md, |caps: &Captures| {
            let keyword = &caps[2];
            let title = caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| capitalize(keyword));
            let body = dedent_body(caps.get(4).map_or("", |m| m.as_str()));
            let container = container_for(keyword);

            format!("\n::: {{{container}}}\n**{title}**\n\n{body}\n:::\n\n")
        })
        .into_owned()
}

/// Strip the four-space indent from each body line and trim the result.
fn dedent_body(body: &str) -> String {
    body.split('\n')
        .map(|line| match line.strip_prefix("    ") {
            Some(rest) => rest,
            None if line.trim().is_empty() => "",
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
