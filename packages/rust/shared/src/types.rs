//! Core domain types for the versebook preprocessor.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Filenames the registry and the cross-reference rewriter agree on.
pub static CHAPTER_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+\.md$").expect("valid regex"));

// ---------------------------------------------------------------------------
// ChapterSpec / PartSpec
// ---------------------------------------------------------------------------

/// One source file mapped to one titled section of the assembled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSpec {
    /// Source filename inside the docs directory (e.g. `06_functions.md`).
    pub filename: String,
    /// Title used for the generated chapter heading.
    pub title: String,
    /// Whether the chapter takes part in `Chapter N` numbering.
    pub numbered: bool,
}

impl ChapterSpec {
    pub fn new(filename: impl Into<String>, title: impl Into<String>, numbered: bool) -> Self {
        Self {
            filename: filename.into(),
            title: title.into(),
            numbered,
        }
    }
}

/// A named grouping of contiguous chapters, rendered as a `\part{}` break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSpec {
    /// Display name, e.g. `Part I: Fundamentals`.
    pub name: String,
    /// Member filenames in registry order. The first member triggers the part break.
    pub members: Vec<String>,
}

impl PartSpec {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// The filename immediately before which this part is entered.
    pub fn trigger(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// The anchor assigned to a chapter, plus its chapter number when numbered.
///
/// Both come out of the same counter pass so the generated heading and every
/// link pointing at the chapter always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterAnchor {
    /// Anchor id without the leading `#`.
    pub id: String,
    /// Sequential chapter number, `None` for unnumbered chapters.
    pub number: Option<u32>,
}

/// Mapping from chapter filename to its anchor. Total over the registry it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorMap {
    entries: HashMap<String, ChapterAnchor>,
}

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the anchor for a filename, replacing any previous entry.
    pub fn insert(&mut self, filename: impl Into<String>, anchor: ChapterAnchor) {
        self.entries.insert(filename.into(), anchor);
    }

    pub fn get(&self, filename: &str) -> Option<&ChapterAnchor> {
        self.entries.get(filename)
    }

    /// Anchor id for a filename, if the file is registered.
    pub fn anchor_id(&self, filename: &str) -> Option<&str> {
        self.get(filename).map(|a| a.id.as_str())
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.entries.contains_key(filename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Corrections for in-document anchors that went stale when headings were renamed.
///
/// Maps old anchor id to corrected anchor id (both without `#`). Corrections are
/// best-effort: the target is not checked against the assembled document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorFixes {
    fixes: HashMap<String, String>,
}

impl AnchorFixes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Corrected id for `anchor`, or `None` when it is not a known stale anchor.
    pub fn lookup(&self, anchor: &str) -> Option<&str> {
        self.fixes.get(anchor).map(String::as_str)
    }

    /// Corrected id for `anchor`, falling back to `anchor` itself.
    pub fn apply<'a>(&'a self, anchor: &'a str) -> &'a str {
        self.lookup(anchor).unwrap_or(anchor)
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AnchorFixes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fixes: iter
                .into_iter()
                .map(|(old, new)| (old.into(), new.into()))
                .collect(),
        }
    }
}
