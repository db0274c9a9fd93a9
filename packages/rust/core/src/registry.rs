//! Chapter registry: the ordered chapter table and its part groupings.
//!
//! Declaration order is the output order and the numbering order. Nothing
//! here looks at the filesystem; a registered chapter that is missing on
//! disk keeps its number and anchor.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use versebook_shared::{CHAPTER_FILENAME_RE, ChapterSpec, PartSpec, Result, VersebookError};

use crate::anchors::build_anchor_map;

/// Chapter order and titles of the Verse language book: (filename, title, numbered).
const CHAPTERS: &[(&str, &str, bool)] = &[
    ("index.md", "Preface", false),
    ("00_overview.md", "Overview", true),
    ("01_expressions.md", "Expressions", true),
    ("02_primitives.md", "Primitive Types", true),
    ("03_containers.md", "Container Types", true),
    ("04_operators.md", "Operators", true),
    ("05_mutability.md", "Mutability", true),
    ("06_functions.md", "Functions", true),
    ("07_control.md", "Control Flow", true),
    ("08_failure.md", "Failure", true),
    ("09_structs_enums.md", "Structs and Enums", true),
    ("10_classes_interfaces.md", "Classes and Interfaces", true),
    ("11_types.md", "Type System", true),
    ("12_access.md", "Access Specifiers", true),
    ("13_effects.md", "Effects", true),
    ("14_concurrency.md", "Concurrency", true),
    ("15_live_variables.md", "Live Variables", true),
    ("16_modules.md", "Modules and Paths", true),
    ("17_persistable.md", "Persistable Types", true),
    ("18_evolution.md", "Code Evolution", true),
    // Appendix
    ("concept_index.md", "Concept Index", false),
];

/// Part groupings. Each part is entered right before its first member.
const PARTS: &[(&str, &[&str])] = &[
    (
        "Part I: Fundamentals",
        &[
            "00_overview.md",
            "01_expressions.md",
            "02_primitives.md",
            "03_containers.md",
            "04_operators.md",
        ],
    ),
    (
        "Part II: Core Features",
        &[
            "05_mutability.md",
            "06_functions.md",
            "07_control.md",
            "08_failure.md",
            "09_structs_enums.md",
        ],
    ),
    (
        "Part III: Object-Oriented Programming",
        &["10_classes_interfaces.md", "11_types.md", "12_access.md"],
    ),
    (
        "Part IV: Advanced Topics",
        &[
            "13_effects.md",
            "14_concurrency.md",
            "15_live_variables.md",
            "16_modules.md",
        ],
    ),
    ("Part V: Production", &["17_persistable.md", "18_evolution.md"]),
];

/// Immutable, validated chapter table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    chapters: Vec<ChapterSpec>,
    parts: Vec<PartSpec>,
}

/// One row of `--list-chapters` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterListing {
    pub filename: String,
    pub title: String,
    pub anchor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Part entered right before this chapter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opens_part: Option<String>,
}

impl Registry {
    /// Build a registry, validating filenames and part membership.
    pub fn new(chapters: Vec<ChapterSpec>, parts: Vec<PartSpec>) -> Result<Self> {
        validate(&chapters, &parts)?;

        debug!(
            chapters = chapters.len(),
            parts = parts.len(),
            "chapter registry built"
        );

        Ok(Self { chapters, parts })
    }

    /// The compiled-in Verse book registry.
    pub fn builtin() -> Result<Self> {
        let chapters = CHAPTERS
            .iter()
            .map(|&(filename, title, numbered)| ChapterSpec::new(filename, title, numbered))
            .collect();
        let parts = PARTS
            .iter()
            .map(|&(name, members)| PartSpec::new(name, members.iter().copied()))
            .collect();
        Self::new(chapters, parts)
    }

    /// Chapters in output order.
    pub fn ordered_chapters(&self) -> &[ChapterSpec] {
        &self.chapters
    }

    pub fn parts(&self) -> &[PartSpec] {
        &self.parts
    }

    /// Name of the part that starts at `filename`, if `filename` is the first member of one.
    pub fn part_trigger(&self, filename: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|part| part.trigger() == Some(filename))
            .map(|part| part.name.as_str())
    }

    /// Per-chapter summary with anchors and numbers, in registry order.
    pub fn listing(&self) -> Vec<ChapterListing> {
        let anchors = build_anchor_map(&self.chapters);
        self.chapters
            .iter()
            .filter_map(|chapter| {
                let anchor = anchors.get(&chapter.filename)?;
                Some(ChapterListing {
                    filename: chapter.filename.clone(),
                    title: chapter.title.clone(),
                    anchor: anchor.id.clone(),
                    number: anchor.number,
                    opens_part: self.part_trigger(&chapter.filename).map(String::from),
                })
            })
            .collect()
    }
}

/// Check filenames, uniqueness, and that every part is a non-empty,
/// in-order subsequence of the chapter list with no shared members.
fn validate(chapters: &[ChapterSpec], parts: &[PartSpec]) -> Result<()> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(chapters.len());
    for (index, chapter) in chapters.iter().enumerate() {
        if !CHAPTER_FILENAME_RE.is_match(&chapter.filename) {
            return Err(VersebookError::validation(format!(
                "invalid chapter filename '{}': expected lowercase [a-z0-9_]+.md",
                chapter.filename
            )));
        }
        if positions.insert(&chapter.filename, index).is_some() {
            return Err(VersebookError::validation(format!(
                "chapter '{}' is registered twice",
                chapter.filename
            )));
        }
    }

    let mut claimed: HashSet<&str> = HashSet::new();
    for part in parts {
        if part.members.is_empty() {
            return Err(VersebookError::validation(format!(
                "part '{}' has no chapters",
                part.name
            )));
        }

        let mut previous: Option<usize> = None;
        for member in &part.members {
            let Some(&position) = positions.get(member.as_str()) else {
                return Err(VersebookError::validation(format!(
                    "part '{}' lists unregistered chapter '{member}'",
                    part.name
                )));
            };
            if previous.is_some_and(|p| position <= p) {
                return Err(VersebookError::validation(format!(
                    "part '{}' lists '{member}' out of registry order",
                    part.name
                )));
            }
            if !claimed.insert(member.as_str()) {
                return Err(VersebookError::validation(format!(
                    "chapter '{member}' belongs to more than one part"
                )));
            }
            previous = Some(position);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters(names: &[&str]) -> Vec<ChapterSpec> {
        names
            .iter()
            .map(|name| ChapterSpec::new(*name, name.trim_end_matches(".md"), true))
            .collect()
    }

    #[test]
    fn builtin_registry_is_valid() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.ordered_chapters().len(), 21);
        assert_eq!(registry.parts().len(), 5);
        assert_eq!(registry.ordered_chapters()[0].filename, "index.md");
        assert_eq!(
            registry.ordered_chapters().last().unwrap().filename,
            "concept_index.md"
        );
    }

    #[test]
    fn builtin_has_nineteen_numbered_chapters() {
        let registry = Registry::builtin().unwrap();
        let numbered = registry
            .ordered_chapters()
            .iter()
            .filter(|c| c.numbered)
            .count();
        assert_eq!(numbered, 19);
    }

    #[test]
    fn part_trigger_only_on_first_member() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(
            registry.part_trigger("00_overview.md"),
            Some("Part I: Fundamentals")
        );
        assert_eq!(registry.part_trigger("01_expressions.md"), None);
        assert_eq!(
            registry.part_trigger("17_persistable.md"),
            Some("Part V: Production")
        );
        assert_eq!(registry.part_trigger("index.md"), None);
        assert_eq!(registry.part_trigger("concept_index.md"), None);
    }

    #[test]
    fn rejects_bad_filename() {
        let err = Registry::new(chapters(&["Intro.md"]), vec![]).unwrap_err();
        assert!(err.to_string().contains("Intro.md"));
    }

    #[test]
    fn rejects_duplicate_chapter() {
        let err = Registry::new(chapters(&["a.md", "b.md", "a.md"]), vec![]).unwrap_err();
        assert!(err.to_string().contains("registered twice"));
    }

    #[test]
    fn rejects_empty_part() {
        let parts = vec![PartSpec::new("Part I", Vec::<String>::new())];
        let err = Registry::new(chapters(&["a.md"]), parts).unwrap_err();
        assert!(err.to_string().contains("no chapters"));
    }

    #[test]
    fn rejects_part_out_of_order() {
        let parts = vec![PartSpec::new("Part I", ["b.md", "a.md"])];
        let err = Registry::new(chapters(&["a.md", "b.md"]), parts).unwrap_err();
        assert!(err.to_string().contains("out of registry order"));
    }

    #[test]
    fn rejects_unregistered_member() {
        let parts = vec![PartSpec::new("Part I", ["a.md", "c.md"])];
        let err = Registry::new(chapters(&["a.md", "b.md"]), parts).unwrap_err();
        assert!(err.to_string().contains("unregistered chapter 'c.md'"));
    }

    #[test]
    fn rejects_chapter_in_two_parts() {
        let parts = vec![
            PartSpec::new("Part I", ["a.md", "b.md"]),
            PartSpec::new("Part II", ["b.md", "c.md"]),
        ];
        let err = Registry::new(chapters(&["a.md", "b.md", "c.md"]), parts).unwrap_err();
        assert!(err.to_string().contains("more than one part"));
    }

    #[test]
    fn non_contiguous_subsequence_is_accepted() {
        let parts = vec![PartSpec::new("Part I", ["a.md", "c.md"])];
        let registry = Registry::new(chapters(&["a.md", "b.md", "c.md"]), parts).unwrap();
        assert_eq!(registry.part_trigger("a.md"), Some("Part I"));
    }

    #[test]
    fn listing_reports_anchors_and_parts() {
        let registry = Registry::builtin().unwrap();
        let listing = registry.listing();
        assert_eq!(listing.len(), 21);

        assert_eq!(listing[0].anchor, "preface");
        assert_eq!(listing[0].number, None);
        assert_eq!(listing[0].opens_part, None);

        assert_eq!(listing[1].filename, "00_overview.md");
        assert_eq!(listing[1].anchor, "chapter-01");
        assert_eq!(listing[1].number, Some(1));
        assert_eq!(listing[1].opens_part.as_deref(), Some("Part I: Fundamentals"));

        assert_eq!(listing[20].anchor, "concept-index");
    }
}
