//! Anchor resolution: filename → anchor id, and the stale-anchor fix table.

use tracing::debug;

use versebook_shared::{AnchorFixes, AnchorMap, ChapterAnchor, ChapterSpec};

/// Corrections for section anchors whose headings were renamed or removed.
/// Maps old anchor → correct anchor (without `#`).
const BROKEN_ANCHOR_FIXES: &[(&str, &str)] = &[
    (
        "semicolons-vs-commas-sequences-and-tuples",
        "semicolons-vs-commas",
    ),
    ("range-operator-restrictions", "for-expressions"),
    ("floating-point-keys", "floats"),
    ("recursive-targets", "issues-and-patterns"),
];

/// The compiled-in anchor fix table.
pub fn anchor_fixes() -> AnchorFixes {
    BROKEN_ANCHOR_FIXES.iter().copied().collect()
}

/// Build the filename → anchor map for a chapter list.
///
/// Numbered chapters get `chapter-NN`, counting from 1 over numbered entries
/// only, in list order. Unnumbered chapters get the slug Pandoc derives from
/// their heading. The map depends only on the list, never on which files
/// exist on disk, and it is the single source of chapter numbers.
pub fn build_anchor_map(chapters: &[ChapterSpec]) -> AnchorMap {
    let mut map = AnchorMap::new();
    let mut chapter_num: u32 = 1;

    for chapter in chapters {
        let anchor = if chapter.numbered {
            let anchor = ChapterAnchor {
                id: format!("chapter-{chapter_num:02}"),
                number: Some(chapter_num),
            };
            chapter_num += 1;
            anchor
        } else {
            ChapterAnchor {
                id: slugify_title(&chapter.title),
                number: None,
            }
        };
        map.insert(chapter.filename.clone(), anchor);
    }

    debug!(entries = map.len(), "anchor map built");
    map
}

/// Pandoc-style implicit heading id: lowercase, spaces to hyphens.
pub fn slugify_title(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}
