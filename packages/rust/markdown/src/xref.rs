//! Cross-reference rewriting for the single assembled document.
//!
//! Source chapters link to each other as separate files (`06_functions.md#lambdas`).
//! Once concatenated, every link has to point at an in-document anchor instead.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use versebook_shared::{AnchorFixes, AnchorMap};

/// Rewrite markdown links against the assembled document's anchor namespace.
///
/// - `[T](file.md)` becomes `[T](#<chapter anchor>)`.
/// - `[T](file.md#a)` and `[T](file.md/#a)` become `[T](#a)`, with `a` corrected
///   through `fixes` when it is a known stale anchor.
/// - `[T](unknown.md)` collapses to plain `T`.
/// - `[T](#a)` is only touched when `a` has a correction.
///
/// Both link shapes are matched in one left-to-right pass over the input, so
/// a rewritten link is never fed through the fix table a second time.
pub fn convert_cross_references(md: &str, anchors: &AnchorMap, fixes: &AnchorFixes) -> String {
    static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"\[(?P<label>[^\]]+)\]\((?:(?P<file>[a-z0-9_]+\.md)/?(?:#(?P<anchor>[a-z0-9_-]+))?|#(?P<local>[a-z0-9_-]+))\)",
        )
        .expect("valid regex")
    });

    LINK_RE
        .replace_all(md, |caps: &Captures| {
            let label = &caps["label"];

            if let Some(local) = caps.name("local") {
                return match fixes.lookup(local.as_str()) {
                    Some(fixed) => format!("[{label}](#{fixed})"),
                    None => caps[0].to_string(),
                };
            }

            let file = &caps["file"];
            let Some(chapter_anchor) = anchors.anchor_id(file) else {
                // Unknown target: keep the reader-visible text, drop the href.
                return label.to_string();
            };

            match caps.name("anchor") {
                Some(anchor) => format!("[{label}](#{})", fixes.apply(anchor.as_str())),
                None => format!("[{label}](#{chapter_anchor})"),
            }
        })
        .into_owned()
}
