//! Line-level cleanup passes: test-annotation stripping, code fence
//! numbering, and chapter header injection.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Pass 1: Strip test annotations
// ---------------------------------------------------------------------------

/// Remove the `versetest` comments and markers the doc test harness relies on.
///
/// Strips `<!--versetest ... -->` blocks (up to the nearest close), numbered
/// `<!-- 12 -->` markers, `<!-- #> -->` markers and bare `<#` openers, each
/// together with one trailing newline. Removing one marker can splice its
/// neighbours into another (`<<##`), so the removal repeats until nothing
/// changes.
pub fn strip_test_comments(md: &str) -> String {
    let mut text = strip_markers_once(md);
    loop {
        let next = strip_markers_once(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn strip_markers_once(md: &str) -> String {
    static VERSETEST_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)<!--versetest\n.*?-->\n?").expect("valid regex")
    });
    static NUMBERED_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"<!--\s*\d+\s*-->\n?").expect("valid regex")
    });
    static EXPECT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"<!--\s*#>\s*-->\n?").expect("valid regex")
    });
    static BARE_OPEN_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<#\n?").expect("valid regex"));

    let result = VERSETEST_BLOCK_RE.replace_all(md, "");
    let result = NUMBERED_MARKER_RE.replace_all(&result, "");
    let result = EXPECT_MARKER_RE.replace_all(&result, "");
    BARE_OPEN_RE.replace_all(&result, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 4: Number code blocks
// ---------------------------------------------------------------------------

/// Tag fenced blocks of `language` with Pandoc's `.numberLines` attribute,
/// so a `verse` fence opener becomes `{.verse .numberLines}`.
pub fn number_code_blocks(md: &str, language: &str) -> String {
    let fence = format!("```{language}\n");
    if !md.contains(&fence) {
        return md.to_string();
    }
    md.replace(&fence, &format!("```{{.{language} .numberLines}}\n"))
}

// ---------------------------------------------------------------------------
// Pass 5: Chapter header
// ---------------------------------------------------------------------------

/// Replace the chapter's leading H1 with the generated chapter heading.
///
/// Only a heading at the very start of the text is removed, along with the
/// blank lines after it. Numbered chapters get `Chapter N: Title` and an
/// explicit `{#chapter-NN}` id; unnumbered ones rely on Pandoc's implicit id.
pub fn inject_chapter_header(md: &str, title: &str, number: Option<u32>) -> String {
    static LEADING_H1_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^#\s+[^\n]+\n+").expect("valid regex"));

    let body = LEADING_H1_RE.replacen(md, 1, "");

    let header = match number {
        Some(n) => format!("# Chapter {n}: {title} {{#chapter-{n:02}}}\n\n"),
        None => format!("# {title}\n\n"),
    };

    header + &*body
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
