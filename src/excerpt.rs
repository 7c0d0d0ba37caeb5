// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Plain-text excerpts for post listings.
//!
//! Issue bodies are markdown. Listing cards only need the opening paragraph
//! without markup, capped at [`EXCERPT_MAX_CHARS`] characters.

use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on excerpt length, ellipsis included.
pub const EXCERPT_MAX_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

static HEADER_MARKER: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"(?m)^#+\s+",).expect("valid header pattern",),);
static BOLD: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*",).expect("valid bold pattern",),);
static ITALIC: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*",).expect("valid italic pattern",),);
static INLINE_CODE: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"`(.*?)`",).expect("valid code pattern",),);
static LINK: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\(.*?\)",).expect("valid link pattern",),);
static PARAGRAPH_BREAK: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"\n\s*\n",).expect("valid paragraph pattern",),);

/// Derives the listing excerpt from an issue body.
///
/// Header markers, bold/italic/code delimiters and link targets are removed
/// (link text is kept). The first blank-line separated paragraph is returned,
/// truncated to 197 characters plus `...` when it exceeds
/// [`EXCERPT_MAX_CHARS`].
///
/// # Examples
///
/// ```
/// use issuepress::extract_excerpt;
///
/// let excerpt = extract_excerpt("## Intro\n\nRead **the** [docs](https://x.y) first.\n\nMore.",);
/// assert_eq!(excerpt, "Intro");
/// assert_eq!(extract_excerpt("Read **the** [docs](https://x.y).",), "Read the docs.");
/// ```
pub fn extract_excerpt(body: &str,) -> String
{
    if body.is_empty() {
        return String::new();
    }

    let text = HEADER_MARKER.replace_all(body, "",);
    let text = BOLD.replace_all(&text, "${1}",);
    let text = ITALIC.replace_all(&text, "${1}",);
    let text = INLINE_CODE.replace_all(&text, "${1}",);
    let text = LINK.replace_all(&text, "${1}",);

    let first_paragraph = PARAGRAPH_BREAK.split(text.trim(),).next().unwrap_or_default();

    truncate(first_paragraph,)
}

fn truncate(paragraph: &str,) -> String
{
    if paragraph.chars().count() <= EXCERPT_MAX_CHARS {
        return paragraph.to_owned();
    }

    let keep = EXCERPT_MAX_CHARS - ELLIPSIS.len();
    let mut excerpt: String = paragraph.chars().take(keep,).collect();
    excerpt.push_str(ELLIPSIS,);
    excerpt
}
