// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Utilities for deriving post slugs from issue titles.
//!
//! Slugs produced by this module contain only lowercase ASCII alphanumeric
//! characters separated by single hyphens, making them suitable for page
//! routes such as `/posts/{slug}/` and for filenames on every platform.
//!
//! Derivation runs in a fixed order: lowercase, drop every `[...]` group,
//! drop characters outside `a-z`, `0-9`, whitespace and `-`, then turn each
//! run of whitespace and hyphens into one hyphen with none at either end.
//! Characters removed in the third step do not leave a separator behind, so
//! `"C#/Rust"` becomes `"crust"`.

/// Builder for slug strings derived from issue titles.
#[derive(Debug, Clone, Copy,)]
pub struct SlugStrategy<'input,>
{
    source: &'input str,
}

impl<'input,> SlugStrategy<'input,>
{
    /// Creates a new slug builder for the provided title.
    ///
    /// The builder retains a borrowed view of the source to avoid allocations
    /// until [`build`](Self::build) is invoked.
    pub fn builder(source: &'input str,) -> Self
    {
        Self {
            source,
        }
    }

    /// Builds a slug from the title. Returns `None` when nothing slug-worthy
    /// survives normalization, e.g. for titles made only of punctuation or
    /// bracketed tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuepress::SlugStrategy;
    ///
    /// let slug = SlugStrategy::builder("[Tutorial] How to Build X!",).build();
    /// assert_eq!(slug.as_deref(), Some("how-to-build-x"));
    /// assert!(SlugStrategy::builder("???",).build().is_none());
    /// ```
    pub fn build(self,) -> Option<String,>
    {
        let lowered = self.source.to_lowercase();
        let untagged = strip_bracket_groups(&lowered,);

        let mut slug = String::with_capacity(untagged.len(),);
        let mut pending_hyphen = false;

        for candidate in untagged.chars() {
            match candidate {
                'a'..='z' | '0'..='9' => {
                    if pending_hyphen && !slug.is_empty() {
                        slug.push('-',);
                    }
                    pending_hyphen = false;
                    slug.push(candidate,);
                }
                ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C' | '-' => pending_hyphen = true,
                _ => {}
            }
        }

        if slug.is_empty() { None } else { Some(slug,) }
    }

    /// Builds the slug, substituting `issue-{number}` when the title yields
    /// nothing.
    ///
    /// ```
    /// use issuepress::SlugStrategy;
    ///
    /// assert_eq!(SlugStrategy::builder("???",).build_or_issue(42,), "issue-42");
    /// ```
    pub fn build_or_issue(self, number: u64,) -> String
    {
        self.build().unwrap_or_else(|| format!("issue-{number}"),)
    }
}

/// Removes every `[...]` group, matching each `[` with the nearest following
/// `]` on the same line. An unmatched `[` is kept as-is.
fn strip_bracket_groups(source: &str,) -> String
{
    let mut output = String::with_capacity(source.len(),);
    let mut rest = source;

    while let Some(open,) = rest.find('[',) {
        let after = &rest[open + 1..];
        match after.find(|ch: char| ch == ']' || ch == '\n',) {
            Some(close,) if after[close..].starts_with(']',) => {
                output.push_str(&rest[..open],);
                rest = &after[close + 1..];
            }
            _ => {
                output.push_str(&rest[..=open],);
                rest = after;
            }
        }
    }

    output.push_str(rest,);
    output
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::{SlugStrategy, strip_bracket_groups};

    proptest! {
        #[test]
        fn slug_contains_only_allowed_characters(input in "\\PC{0,64}") {
            let slug = SlugStrategy::builder(&input).build_or_issue(7);
            prop_assert!(!slug.is_empty());
            prop_assert!(slug.chars().all(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '-')));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn slug_is_idempotent(input in "[A-Za-z0-9 \\[\\]!?._/-]{0,48}") {
            let once = SlugStrategy::builder(&input).build_or_issue(1);
            let twice = SlugStrategy::builder(&once).build_or_issue(1);
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn tutorial_prefix_is_removed()
    {
        let slug = SlugStrategy::builder("[Tutorial] How to Build X!",).build();
        assert_eq!(slug.as_deref(), Some("how-to-build-x"));
    }

    #[test]
    fn punctuation_only_title_falls_back_to_issue_number()
    {
        assert!(SlugStrategy::builder("???").build().is_none());
        assert_eq!(SlugStrategy::builder("???",).build_or_issue(42,), "issue-42");
    }

    #[test]
    fn bracket_only_title_falls_back_to_issue_number()
    {
        let slug = SlugStrategy::builder("[PYTANIE] [ARTYKUŁ]",).build_or_issue(9,);
        assert_eq!(slug, "issue-9");
    }

    #[test]
    fn every_bracket_group_is_removed()
    {
        let slug = SlugStrategy::builder("[A] Intro [draft] to Rust [v2]",).build();
        assert_eq!(slug.as_deref(), Some("intro-to-rust"));
    }

    #[test]
    fn removed_characters_do_not_leave_separators()
    {
        let slug = SlugStrategy::builder("C#/Rust & Go",).build();
        assert_eq!(slug.as_deref(), Some("crust-go"));
    }

    #[test]
    fn whitespace_and_hyphen_runs_collapse()
    {
        let slug = SlugStrategy::builder("  Multi -- Separator\t\tValue  ",).build();
        assert_eq!(slug.as_deref(), Some("multi-separator-value"));
    }

    #[test]
    fn leading_and_trailing_hyphens_are_stripped()
    {
        let slug = SlugStrategy::builder("---test---",).build();
        assert_eq!(slug.as_deref(), Some("test"));
    }

    #[test]
    fn non_ascii_letters_are_dropped()
    {
        let slug = SlugStrategy::builder("Jak zacząć z Rustem?",).build();
        assert_eq!(slug.as_deref(), Some("jak-zacz-z-rustem"));
    }

    #[test]
    fn underscores_and_dots_are_dropped()
    {
        let slug = SlugStrategy::builder("snake_case v1.2",).build();
        assert_eq!(slug.as_deref(), Some("snakecase-v12"));
    }

    #[test]
    fn unmatched_bracket_is_kept_then_dropped_as_punctuation()
    {
        assert_eq!(strip_bracket_groups("a [b c"), "a [b c");
        let slug = SlugStrategy::builder("a [b c",).build();
        assert_eq!(slug.as_deref(), Some("a-b-c"));
    }

    #[test]
    fn bracket_group_does_not_span_lines()
    {
        assert_eq!(strip_bracket_groups("[a\nb] [c]"), "[a\nb] ");
    }

    #[test]
    fn nested_open_bracket_matches_nearest_close()
    {
        assert_eq!(strip_bracket_groups("x [a[b] y]"), "x  y]");
    }

    #[test]
    fn slug_strategy_copy_trait()
    {
        let builder1 = SlugStrategy::builder("test",);
        let builder2 = builder1;
        assert_eq!(builder1.build(), builder2.build());
    }
}
