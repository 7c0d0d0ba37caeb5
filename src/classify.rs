// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Label-driven classification of posts.
//!
//! Both the category and the content flags are looked up from fixed tables,
//! so new categories or translations are added as data.

use serde::Serialize;

use crate::issue::IssueLabel;

/// Category assigned when an issue carries no labels.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Label names promoted to a post category, highest priority first.
/// Project categories come before the generic ones.
pub const PRIORITY_CATEGORIES: &[&str] =
    &["intellisent", "intelliapp", "tutorial", "pytanie", "enhancement",];

/// Content flags derived from label names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum LabelFlag
{
    /// Reader question.
    Question,
    /// Step-by-step guide.
    Tutorial,
    /// Long-form article.
    Article,
}

/// Substrings (English and Polish) that turn a flag on when found inside a
/// lowercased label name.
const FLAG_MARKERS: &[(LabelFlag, &[&str],)] = &[
    (LabelFlag::Question, &["pytanie", "question",],),
    (LabelFlag::Tutorial, &["tutorial", "poradnik",],),
    (LabelFlag::Article, &["artykuł", "article",],),
];

impl LabelFlag
{
    /// Returns `true` when any label name contains one of the flag markers,
    /// ignoring case.
    ///
    /// ```
    /// use issuepress::{IssueLabel, LabelFlag};
    ///
    /// let labels = [IssueLabel {
    ///     name: "Poradnik".to_owned(), color: String::new(), description: None,
    /// }];
    /// assert!(LabelFlag::Tutorial.matches(&labels));
    /// assert!(!LabelFlag::Question.matches(&labels));
    /// ```
    pub fn matches(self, labels: &[IssueLabel],) -> bool
    {
        let markers = FLAG_MARKERS
            .iter()
            .find(|(flag, _,)| *flag == self,)
            .map(|(_, markers,)| *markers,)
            .unwrap_or_default();

        labels.iter().any(|label| {
            let name = label.name.to_lowercase();
            markers.iter().any(|marker| name.contains(marker,),)
        },)
    }
}

/// Picks the post category from the issue labels.
///
/// The first label whose lowercased name appears in
/// [`PRIORITY_CATEGORIES`] wins and yields that lowercase entry. Otherwise
/// the first label's name is used verbatim, and an unlabeled issue is
/// [`UNCATEGORIZED`].
pub fn category(labels: &[IssueLabel],) -> String
{
    let prioritized = labels.iter().find_map(|label| {
        let name = label.name.to_lowercase();
        PRIORITY_CATEGORIES.iter().find(|candidate| **candidate == name,)
    },);

    if let Some(found,) = prioritized {
        return (*found).to_owned();
    }

    labels.first().map_or_else(|| UNCATEGORIZED.to_owned(), |label| label.name.clone(),)
}
