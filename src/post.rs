// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transformation of raw issues into blog posts.
//!
//! A [`Post`] is rebuilt from scratch on every run; nothing about previously
//! published posts is remembered. Field names follow what the site templates
//! read from `page.issue`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    classify::{self, LabelFlag},
    excerpt::extract_excerpt,
    issue::{IssueAuthor, IssueLabel, RawIssue},
    slug::SlugStrategy,
};

/// Blog-ready representation of a single issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Post
{
    /// Issue number, stable across runs.
    pub number:         u64,
    /// Title exactly as written on the issue.
    pub title:          String,
    /// Title without its leading `[...]` tag.
    pub clean_title:    String,
    /// Raw markdown body, empty when the issue has none.
    pub body:           String,
    /// Plain-text opening paragraph for listings.
    pub excerpt:        String,
    pub created_at:     DateTime<Utc,>,
    pub updated_at:     DateTime<Utc,>,
    /// Link to the issue on GitHub.
    pub html_url:       String,
    pub user:           IssueAuthor,
    pub labels:         Vec<IssueLabel,>,
    pub category:       String,
    pub comments_count: u64,
    /// URL-safe identifier, never empty.
    pub slug:           String,
    /// Site route of the generated page.
    pub url:            String,
    /// Creation date as `YYYY-MM-DD`.
    pub date:           String,
    pub is_question:    bool,
    pub is_tutorial:    bool,
    pub is_article:     bool,
}

impl Post
{
    /// Derives a post from an issue. Pull requests are not rejected here; use
    /// [`transform_issues`] for listing payloads.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuepress::{Post, RawIssue};
    ///
    /// let issue: RawIssue = serde_json::from_value(serde_json::json!({
    ///     "number": 3,
    ///     "title": "[Tutorial] How to Build X!",
    ///     "body": "Step **one**.",
    ///     "created_at": "2025-01-05T08:00:00Z",
    ///     "updated_at": "2025-01-05T08:00:00Z",
    ///     "html_url": "https://github.com/octocat/blog/issues/3",
    ///     "user": {"login": "octocat", "avatar_url": "", "html_url": ""},
    ///     "labels": [{"name": "tutorial", "color": "0e8a16", "description": null}],
    ///     "comments": 0
    /// }),)
    /// .expect("valid issue",);
    ///
    /// let post = Post::from_issue(&issue,);
    /// assert_eq!(post.slug, "how-to-build-x");
    /// assert_eq!(post.clean_title, "How to Build X!");
    /// assert_eq!(post.url, "/posts/how-to-build-x/");
    /// assert!(post.is_tutorial);
    /// ```
    pub fn from_issue(issue: &RawIssue,) -> Self
    {
        let slug = SlugStrategy::builder(&issue.title,).build_or_issue(issue.number,);
        let body = issue.body.clone().unwrap_or_default();
        let labels = issue.labels.clone();

        Self {
            number: issue.number,
            title: issue.title.clone(),
            clean_title: clean_title(&issue.title,),
            excerpt: extract_excerpt(&body,),
            body,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
            html_url: issue.html_url.clone(),
            user: issue.author.clone(),
            category: classify::category(&labels,),
            comments_count: issue.comments,
            url: format!("/posts/{slug}/"),
            date: issue.created_at.format("%Y-%m-%d",).to_string(),
            is_question: LabelFlag::Question.matches(&labels,),
            is_tutorial: LabelFlag::Tutorial.matches(&labels,),
            is_article: LabelFlag::Article.matches(&labels,),
            labels,
            slug,
        }
    }
}

/// Removes a single leading `[...]` tag and the whitespace that follows it.
///
/// Only the prefix is touched; bracket groups later in the title survive,
/// unlike slug derivation which drops all of them.
///
/// ```
/// use issuepress::clean_title;
///
/// assert_eq!(clean_title("[Tutorial] How to Build X!",), "How to Build X!");
/// assert_eq!(clean_title("Intro [draft]",), "Intro [draft]");
/// ```
pub fn clean_title(title: &str,) -> String
{
    let Some(rest,) = title.strip_prefix('[',) else {
        return title.to_owned();
    };

    match rest.find(|ch: char| ch == ']' || ch == '\n',) {
        Some(close,) if rest[close..].starts_with(']',) => {
            rest[close + 1..].trim_start().to_owned()
        }
        _ => title.to_owned(),
    }
}

/// Converts an issues listing into posts, dropping pull requests and
/// preserving the listing order.
pub fn transform_issues(issues: Vec<RawIssue,>,) -> Vec<Post,>
{
    let total = issues.len();
    let posts: Vec<Post,> = issues
        .iter()
        .filter(|issue| {
            let pull_request = issue.is_pull_request();
            if pull_request {
                debug!("Skipping pull request #{}", issue.number);
            }
            !pull_request
        },)
        .map(Post::from_issue,)
        .collect();

    info!(
        "Processed {} issues ({} pull requests filtered out)",
        posts.len(),
        total - posts.len()
    );

    posts
}
