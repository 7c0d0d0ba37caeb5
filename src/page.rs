// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Page descriptors handed to the site builder.
//!
//! Materialization is infallible: each post becomes a [`PageDescriptor`]
//! and the whole run is summarized in [`IssuesSummary`]. Whether the
//! requested layout renders is the site builder's concern.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{issue::IssueLabel, post::Post};

/// Directory (relative to the site source) that receives post pages.
pub const POSTS_DIR: &str = "posts";

/// Template a generated page asks the site builder to render it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,)]
#[serde(rename_all = "snake_case")]
pub enum Layout
{
    /// Dedicated `_layouts/issue.html` template.
    Issue,
    /// Generic `_layouts/post.html` template.
    Post,
}

impl Layout
{
    /// Chooses [`Layout::Issue`] when the site defines
    /// `_layouts/issue.html`, [`Layout::Post`] otherwise.
    ///
    /// Called once per generation run; the result applies to every page.
    pub fn detect(site_source: &Path,) -> Self
    {
        if site_source.join("_layouts",).join("issue.html",).is_file() {
            Self::Issue
        } else {
            Self::Post
        }
    }

    /// Layout name as written in front matter.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Self::Issue => "issue",
            Self::Post => "post",
        }
    }
}

/// Front matter of a generated post page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct PageFrontMatter
{
    pub layout:         Layout,
    /// Clean title of the post.
    pub title:          String,
    pub date:           DateTime<Utc,>,
    /// Login of the issue author.
    pub author:         String,
    pub labels:         Vec<IssueLabel,>,
    pub category:       String,
    pub github_url:     String,
    pub github_number:  u64,
    pub comments_count: u64,
    /// Full post record for templates that need more detail.
    pub issue:          Post,
    pub excerpt:        String,
}

/// One generated page: where it goes, how it renders, and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct PageDescriptor
{
    /// Directory relative to the site source, always [`POSTS_DIR`].
    pub dir:          String,
    /// File name, `{slug}.html`.
    pub name:         String,
    pub front_matter: PageFrontMatter,
    /// Raw issue body, rendered later by the site builder.
    pub content:      String,
}

impl PageDescriptor
{
    /// Builds the page for a post.
    pub fn for_post(post: &Post, layout: Layout,) -> Self
    {
        Self {
            dir:          POSTS_DIR.to_owned(),
            name:         format!("{}.html", post.slug),
            front_matter: PageFrontMatter {
                layout,
                title: post.clean_title.clone(),
                date: post.created_at,
                author: post.user.login.clone(),
                labels: post.labels.clone(),
                category: post.category.clone(),
                github_url: post.html_url.clone(),
                github_number: post.number,
                comments_count: post.comments_count,
                issue: post.clone(),
                excerpt: post.excerpt.clone(),
            },
            content:      post.body.clone(),
        }
    }

    /// Path relative to the site source, e.g. `posts/hello.html`.
    pub fn relative_path(&self,) -> String
    {
        format!("{}/{}", self.dir, self.name)
    }
}

/// Aggregate descriptor exposed to listing templates as
/// `site.data.github_issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct IssuesSummary
{
    pub total_count:  usize,
    /// Generation time, RFC 3339 in UTC.
    pub last_updated: String,
    /// `owner/repository`.
    pub repository:   String,
}

/// Everything a generation run contributes to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct SiteData
{
    pub pages:         Vec<PageDescriptor,>,
    /// Posts in listing order, exposed as `site.data.issues`.
    pub issues:        Vec<Post,>,
    pub github_issues: IssuesSummary,
}

/// Builds one page per post plus the aggregate summary.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use issuepress::{Layout, materialize};
///
/// let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0,).unwrap();
/// let data = materialize(Vec::new(), Layout::Post, now, "octocat/blog",);
/// assert!(data.pages.is_empty());
/// assert_eq!(data.github_issues.total_count, 0);
/// assert_eq!(data.github_issues.last_updated, "2025-01-01T12:00:00Z");
/// ```
pub fn materialize(
    posts: Vec<Post,>,
    layout: Layout,
    generated_at: DateTime<Utc,>,
    repository: &str,
) -> SiteData
{
    let pages = posts.iter().map(|post| PageDescriptor::for_post(post, layout,),).collect();

    SiteData {
        pages,
        github_issues: IssuesSummary {
            total_count:  posts.len(),
            last_updated: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true,),
            repository:   repository.to_owned(),
        },
        issues: posts,
    }
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;
    use tempfile::tempdir;

    use super::*;
    use crate::issue::RawIssue;

    fn post(number: u64, title: &str,) -> Post
    {
        let issue: RawIssue = serde_json::from_value(serde_json::json!({
            "number": number,
            "title": title,
            "body": "Hello **world**",
            "created_at": "2025-04-01T08:30:00Z",
            "updated_at": "2025-04-01T08:30:00Z",
            "html_url": format!("https://github.com/o/r/issues/{number}"),
            "user": {"login": "writer", "avatar_url": "", "html_url": ""},
            "labels": [{"name": "enhancement", "color": "a2eeef", "description": "New feature"}],
            "comments": 6
        }),)
        .expect("valid issue",);
        Post::from_issue(&issue,)
    }

    fn fixed_now() -> DateTime<Utc,>
    {
        Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0,).single().expect("valid timestamp",)
    }

    #[test]
    fn layout_prefers_issue_template_when_present()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        assert_eq!(Layout::detect(dir.path()), Layout::Post);

        std::fs::create_dir_all(dir.path().join("_layouts",),).expect("failed to create layouts",);
        std::fs::write(dir.path().join("_layouts/issue.html",), "{{ content }}",)
            .expect("failed to write layout",);
        assert_eq!(Layout::detect(dir.path()), Layout::Issue);
    }

    #[test]
    fn page_descriptor_carries_template_metadata()
    {
        let post = post(12, "[Tutorial] Async in Rust",);
        let page = PageDescriptor::for_post(&post, Layout::Issue,);

        assert_eq!(page.relative_path(), "posts/async-in-rust.html");
        assert_eq!(page.content, "Hello **world**");

        let front = &page.front_matter;
        assert_eq!(front.layout, Layout::Issue);
        assert_eq!(front.title, "Async in Rust");
        assert_eq!(front.author, "writer");
        assert_eq!(front.category, "enhancement");
        assert_eq!(front.github_url, "https://github.com/o/r/issues/12");
        assert_eq!(front.github_number, 12);
        assert_eq!(front.comments_count, 6);
        assert_eq!(front.excerpt, "Hello world");
        assert_eq!(front.issue, post);
    }

    #[test]
    fn materialize_emits_one_page_per_post_and_summary()
    {
        let posts = vec![post(2, "Second",), post(1, "First",)];
        let data = materialize(posts, Layout::Post, fixed_now(), "o/r",);

        assert_eq!(data.pages.len(), 2);
        assert_eq!(data.pages[0].name, "second.html");
        assert_eq!(data.pages[1].name, "first.html");
        assert!(data.pages.iter().all(|page| page.front_matter.layout == Layout::Post));
        assert_eq!(data.issues.len(), 2);
        assert_eq!(
            data.github_issues,
            IssuesSummary {
                total_count:  2,
                last_updated: "2025-04-02T10:00:00Z".to_owned(),
                repository:   "o/r".to_owned(),
            }
        );
    }

    #[test]
    fn layout_serializes_as_template_name()
    {
        assert_eq!(serde_json::to_string(&Layout::Issue).expect("serialize",), "\"issue\"");
        assert_eq!(Layout::Post.as_str(), "post");
    }
}
