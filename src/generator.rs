// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// One generation run: fetch, transform, materialize.
///
/// Runs are stateless. Every run rebuilds the complete page set from the
/// current API listing.
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    config::SiteConfig,
    error::Error,
    fetch::fetch_issues,
    issue::RawIssue,
    page::{Layout, SiteData, materialize},
    post::transform_issues,
};

/// Runs the issue pipeline for a site.
///
/// `env` resolves token fallbacks, see [`SiteConfig::github_settings`].
/// Returns `Ok(None)` when the site has no `github` section. Fetch failures
/// do not surface here; they produce a run with zero pages.
///
/// # Errors
///
/// Returns [`Error::Validation`](Error::Validation) when the `github`
/// section is invalid.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use issuepress::{parse_site_config, run_generation};
///
/// # async fn example() -> Result<(), issuepress::Error> {
/// let config = parse_site_config("github:\n  username: octocat\n  repository: blog\n",)?;
/// let data = run_generation(&config, Path::new(".",), |name| std::env::var(name,).ok(),).await?;
/// if let Some(data,) = data {
///     println!("{} posts", data.github_issues.total_count);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_generation<F,>(
    config: &SiteConfig,
    site_source: &Path,
    env: F,
) -> Result<Option<SiteData,>, Error,>
where
    F: Fn(&str,) -> Option<String,>,
{
    let Some(settings,) = config.github_settings(env,)? else {
        info!("No github section configured; skipping issue sync");
        return Ok(None,);
    };

    let issues = fetch_issues(&settings,).await;
    let layout = Layout::detect(site_source,);

    Ok(Some(generate_from_issues(issues, layout, Utc::now(), &settings.full_name(),),),)
}

/// Transforms an already fetched listing and materializes the pages.
pub fn generate_from_issues(
    issues: Vec<RawIssue,>,
    layout: Layout,
    generated_at: DateTime<Utc,>,
    repository: &str,
) -> SiteData
{
    let posts = transform_issues(issues,);
    for post in &posts {
        info!("Creating page for: {}", post.title);
    }

    let data = materialize(posts, layout, generated_at, repository,);
    info!(
        "GitHub issues integration complete: {} pages using the '{}' layout",
        data.pages.len(),
        layout.as_str()
    );
    data
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;

    use super::*;
    use crate::{config::parse_site_config, fetch::interpret_response};

    fn now() -> DateTime<Utc,>
    {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0,).single().expect("valid timestamp",)
    }

    #[test]
    fn forbidden_fetch_produces_empty_site()
    {
        let issues = interpret_response(403, r#"{"message":"Forbidden"}"#,);
        let data = generate_from_issues(issues, Layout::Post, now(), "o/r",);

        assert!(data.pages.is_empty());
        assert!(data.issues.is_empty());
        assert_eq!(data.github_issues.total_count, 0);
        assert_eq!(data.github_issues.repository, "o/r");
    }

    #[test]
    fn pull_requests_never_become_pages()
    {
        let body = r#"[
            {"number": 3, "title": "Issue", "body": null,
             "created_at": "2025-01-03T00:00:00Z", "updated_at": "2025-01-03T00:00:00Z",
             "html_url": "https://github.com/o/r/issues/3",
             "user": {"login": "o", "avatar_url": "", "html_url": ""}, "labels": [], "comments": 0},
            {"number": 2, "title": "PR", "body": null,
             "created_at": "2025-01-02T00:00:00Z", "updated_at": "2025-01-02T00:00:00Z",
             "html_url": "https://github.com/o/r/pull/2",
             "user": {"login": "o", "avatar_url": "", "html_url": ""}, "labels": [], "comments": 0,
             "pull_request": {"url": "https://api.github.com/repos/o/r/pulls/2"}}
        ]"#;
        let data = generate_from_issues(interpret_response(200, body,), Layout::Issue, now(), "o/r",);

        assert_eq!(data.pages.len(), 1);
        assert_eq!(data.pages[0].name, "issue.html");
        assert_eq!(data.github_issues.total_count, 1);
    }

    #[tokio::test]
    async fn site_without_github_section_is_skipped()
    {
        let config = parse_site_config("title: Blog\n",).expect("valid configuration",);
        let data = run_generation(&config, Path::new(".",), |_| None,).await.expect("no error",);
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn invalid_github_section_is_reported()
    {
        let config = parse_site_config("github:\n  username: ''\n  repository: r\n",)
            .expect("valid configuration",);
        let error = run_generation(&config, Path::new(".",), |_| None,).await.unwrap_err();
        assert!(matches!(error, Error::Validation { .. }));
    }
}
