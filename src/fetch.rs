// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Issue fetching from the GitHub REST API.
///
/// The fetcher is fail-open: transport errors, non-success statuses and
/// undecodable payloads are logged and turned into an empty listing, so a
/// GitHub outage produces a site without issue pages instead of a failed
/// build. There is no retry and no backoff.
use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use tracing::{debug, error, info, warn};

use crate::{config::GithubSettings, issue::RawIssue};

/// Maximum number of issues requested in the single listing call.
pub const PAGE_SIZE: u8 = 100;

/// Number of body characters echoed into the log for failed responses.
const BODY_SNIPPET_CHARS: usize = 200;

/// Fetches the open issues of the configured repository, newest first.
///
/// The request is anonymous unless [`GithubSettings::token`] is set. At most
/// [`PAGE_SIZE`] entries are returned; pull requests are still part of the
/// listing and are removed by [`transform_issues`](crate::transform_issues).
///
/// This function never fails. Every error is logged and yields an empty
/// vector.
///
/// # Example
///
/// ```no_run
/// use issuepress::{GithubSettings, fetch_issues};
///
/// # async fn example() {
/// let settings = GithubSettings::new("octocat", "blog",);
/// let issues = fetch_issues(&settings,).await;
/// println!("fetched {} issues", issues.len());
/// # }
/// ```
pub async fn fetch_issues(settings: &GithubSettings,) -> Vec<RawIssue,>
{
    info!("Fetching GitHub issues from {}", settings.full_name());

    let client = match build_client(settings,) {
        Ok(client,) => client,
        Err(e,) => {
            error!("Failed to initialize GitHub client for {}: {e}", settings.api_base);
            return Vec::new();
        }
    };

    let route = issues_route(settings,);
    debug!("GET {}{}", settings.api_base, route);

    let response = match client._get(route,).await {
        Ok(response,) => response,
        Err(e,) => {
            error!("Error fetching GitHub issues: {e}");
            error!("This might be due to rate limiting or network issues");
            return Vec::new();
        }
    };

    let status = response.status().as_u16();
    let body = match client.body_to_string(response,).await {
        Ok(body,) => body,
        Err(e,) => {
            error!("Error reading GitHub issues response (HTTP {status}): {e}");
            return Vec::new();
        }
    };

    interpret_response(status, &body,)
}

/// Turns a raw listing response into issues according to the fail-open
/// policy.
///
/// Non-2xx statuses and bodies that are not a JSON array of issues yield an
/// empty vector after logging the status and a short body snippet.
///
/// ```
/// use issuepress::interpret_response;
///
/// assert!(interpret_response(403, r#"{"message":"API rate limit exceeded"}"#,).is_empty());
/// assert!(interpret_response(200, "[]",).is_empty());
/// ```
pub fn interpret_response(status: u16, body: &str,) -> Vec<RawIssue,>
{
    if !(200..300).contains(&status,) {
        warn!("Failed to fetch issues (HTTP {status})");
        warn!("Response: {}", body_snippet(body,));
        return Vec::new();
    }

    match serde_json::from_str::<Vec<RawIssue,>,>(body,) {
        Ok(issues,) => {
            info!("Found {} issues to process", issues.len());
            issues
        }
        Err(e,) => {
            error!("Error decoding GitHub issues: {e}");
            warn!("Response: {}", body_snippet(body,));
            Vec::new()
        }
    }
}

fn build_client(settings: &GithubSettings,) -> octocrab::Result<Octocrab,>
{
    let mut builder = Octocrab::builder()
        .base_uri(settings.api_base.as_str(),)?
        .add_retry_config(RetryConfig::None,);

    if let Some(token,) = settings.token.as_ref() {
        builder = builder.personal_token(token.clone(),);
    }

    builder.build()
}

/// Path and query of the issues listing request.
fn issues_route(settings: &GithubSettings,) -> String
{
    format!(
        "/repos/{}/{}/issues?state=open&sort=created&direction=desc&per_page={PAGE_SIZE}",
        settings.owner, settings.repository
    )
}

fn body_snippet(body: &str,) -> String
{
    body.chars().take(BODY_SNIPPET_CHARS,).collect()
}
