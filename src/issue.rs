// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Wire model of the GitHub issues listing.
///
/// Only the fields consumed by the transformer are decoded; everything else
/// in the API payload is ignored.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue record as returned by `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Deserialize, Serialize,)]
pub struct RawIssue
{
    pub number:       u64,
    pub title:        String,
    #[serde(default)]
    pub body:         Option<String,>,
    pub created_at:   DateTime<Utc,>,
    pub updated_at:   DateTime<Utc,>,
    pub html_url:     String,
    #[serde(rename = "user")]
    pub author:       IssueAuthor,
    #[serde(default)]
    pub labels:       Vec<IssueLabel,>,
    #[serde(default)]
    pub comments:     u64,
    /// Present (and non-null) only when the entry is a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value,>,
}

impl RawIssue
{
    /// Returns `true` when the listing entry is a pull request rather than an
    /// issue. The issues endpoint returns both.
    pub fn is_pull_request(&self,) -> bool
    {
        self.pull_request.as_ref().is_some_and(|marker| !marker.is_null(),)
    }
}

/// Account that opened the issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
pub struct IssueAuthor
{
    pub login:      String,
    pub avatar_url: String,
    pub html_url:   String,
}

/// Label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
pub struct IssueLabel
{
    pub name:        String,
    #[serde(default)]
    pub color:       String,
    #[serde(default)]
    pub description: Option<String,>,
}

#[cfg(test)]
mod tests
{
    use super::*;

    const ISSUE_JSON: &str = r#"{
        "number": 7,
        "title": "[Pytanie] Jak zacząć?",
        "body": null,
        "created_at": "2025-03-01T10:00:00Z",
        "updated_at": "2025-03-02T11:30:00Z",
        "html_url": "https://github.com/octocat/blog/issues/7",
        "state": "open",
        "user": {
            "login": "octocat",
            "id": 1,
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "html_url": "https://github.com/octocat"
        },
        "labels": [
            {"id": 3, "name": "Pytanie", "color": "d876e3", "description": null}
        ],
        "comments": 4
    }"#;

    #[test]
    fn decodes_issue_payload_ignoring_unknown_fields()
    {
        let issue: RawIssue = serde_json::from_str(ISSUE_JSON,).expect("valid issue",);

        assert_eq!(issue.number, 7);
        assert!(issue.body.is_none());
        assert_eq!(issue.author.login, "octocat");
        assert_eq!(issue.labels.len(), 1);
        assert_eq!(issue.labels[0].name, "Pytanie");
        assert_eq!(issue.comments, 4);
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn pull_request_marker_is_detected()
    {
        let mut value: serde_json::Value = serde_json::from_str(ISSUE_JSON,).expect("valid json",);
        value["pull_request"] = serde_json::json!({
            "url": "https://api.github.com/repos/octocat/blog/pulls/7"
        });

        let issue: RawIssue = serde_json::from_value(value,).expect("valid issue",);
        assert!(issue.is_pull_request());
    }

    #[test]
    fn null_pull_request_marker_is_not_a_pull_request()
    {
        let mut value: serde_json::Value = serde_json::from_str(ISSUE_JSON,).expect("valid json",);
        value["pull_request"] = serde_json::Value::Null;

        let issue: RawIssue = serde_json::from_value(value,).expect("valid issue",);
        assert!(!issue.is_pull_request());
    }
}
