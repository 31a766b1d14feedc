use crate::error::{Operation, Result};
use crate::github::pagination::fetch_all_pages;
use crate::github::transport::Transport;
use crate::output;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Write;

/// Listing filters: open issues, newest first.
const OPEN_ISSUE_FILTERS: &[(&str, &str)] = &[
    ("state", "open"),
    ("sort", "created"),
    ("direction", "desc"),
];

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct IssueAuthor {
    pub login: String,
}

/// An open issue as returned by the issues listing.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GitHubIssue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub user: IssueAuthor,
    pub created_at: DateTime<Utc>,
    /// Present when the entry is a pull request; the listing mixes both.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl GitHubIssue {
    pub fn author(&self) -> &str {
        &self.user.login
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Collects every open issue of `repo`, in the order the API returns them.
pub async fn collect_open_issues<T: Transport>(
    transport: &T,
    repo: &str,
    stdout_additional: &mut Option<&mut dyn Write>,
) -> Result<Vec<GitHubIssue>> {
    let path = format!("/repos/{repo}/issues");
    let issues: Vec<GitHubIssue> =
        fetch_all_pages(transport, Operation::ListIssues, &path, OPEN_ISSUE_FILTERS).await?;

    output::println(
        &format!("list issues done, total: {}", issues.len()),
        stdout_additional,
    )?;
    Ok(issues)
}
