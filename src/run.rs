use crate::config::Settings;
use crate::error::Result;
use crate::github::issues::{self, GitHubIssue};
use crate::github::moderate;
use crate::github::stargazers::{self, StargazerSet};
use crate::github::transport::Transport;
use crate::output;

/// What a completed run saw and did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub stargazers: usize,
    pub open_issues: usize,
    /// Issues closed and locked, in processing order.
    pub moderated: Vec<u64>,
}

/// An issue is actionable when its author has not starred the repository.
pub fn is_actionable(issue: &GitHubIssue, stargazers: &StargazerSet) -> bool {
    !stargazers.contains(issue.author())
}

/// Closes and locks every open issue whose author is not a stargazer.
///
/// Issues are handled in listing order. The first error ends the run; issues
/// already moderated stay that way.
pub async fn run<T: Transport>(
    settings: &Settings,
    transport: &T,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> Result<RunSummary> {
    let repo = settings.repository.as_str();
    tracing::info!(repo, "moderating open issues");

    let stargazers = stargazers::collect_stargazers(transport, repo, &mut stdout_additional).await?;
    let open_issues = issues::collect_open_issues(transport, repo, &mut stdout_additional).await?;

    let mut summary = RunSummary {
        stargazers: stargazers.len(),
        open_issues: open_issues.len(),
        moderated: Vec::new(),
    };

    for issue in open_issues
        .iter()
        .filter(|issue| is_actionable(issue, &stargazers))
    {
        tracing::debug!(
            number = issue.number,
            title = %issue.title,
            pull_request = issue.is_pull_request(),
            "moderating issue"
        );
        output::println(
            &format!(
                "issue: {}, login: {} not in stargazers",
                issue.number,
                issue.author()
            ),
            &mut stdout_additional,
        )?;
        moderate::close_issue(
            transport,
            repo,
            issue.number,
            &settings.labels,
            &mut stdout_additional,
        )
        .await?;
        moderate::lock_issue(transport, repo, issue.number, &mut stdout_additional).await?;
        summary.moderated.push(issue.number);
    }

    output::println("done", &mut stdout_additional)?;
    Ok(summary)
}

/// Runs and, on failure, reports `Error occurred: <error>` on stderr before
/// handing the error back to the caller.
pub async fn run_and_report<T: Transport>(
    settings: &Settings,
    transport: &T,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> Result<RunSummary> {
    let writer = stdout_additional
        .as_mut()
        .map(|w| &mut **w as &mut dyn std::io::Write);
    match run(settings, transport, writer).await {
        Ok(summary) => Ok(summary),
        Err(err) => {
            if let Err(e) =
                output::eprintln(&format!("Error occurred: {err}"), &mut stdout_additional)
            {
                tracing::warn!(error = %e, "failed to report run error");
            }
            Err(err)
        }
    }
}
