use crate::error::{Error, Operation, Result, expect_status};
use crate::github::transport::Transport;
use crate::output;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Closed,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StateReason {
    NotPlanned,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    Spam,
}

/// Body of the issue update that closes an issue.
#[derive(Serialize, Debug, PartialEq)]
pub struct CloseIssueRequest<'a> {
    pub state: IssueState,
    pub state_reason: StateReason,
    pub labels: &'a [String],
}

#[derive(Serialize, Debug, PartialEq)]
pub struct LockIssueRequest {
    pub lock_reason: LockReason,
}

/// Closes issue `number` as not planned and tags it with `labels`.
///
/// Succeeds only on HTTP 200.
pub async fn close_issue<T: Transport>(
    transport: &T,
    repo: &str,
    number: u64,
    labels: &[String],
    stdout_additional: &mut Option<&mut dyn Write>,
) -> Result<()> {
    let operation = Operation::CloseIssue;
    let body = CloseIssueRequest {
        state: IssueState::Closed,
        state_reason: StateReason::NotPlanned,
        labels,
    };
    let response = transport
        .patch(&format!("/repos/{repo}/issues/{number}"), &body)
        .await
        .map_err(|e| Error::Transport {
            operation,
            message: e.to_string(),
        })?;
    expect_status(operation, 200, response.status, &response.body)?;

    output::println(&format!("issue: {number} closed"), stdout_additional)?;
    Ok(())
}

/// Locks issue `number` as spam.
///
/// Succeeds only on HTTP 204.
pub async fn lock_issue<T: Transport>(
    transport: &T,
    repo: &str,
    number: u64,
    stdout_additional: &mut Option<&mut dyn Write>,
) -> Result<()> {
    let operation = Operation::LockIssue;
    let body = LockIssueRequest {
        lock_reason: LockReason::Spam,
    };
    let response = transport
        .put(&format!("/repos/{repo}/issues/{number}/lock"), &body)
        .await
        .map_err(|e| Error::Transport {
            operation,
            message: e.to_string(),
        })?;
    expect_status(operation, 204, response.status, &response.body)?;

    output::println(&format!("issue: {number} locked"), stdout_additional)?;
    Ok(())
}
