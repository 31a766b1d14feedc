use crate::error::{Operation, Result};
use crate::github::pagination::fetch_all_pages;
use crate::github::transport::Transport;
use crate::output;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Write;

/// One entry of the `/stargazers` listing. Only the login matters here.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Stargazer {
    pub login: String,
}

/// Logins of every account that has starred the repository.
pub type StargazerSet = HashSet<String>;

/// Collects the logins of all stargazers of `repo` (`owner/name`).
pub async fn collect_stargazers<T: Transport>(
    transport: &T,
    repo: &str,
    stdout_additional: &mut Option<&mut dyn Write>,
) -> Result<StargazerSet> {
    let path = format!("/repos/{repo}/stargazers");
    let stargazers: Vec<Stargazer> =
        fetch_all_pages(transport, Operation::ListStargazers, &path, &[]).await?;

    let set: StargazerSet = stargazers.into_iter().map(|s| s.login).collect();
    output::println(
        &format!("list stargazers done, total: {}", set.len()),
        stdout_additional,
    )?;
    Ok(set)
}
