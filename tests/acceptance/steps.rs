use crate::StarguardWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use serde::Serialize;
use starguard::config::Settings;
use starguard::github::transport::{HttpResponse, Transport, TransportError};
use std::collections::HashMap;
use std::sync::Mutex;

const REPO: &str = "owner/repo";

#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: &'static str,
    pub path: String,
    pub page: Option<u32>,
}

/// In-memory stand-in for the GitHub API, scripted from the scenario.
struct ScriptedApi {
    stargazer_pages: Vec<Vec<String>>,
    open_issues: Vec<(u64, String)>,
    failing_closes: HashMap<u64, u16>,
    failing_locks: HashMap<u64, u16>,
    sent: Mutex<Vec<SentRequest>>,
}

impl ScriptedApi {
    fn from_world(world: &StarguardWorld) -> Self {
        ScriptedApi {
            stargazer_pages: world.stargazer_pages.clone(),
            open_issues: world.open_issues.clone(),
            failing_closes: world.failing_closes.clone(),
            failing_locks: world.failing_locks.clone(),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, method: &'static str, path: &str, page: Option<u32>) {
        self.sent.lock().unwrap().push(SentRequest {
            method,
            path: path.to_string(),
            page,
        });
    }

    fn stargazers(&self, page: usize) -> HttpResponse {
        let logins = self
            .stargazer_pages
            .get(page - 1)
            .cloned()
            .unwrap_or_default();
        let body: Vec<_> = logins
            .iter()
            .map(|login| serde_json::json!({ "login": login }))
            .collect();
        HttpResponse::new(200, serde_json::Value::Array(body).to_string())
    }

    fn issues(&self, page: usize) -> HttpResponse {
        let body: Vec<_> = self
            .open_issues
            .chunks(100)
            .nth(page - 1)
            .unwrap_or_default()
            .iter()
            .map(|(number, author)| {
                serde_json::json!({
                    "number": number,
                    "title": format!("Issue {number}"),
                    "user": { "login": author },
                    "created_at": "2024-01-01T00:00:00Z",
                })
            })
            .collect();
        HttpResponse::new(200, serde_json::Value::Array(body).to_string())
    }
}

impl Transport for ScriptedApi {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, TransportError> {
        let page: u32 = query
            .iter()
            .find(|(key, _)| *key == "page")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(1);
        self.record("GET", path, Some(page));
        if path == format!("/repos/{REPO}/stargazers") {
            Ok(self.stargazers(page as usize))
        } else if path == format!("/repos/{REPO}/issues") {
            Ok(self.issues(page as usize))
        } else {
            Ok(HttpResponse::new(404, "Not Found"))
        }
    }

    async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        _body: &B,
    ) -> Result<HttpResponse, TransportError> {
        self.record("PATCH", path, None);
        let number: Option<u64> = path.rsplit('/').next().and_then(|n| n.parse().ok());
        match number.and_then(|n| self.failing_closes.get(&n)) {
            Some(status) => Ok(HttpResponse::new(*status, "Forbidden")),
            None => Ok(HttpResponse::new(200, "{}")),
        }
    }

    async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        _body: &B,
    ) -> Result<HttpResponse, TransportError> {
        self.record("PUT", path, None);
        let number: Option<u64> = path
            .strip_suffix("/lock")
            .and_then(|issue| issue.rsplit('/').next())
            .and_then(|n| n.parse().ok());
        match number.and_then(|n| self.failing_locks.get(&n)) {
            Some(status) => Ok(HttpResponse::new(*status, "Forbidden")),
            None => Ok(HttpResponse::new(204, "")),
        }
    }
}

fn settings() -> Settings {
    Settings {
        repository: REPO.to_string(),
        labels: vec!["no respect".to_string()],
        api_base_url: "https://api.github.com".to_string(),
        token: Some("test-token".to_string()),
    }
}

fn output_of(world: &StarguardWorld) -> String {
    String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8")
}

fn issue_requests(world: &StarguardWorld, number: u64) -> Vec<&'static str> {
    let close_path = format!("/repos/{REPO}/issues/{number}");
    let lock_path = format!("{close_path}/lock");
    world
        .requests
        .iter()
        .filter(|r| r.path == close_path || r.path == lock_path)
        .map(|r| r.method)
        .collect()
}

#[given(regex = r#"^the stargazers are "(.*)"$"#)]
async fn given_stargazers(world: &mut StarguardWorld, logins: String) {
    let page: Vec<String> = logins
        .split(',')
        .map(|login| login.trim().to_string())
        .filter(|login| !login.is_empty())
        .collect();
    world.stargazer_pages = vec![page];
}

#[given("there are no stargazers")]
async fn given_no_stargazers(world: &mut StarguardWorld) {
    world.stargazer_pages.clear();
}

#[given(regex = r"^the stargazer listing has pages of (.*) accounts$")]
async fn given_stargazer_pages(world: &mut StarguardWorld, sizes: String) {
    world.stargazer_pages = sizes
        .replace(" and ", ", ")
        .split(',')
        .map(|size| size.trim().parse::<usize>().expect("page size"))
        .enumerate()
        .map(|(page, size)| (0..size).map(|i| format!("user-{page}-{i}")).collect())
        .collect();
}

#[given("the open issues are:")]
async fn given_open_issues(world: &mut StarguardWorld, step: &Step) {
    let table = step.table.as_ref().expect("issue table");
    world.open_issues = table
        .rows
        .iter()
        .skip(1)
        .map(|row| {
            (
                row[0].trim().parse().expect("issue number"),
                row[1].trim().to_string(),
            )
        })
        .collect();
}

#[given("there are no open issues")]
async fn given_no_open_issues(world: &mut StarguardWorld) {
    world.open_issues.clear();
}

#[given(regex = r"^closing issue (\d+) fails with HTTP (\d+)$")]
async fn given_close_fails(world: &mut StarguardWorld, number: u64, status: u16) {
    world.failing_closes.insert(number, status);
}

#[given(regex = r"^locking issue (\d+) fails with HTTP (\d+)$")]
async fn given_lock_fails(world: &mut StarguardWorld, number: u64, status: u16) {
    world.failing_locks.insert(number, status);
}

#[when("the moderation run executes")]
async fn when_run_executes(world: &mut StarguardWorld) {
    let api = ScriptedApi::from_world(world);
    let mut buffer: Vec<u8> = Vec::new();
    let writer_option: Option<&mut dyn std::io::Write> = Some(&mut buffer);

    let result = starguard::run::run_and_report(&settings(), &api, writer_option).await;

    world.captured_output = buffer;
    world.requests = api.sent.into_inner().unwrap();
    world.run_result = Some(result);
}

#[then("the run should succeed")]
async fn then_run_succeeds(world: &mut StarguardWorld) {
    match &world.run_result {
        Some(Ok(_)) => (),
        other => panic!("Expected a successful run, got {other:?}"),
    }
}

#[then(regex = r"^the run should fail with HTTP (\d+)$")]
async fn then_run_fails_with(world: &mut StarguardWorld, status: u16) {
    match &world.run_result {
        Some(Err(err)) => assert_eq!(err.status(), Some(status), "Unexpected error: {err}"),
        other => panic!("Expected a failed run, got {other:?}"),
    }
}

#[then(regex = r"^issue (\d+) should be closed and then locked$")]
async fn then_issue_closed_and_locked(world: &mut StarguardWorld, number: u64) {
    assert_eq!(issue_requests(world, number), vec!["PATCH", "PUT"]);
}

#[then(regex = r"^issue (\d+) should not be touched$")]
async fn then_issue_untouched(world: &mut StarguardWorld, number: u64) {
    assert!(
        issue_requests(world, number).is_empty(),
        "Issue {number} received requests: {:?}",
        world.requests
    );
}

#[then(regex = r"^issue (\d+) should be closed but not locked$")]
async fn then_issue_closed_not_locked(world: &mut StarguardWorld, number: u64) {
    assert_eq!(issue_requests(world, number), vec!["PATCH", "PUT"]);
    let output = output_of(world);
    assert!(output.lines().any(|line| line == format!("issue: {number} closed")));
    assert!(!output.lines().any(|line| line == format!("issue: {number} locked")));
}

#[then(regex = r"^no lock request should have been sent for issue (\d+)$")]
async fn then_no_lock(world: &mut StarguardWorld, number: u64) {
    assert!(!issue_requests(world, number).contains(&"PUT"));
}

#[then(regex = r"^(\d+) stargazer page requests should have been sent$")]
async fn then_stargazer_requests(world: &mut StarguardWorld, count: usize) {
    let pages: Vec<Option<u32>> = world
        .requests
        .iter()
        .filter(|r| r.path == format!("/repos/{REPO}/stargazers"))
        .map(|r| r.page)
        .collect();
    let expected: Vec<Option<u32>> = (1..=count as u32).map(Some).collect();
    assert_eq!(pages, expected);
}

#[then(regex = r"^exactly (\d+) mismatch lines? should be logged$")]
async fn then_mismatch_lines(world: &mut StarguardWorld, count: usize) {
    let re = regex::Regex::new(r"^issue: \d+, login: \S+ not in stargazers$").unwrap();
    let output = output_of(world);
    let matches = output.lines().filter(|line| re.is_match(line)).count();
    assert_eq!(matches, count, "Output was:\n{output}");
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_contains(world: &mut StarguardWorld, expected: String) {
    let output = output_of(world);
    assert!(
        output.lines().any(|line| line == expected),
        "Expected line '{expected}' not found in output:\n{output}"
    );
}

#[then(regex = r#"^the output should not contain "(.*)"$"#)]
async fn then_output_lacks(world: &mut StarguardWorld, unexpected: String) {
    let output = output_of(world);
    assert!(
        !output.lines().any(|line| line == unexpected),
        "Line '{unexpected}' unexpectedly found in output:\n{output}"
    );
}

#[then(regex = r#"^the last output line should be "(.*)"$"#)]
async fn then_last_line(world: &mut StarguardWorld, expected: String) {
    let output = output_of(world);
    assert_eq!(output.lines().last(), Some(expected.as_str()));
}
