use cucumber::World;
use std::collections::HashMap;

#[derive(Debug, Default, World)]
pub struct StarguardWorld {
    pub stargazer_pages: Vec<Vec<String>>,
    pub open_issues: Vec<(u64, String)>,
    pub failing_closes: HashMap<u64, u16>,
    pub failing_locks: HashMap<u64, u16>,
    pub requests: Vec<steps::SentRequest>,
    pub captured_output: Vec<u8>,
    pub run_result: Option<Result<starguard::run::RunSummary, starguard::error::Error>>,
}

#[tokio::main]
async fn main() {
    StarguardWorld::run("features").await;
}

mod steps;
