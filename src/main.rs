use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let current_dir = std::env::current_dir()?;
    let settings = starguard::config::Settings::load(&current_dir)?;
    let transport = starguard::github::transport::HttpTransport::new(&settings)?;

    starguard::run::run_and_report(&settings, &transport, None).await?;
    Ok(())
}
