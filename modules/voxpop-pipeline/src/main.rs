use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::Claude;
use reddit_client::RedditClient;
use voxpop_common::Config;
use voxpop_pipeline::Pipeline;

/// Validate an LLM toxicity verdict against community consensus.
#[derive(Parser)]
struct Args {
    /// Read the conversation from a file instead of stdin.
    #[arg(long)]
    file: Option<PathBuf>,
}

/// Default to info for this workspace's crates; RUST_LOG still overrides.
/// Directives use the compiled target names, underscores included.
fn log_filter() -> Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in [
        "voxpop_pipeline=info",
        "voxpop_common=info",
        "reddit_client=info",
        "ai_client=info",
    ] {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()?).init();

    let args = Args::parse();

    let config = Config::from_env();
    config.log_redacted();

    let conversation = match args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    // One shared HTTP session for both external services.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let model = Claude::new(
        &config.anthropic_api_key,
        &config.verdict_model,
        http.clone(),
    );
    let reddit = RedditClient::new(http).with_base_url(&config.reddit_base_url);

    let pipeline = Pipeline::new(
        Arc::new(model),
        Arc::new(reddit),
        config.search_rate_per_sec,
        config.search_burst,
    );

    info!("Voxpop validator starting");
    let report = pipeline.run(&conversation).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
