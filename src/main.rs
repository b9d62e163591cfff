use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};

use rule_refiner::engine::retry::RetryPolicy;
use rule_refiner::{logging, settings_io, ChatConfig, OpenAiClient, RuleChat, ThreadSleeper};

fn main() -> Result<()> {
    logging::init(Level::DEBUG);

    let settings = settings_io::load_settings();

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read holes from stdin")?;
    let holes: HashMap<String, String> =
        serde_json::from_str(&raw).context("holes must be a JSON object of strings")?;

    let config = ChatConfig::new(holes, settings.temperature, settings.model)?;
    let cwd = std::env::current_dir().context("failed to resolve the working directory")?;
    let examples_dir = settings.examples_dir_from(&cwd);

    let client = OpenAiClient::new(
        settings.api_base.clone(),
        settings.api_key(),
        settings.request_timeout(),
    )?;

    let mut chat = RuleChat::with_retry(
        config,
        Box::new(client.clone()),
        &examples_dir,
        RetryPolicy::with_delay(settings.retry_delay()),
        Box::new(ThreadSleeper),
    )
    .with_context(|| {
        format!(
            "failed to start a session with examples from {} (set examples_dir in {})",
            examples_dir.display(),
            settings_io::settings_path().display()
        )
    })?;

    match client.test_connection() {
        Ok(status) => info!("{status}"),
        Err(err) => warn!("Connection check failed: {err}"),
    }

    let response = chat.get_response()?;
    println!("{response}");

    Ok(())
}
