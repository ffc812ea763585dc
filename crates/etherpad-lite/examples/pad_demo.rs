//! Walk through the pad lifecycle against a running Etherpad instance.
//!
//! ```sh
//! cargo run --example pad_demo -- etherpad.toml
//! ```
//!
//! Without a config path, `ETHERPAD_URL` and `ETHERPAD_API_KEY` are used.

use anyhow::{Context, Result};
use etherpad_lite::{ClientConfig, EtherpadClient};
use tracing::info;

fn load_config() -> Result<ClientConfig> {
    if let Some(path) = std::env::args().nth(1) {
        return ClientConfig::load(&path).with_context(|| format!("loading {}", path));
    }

    let base_url = std::env::var("ETHERPAD_URL")
        .unwrap_or_else(|_| "http://localhost:9001/api/1.2.12".to_string());
    let api_key = std::env::var("ETHERPAD_API_KEY").context("ETHERPAD_API_KEY is not set")?;
    Ok(ClientConfig::new(base_url, api_key))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,etherpad_lite=debug")),
        )
        .init();

    let client = EtherpadClient::with_config(load_config()?)?;
    client.check_token().await.context("API key rejected")?;

    let group = client.create_group(Some("pad-demo")).await?;
    let mut pad = client
        .create_group_pad(&group, "scratch", Some("Hello from Rust"))
        .await?;
    info!(pad = pad.id(), "Created pad");

    pad.set_text("Edited text").await?;
    let revisions = pad.revisions_count().await?;
    let text = pad.text().await?;
    info!(revisions, "Text is now {:?}", text);

    let destination = format!("{}$renamed", group);
    pad.move_to(&destination, true).await?;
    info!(pad = pad.id(), "Moved pad");

    let pads = client.list_pads(None, Some(&group)).await?;
    info!("Group {} holds {} pad(s)", group, pads.len());

    pad.delete().await?;
    client.delete_group(&group).await?;
    Ok(())
}
