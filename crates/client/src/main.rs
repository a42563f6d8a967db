//! Diagnostic probe: restore the persisted session, run the route guard for
//! a path and print where navigation lands.
//!
//! ```text
//! hrdesk-probe [PATH]        # default PATH is /
//! ```

use anyhow::Context;
use hrdesk_client::{AppContext, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hrdesk_observability::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let config = ClientConfig::from_env();
    tracing::info!(api = %config.api_base_url, path = %path, "probing route");

    let ctx = AppContext::open(config).await?;
    let arrival = ctx
        .navigate(&path)
        .await
        .with_context(|| format!("navigation for {path} did not settle"))?;

    tracing::info!(
        arrived = %arrival.path,
        redirects = arrival.redirects.len(),
        authenticated = arrival.context.is_authenticated,
        "probe finished"
    );
    println!("{}", serde_json::to_string_pretty(&arrival)?);
    Ok(())
}
