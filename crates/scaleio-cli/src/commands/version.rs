//! Version command implementation.

use anyhow::Result;

use crate::cli::GatewayArgs;
use crate::output;

pub async fn run(gateway: &GatewayArgs) -> Result<()> {
    output::field("sio", env!("SIO_VERSION"));

    if !gateway.has_endpoint() {
        return Ok(());
    }

    let client = gateway.connect().await?;
    let config = client.config();
    output::field("Endpoint", config.endpoint.as_str());
    match client.version() {
        Some(version) => output::field("API version", &version.to_string()),
        None => output::field("API version", "unknown"),
    }

    Ok(())
}
