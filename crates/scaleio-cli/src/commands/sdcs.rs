//! SDCs command implementation.

use anyhow::{Context, Result};

use crate::cli::GatewayArgs;
use crate::commands::{ListArgs, session};
use crate::output;

pub async fn run(gateway: &GatewayArgs, args: ListArgs) -> Result<()> {
    let client = session(gateway).await?;
    let sdcs = client.sdcs().await.context("Failed to list SDCs")?;

    if args.json {
        return output::json_pretty(&sdcs);
    }

    for sdc in &sdcs {
        let ip = sdc.sdc_ip.as_deref().unwrap_or_default();
        output::row(&sdc.id, sdc.name.as_deref(), ip);
    }

    Ok(())
}
