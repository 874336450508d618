//! Systems command implementation.

use anyhow::{Context, Result};

use crate::cli::GatewayArgs;
use crate::commands::{ListArgs, session};
use crate::output;

pub async fn run(gateway: &GatewayArgs, args: ListArgs) -> Result<()> {
    let client = session(gateway).await?;
    let systems = client.systems().await.context("Failed to list systems")?;

    if args.json {
        return output::json_pretty(&systems);
    }

    for system in &systems {
        let version = system.system_version_name.as_deref().unwrap_or_default();
        output::row(&system.id, system.name.as_deref(), version);
    }

    Ok(())
}
