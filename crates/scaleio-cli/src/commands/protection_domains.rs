//! Protection domains command implementation.

use anyhow::{Context, Result};

use crate::cli::GatewayArgs;
use crate::commands::{ListArgs, session};
use crate::output;

pub async fn run(gateway: &GatewayArgs, args: ListArgs) -> Result<()> {
    let client = session(gateway).await?;
    let domains = client
        .protection_domains()
        .await
        .context("Failed to list protection domains")?;

    if args.json {
        return output::json_pretty(&domains);
    }

    for domain in &domains {
        let state = domain.protection_domain_state.as_deref().unwrap_or_default();
        output::row(&domain.id, domain.name.as_deref(), state);
    }

    Ok(())
}
