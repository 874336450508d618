//! Storage pools command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GatewayArgs;
use crate::commands::{resolve_domain, session};
use crate::output;

#[derive(Args, Debug)]
pub struct StoragePoolsArgs {
    /// Only pools of this protection domain (name or identifier)
    #[arg(long)]
    pub domain: Option<String>,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(gateway: &GatewayArgs, args: StoragePoolsArgs) -> Result<()> {
    let client = session(gateway).await?;

    let pools = match &args.domain {
        Some(key) => {
            let domain = resolve_domain(&client, key).await?;
            client
                .storage_pools_in_domain(&domain.id)
                .await
                .context("Failed to list storage pools")?
        }
        None => client
            .storage_pools()
            .await
            .context("Failed to list storage pools")?,
    };

    if args.json {
        return output::json_pretty(&pools);
    }

    for pool in &pools {
        let domain = pool.protection_domain_id.as_deref().unwrap_or_default();
        output::row(&pool.id, pool.name.as_deref(), domain);
    }

    Ok(())
}
