//! Command implementations.

pub mod get;
pub mod login;
pub mod protection_domains;
pub mod sdcs;
pub mod storage_pools;
pub mod systems;
pub mod version;
pub mod volumes;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use scaleio::{Client, Error, ProtectionDomain, StoragePool};

use crate::cli::{Commands, GatewayArgs};

/// Options shared by listing commands.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(gateway: GatewayArgs, command: Commands) -> Result<()> {
    match command {
        Commands::Version => version::run(&gateway).await,
        Commands::Login(args) => login::run(&gateway, args).await,
        Commands::Systems(args) => systems::run(&gateway, args).await,
        Commands::ProtectionDomains(args) => protection_domains::run(&gateway, args).await,
        Commands::StoragePools(args) => storage_pools::run(&gateway, args).await,
        Commands::Volumes(cmd) => volumes::handle(&gateway, cmd).await,
        Commands::Sdcs(args) => sdcs::run(&gateway, args).await,
        Commands::Get(args) => get::run(&gateway, args).await,
    }
}

/// Connect and log in with the configured user.
pub async fn session(gateway: &GatewayArgs) -> Result<Client> {
    let username = gateway
        .username
        .as_deref()
        .context("No username: pass --username or set SCALEIO_USERNAME")?;
    let password = gateway.password.as_deref().unwrap_or_default();

    let client = gateway.connect().await?;

    eprintln!("{}", "Logging in...".dimmed());
    client
        .login(username, password)
        .await
        .context("Failed to login")?;

    Ok(client)
}

/// Look up a protection domain by name, then by identifier.
pub async fn resolve_domain(client: &Client, key: &str) -> Result<ProtectionDomain> {
    match client.protection_domain_by_name(key).await {
        Ok(domain) => Ok(domain),
        Err(Error::NotFound { .. }) => client
            .protection_domain(key)
            .await
            .with_context(|| format!("No protection domain named or identified by {key:?}")),
        Err(e) => Err(e).context("Failed to list protection domains"),
    }
}

/// Look up a storage pool by name, then by identifier.
pub async fn resolve_pool(client: &Client, key: &str) -> Result<StoragePool> {
    match client.storage_pool_by_name(key).await {
        Ok(pool) => Ok(pool),
        Err(Error::NotFound { .. }) => client
            .storage_pool(key)
            .await
            .with_context(|| format!("No storage pool named or identified by {key:?}")),
        Err(e) => Err(e).context("Failed to list storage pools"),
    }
}
