//! CLI argument definitions.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scaleio::config::{ENV_CA_CERT, ENV_ENDPOINT, ENV_INSECURE, ENV_VERSION};
use scaleio::{Client, ClientConfig};
use tracing::debug;

use crate::commands::ListArgs;
use crate::commands::get::GetArgs;
use crate::commands::login::LoginArgs;
use crate::commands::storage_pools::StoragePoolsArgs;
use crate::commands::volumes::VolumesCommand;

/// ScaleIO gateway CLI for cluster inspection.
#[derive(Parser, Debug)]
#[command(name = "sio")]
#[command(author, version = env!("SIO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub gateway: GatewayArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings shared by every command.
///
/// Values left off the command line fall back to the `SCALEIO_*`
/// environment variables.
#[derive(Args, Debug, Default)]
pub struct GatewayArgs {
    /// Gateway endpoint, e.g. https://gw.example.com/api [env: SCALEIO_ENDPOINT]
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Gateway user
    #[arg(long, env = "SCALEIO_USERNAME", global = true)]
    pub username: Option<String>,

    /// Gateway password
    #[arg(long, env = "SCALEIO_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification [env: SCALEIO_INSECURE=true]
    #[arg(long, global = true)]
    pub insecure: bool,

    /// PEM bundle of CA certificates to trust [env: SCALEIO_CA_CERT]
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// API version to use instead of asking the gateway [env: SCALEIO_VERSION]
    #[arg(long, global = true)]
    pub api_version: Option<String>,
}

impl GatewayArgs {
    /// Whether an endpoint was given on the command line or in the environment.
    pub fn has_endpoint(&self) -> bool {
        self.endpoint.is_some() || std::env::var(ENV_ENDPOINT).is_ok_and(|v| !v.is_empty())
    }

    /// Build the client settings, command-line values first.
    pub fn config(&self) -> Result<ClientConfig> {
        let mut overrides: HashMap<&str, String> = HashMap::new();
        if let Some(endpoint) = &self.endpoint {
            overrides.insert(ENV_ENDPOINT, endpoint.clone());
        }
        if let Some(version) = &self.api_version {
            overrides.insert(ENV_VERSION, version.clone());
        }
        if let Some(ca_cert) = &self.ca_cert {
            overrides.insert(ENV_CA_CERT, ca_cert.display().to_string());
        }
        if self.insecure {
            overrides.insert(ENV_INSECURE, "true".to_string());
        }

        ClientConfig::from_lookup(|key| {
            overrides
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        })
        .context("Invalid gateway settings")
    }

    /// Connect to the gateway without logging in.
    pub async fn connect(&self) -> Result<Client> {
        let config = self.config()?;
        debug!(endpoint = %config.endpoint, "Connecting to gateway");
        Client::connect(config)
            .await
            .context("Failed to reach gateway")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the CLI version and, when an endpoint is set, the gateway API version
    Version,

    /// Log in and print session details
    Login(LoginArgs),

    /// List systems
    Systems(ListArgs),

    /// List protection domains
    ProtectionDomains(ListArgs),

    /// List storage pools
    StoragePools(StoragePoolsArgs),

    /// Volume operations
    #[command(subcommand)]
    Volumes(VolumesCommand),

    /// List SDCs
    Sdcs(ListArgs),

    /// GET a gateway path and print the raw JSON
    Get(GetArgs),
}
