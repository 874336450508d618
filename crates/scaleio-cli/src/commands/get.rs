//! Raw GET command implementation.

use anyhow::{Context, Result};
use clap::Args;
use scaleio::Method;

use crate::cli::GatewayArgs;
use crate::commands::session;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Path relative to the endpoint, or absolute from the host (e.g. /api/types/System/instances)
    pub path: String,
}

pub async fn run(gateway: &GatewayArgs, args: GetArgs) -> Result<()> {
    let client = session(gateway).await?;
    let body = client
        .execute_json(Method::GET, &args.path, None)
        .await
        .with_context(|| format!("Failed to GET {}", args.path))?;

    match body {
        Some(value) => output::json_pretty(&value),
        None => {
            output::success("Empty response");
            Ok(())
        }
    }
}
