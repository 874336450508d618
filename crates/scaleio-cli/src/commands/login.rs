//! Login command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GatewayArgs;
use crate::commands::session;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Print the session token (for use with other tools)
    #[arg(long)]
    pub show_token: bool,
}

pub async fn run(gateway: &GatewayArgs, args: LoginArgs) -> Result<()> {
    let client = session(gateway).await?;
    let credentials = client.credentials();

    output::success("Logged in successfully");
    println!();
    output::field("Endpoint", client.endpoint().as_str());
    output::field("User", credentials.username());
    if let Some(version) = client.version() {
        output::field("API version", &version.to_string());
    }
    if args.show_token {
        if let Some(token) = credentials.token() {
            output::field("Token", token.as_str());
        }
    }

    Ok(())
}
