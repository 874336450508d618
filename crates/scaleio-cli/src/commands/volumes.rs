//! Volume command implementations.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use scaleio::{RemoveMode, Volume, VolumeParam};

use crate::cli::GatewayArgs;
use crate::commands::{resolve_pool, session};
use crate::output;

#[derive(Subcommand, Debug)]
pub enum VolumesCommand {
    /// List volumes
    List(ListVolumesArgs),

    /// Show one volume
    Get(GetVolumeArgs),

    /// Create a volume in a storage pool
    Create(CreateVolumeArgs),

    /// Remove a volume
    Remove(RemoveVolumeArgs),
}

#[derive(Args, Debug)]
pub struct ListVolumesArgs {
    /// Only volumes of this storage pool (name or identifier)
    #[arg(long)]
    pub pool: Option<String>,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct GetVolumeArgs {
    /// Volume identifier, or name with --by-name
    pub volume: String,

    /// Treat the argument as a volume name
    #[arg(long)]
    pub by_name: bool,
}

#[derive(Args, Debug)]
pub struct CreateVolumeArgs {
    /// Name of the new volume
    #[arg(long)]
    pub name: String,

    /// Size in KiB; the gateway rounds up to its allocation unit
    #[arg(long)]
    pub size_kb: u64,

    /// Storage pool (name or identifier)
    #[arg(long)]
    pub pool: String,

    /// Allocate space on write instead of up front
    #[arg(long)]
    pub thin: bool,
}

#[derive(Args, Debug)]
pub struct RemoveVolumeArgs {
    /// Volume identifier
    pub id: String,

    /// Which part of the volume tree to remove
    #[arg(long, value_enum, default_value_t = RemoveModeArg::OnlyMe)]
    pub mode: RemoveModeArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RemoveModeArg {
    OnlyMe,
    IncludeDescendants,
    DescendantsOnly,
    WholeVtree,
}

impl From<RemoveModeArg> for RemoveMode {
    fn from(mode: RemoveModeArg) -> Self {
        match mode {
            RemoveModeArg::OnlyMe => RemoveMode::OnlyMe,
            RemoveModeArg::IncludeDescendants => RemoveMode::IncludeDescendants,
            RemoveModeArg::DescendantsOnly => RemoveMode::DescendantsOnly,
            RemoveModeArg::WholeVtree => RemoveMode::WholeVtree,
        }
    }
}

pub async fn handle(gateway: &GatewayArgs, cmd: VolumesCommand) -> Result<()> {
    match cmd {
        VolumesCommand::List(args) => list(gateway, args).await,
        VolumesCommand::Get(args) => get(gateway, args).await,
        VolumesCommand::Create(args) => create(gateway, args).await,
        VolumesCommand::Remove(args) => remove(gateway, args).await,
    }
}

async fn list(gateway: &GatewayArgs, args: ListVolumesArgs) -> Result<()> {
    let client = session(gateway).await?;

    let volumes = match &args.pool {
        Some(key) => {
            let pool = resolve_pool(&client, key).await?;
            client
                .storage_pool_volumes(&pool.id)
                .await
                .context("Failed to list volumes")?
        }
        None => client.volumes().await.context("Failed to list volumes")?,
    };

    if args.json {
        return output::json_pretty(&volumes);
    }

    for volume in &volumes {
        output::row(&volume.id, volume.name.as_deref(), &summary(volume));
    }

    Ok(())
}

async fn get(gateway: &GatewayArgs, args: GetVolumeArgs) -> Result<()> {
    let client = session(gateway).await?;

    let id = if args.by_name {
        client
            .volume_id_by_name(&args.volume)
            .await
            .with_context(|| format!("No volume named {:?}", args.volume))?
    } else {
        args.volume
    };

    let volume = client
        .volume(&id)
        .await
        .with_context(|| format!("Failed to fetch volume {id}"))?;
    output::json_pretty(&volume)
}

async fn create(gateway: &GatewayArgs, args: CreateVolumeArgs) -> Result<()> {
    if args.size_kb == 0 {
        bail!("--size-kb must be greater than zero");
    }

    let client = session(gateway).await?;
    let pool = resolve_pool(&client, &args.pool).await?;

    let volume_type = if args.thin {
        "ThinProvisioned"
    } else {
        "ThickProvisioned"
    };
    let param = VolumeParam {
        name: args.name.clone(),
        volume_size_in_kb: args.size_kb.to_string(),
        storage_pool_id: pool.id.clone(),
        volume_type: Some(volume_type.to_string()),
        ..VolumeParam::default()
    };

    let id = client
        .create_volume(&param)
        .await
        .context("Failed to create volume")?;

    output::success(&format!("Created volume {}", args.name));
    output::field("ID", &id);
    output::field("Pool", &pool.id);

    Ok(())
}

async fn remove(gateway: &GatewayArgs, args: RemoveVolumeArgs) -> Result<()> {
    let client = session(gateway).await?;

    client
        .remove_volume(&args.id, args.mode.into())
        .await
        .with_context(|| format!("Failed to remove volume {}", args.id))?;

    output::success(&format!("Removed volume {}", args.id));
    Ok(())
}

fn summary(volume: &Volume) -> String {
    let mut summary = format!("{} KiB", volume.size_in_kb);
    if volume.is_snapshot() {
        summary.push_str(" snapshot");
    }
    let mapped = volume.mapped_sdcs().len();
    if mapped > 0 {
        summary.push_str(&format!(" mapped:{mapped}"));
    }
    summary
}
