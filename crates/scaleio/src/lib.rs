//! scaleio - ScaleIO storage-cluster gateway client
//!
//! This library talks to the REST gateway of a ScaleIO storage cluster. All
//! requests flow through one [`Client`], which holds the session token and
//! renews it transparently: a request answered with 401 triggers a single
//! re-login and is replayed exactly once with identical body bytes.
//!
//! # Example
//!
//! ```no_run
//! use scaleio::{Client, ClientConfig, GatewayUrl, RemoveMode, VolumeParam};
//!
//! # async fn example() -> Result<(), scaleio::Error> {
//! let endpoint = GatewayUrl::new("https://gw.example.com/api")?;
//! let client = Client::connect(ClientConfig::new(endpoint)).await?;
//! client.login("admin", "Password123").await?;
//!
//! let pool = client.storage_pool_by_name("default").await?;
//! let id = client
//!     .create_volume(&VolumeParam {
//!         name: "vol1".to_string(),
//!         volume_size_in_kb: "8388608".to_string(),
//!         storage_pool_id: pool.id.clone(),
//!         ..VolumeParam::default()
//!     })
//!     .await?;
//! client.remove_volume(&id, RemoveMode::OnlyMe).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod types;

mod client;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, SessionToken};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ApiError, AuthError, DecodeError, Error, InvalidInputError, TransportError};
pub use http::ReplayableBody;
pub use resources::{
    Device, DeviceParam, DeviceTestMode, FaultSet, MapVolumeSdcParam, ProtectionDomain,
    RemoveMode, Resource, ScsiInitiator, Sdc, Sds, SdsIpRole, SdsParam, Statistics, StoragePool,
    System, UnmapVolumeSdcParam, User, Volume, VolumeParam,
};
pub use types::{ApiVersion, GatewayUrl, Link, find_link};

/// Re-exported so callers can name request methods without a direct
/// dependency on the HTTP stack.
pub use reqwest::Method;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
