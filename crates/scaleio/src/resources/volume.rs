//! Volumes and their SDC mappings.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::Client;
use crate::error::Error;
use crate::http::ReplayableBody;
use crate::types::Link;

use super::{Resource, StoragePool, action_path, relationship_path};

/// A volume (or snapshot) carved out of a storage pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size_in_kb: u64,
    #[serde(default)]
    pub storage_pool_id: Option<String>,
    #[serde(default)]
    pub vtree_id: Option<String>,
    /// Set on snapshots: the volume this one was taken from.
    #[serde(default)]
    pub ancestor_volume_id: Option<String>,
    #[serde(default)]
    pub consistency_group_id: Option<String>,
    #[serde(default)]
    pub volume_type: Option<String>,
    #[serde(default)]
    pub creation_time: Option<i64>,
    #[serde(default)]
    pub use_rmcache: Option<bool>,
    #[serde(default)]
    pub is_obfuscated: Option<bool>,
    #[serde(default)]
    pub mapping_to_all_sdcs_enabled: Option<bool>,
    #[serde(default)]
    pub mapped_sdc_info: Option<Vec<MappedSdcInfo>>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Volume {
    /// Whether this volume is a snapshot of another.
    pub fn is_snapshot(&self) -> bool {
        self.ancestor_volume_id.is_some()
    }

    /// SDCs this volume is mapped to.
    pub fn mapped_sdcs(&self) -> &[MappedSdcInfo] {
        self.mapped_sdc_info.as_deref().unwrap_or_default()
    }
}

/// One SDC mapping of a volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedSdcInfo {
    pub sdc_id: String,
    #[serde(default)]
    pub sdc_ip: Option<String>,
    #[serde(default)]
    pub limit_iops: Option<u64>,
    #[serde(default)]
    pub limit_bw_in_mbps: Option<u64>,
}

/// Body of the volume create call.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeParam {
    pub name: String,
    /// Requested size; the gateway rounds up to its allocation unit.
    pub volume_size_in_kb: String,
    pub storage_pool_id: String,
    /// `ThinProvisioned` or `ThickProvisioned`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_rm_cache: Option<String>,
}

/// How much of a volume tree the remove call deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoveMode {
    /// The volume itself only.
    #[default]
    OnlyMe,
    /// The volume and every snapshot taken from it.
    IncludeDescendants,
    /// Snapshots taken from the volume, keeping the volume.
    DescendantsOnly,
    /// Every volume in the tree.
    WholeVtree,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveVolumeParam {
    remove_mode: RemoveMode,
}

#[derive(Debug, Serialize)]
struct QueryIdByKeyParam<'a> {
    name: &'a str,
}

/// Body of the `addMappedSdc` action.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapVolumeSdcParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_multiple_mappings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_sdcs: Option<String>,
}

impl MapVolumeSdcParam {
    /// Map to one SDC.
    pub fn sdc(sdc_id: impl Into<String>) -> Self {
        Self {
            sdc_id: Some(sdc_id.into()),
            ..Self::default()
        }
    }

    /// Allow the volume to stay mapped to other SDCs.
    pub fn allow_multiple_mappings(mut self, allow: bool) -> Self {
        self.allow_multiple_mappings = Some(gateway_bool(allow));
        self
    }

    /// Map to every SDC in the system.
    pub fn all_sdcs() -> Self {
        Self {
            all_sdcs: Some(gateway_bool(true)),
            ..Self::default()
        }
    }
}

/// Body of the `removeMappedSdc` action.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmapVolumeSdcParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_scsi_initiators: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_sdcs: Option<String>,
}

impl UnmapVolumeSdcParam {
    /// Unmap from one SDC.
    pub fn sdc(sdc_id: impl Into<String>) -> Self {
        Self {
            sdc_id: Some(sdc_id.into()),
            ..Self::default()
        }
    }

    /// Unmap from every SDC.
    pub fn all_sdcs() -> Self {
        Self {
            all_sdcs: Some(gateway_bool(true)),
            ..Self::default()
        }
    }
}

/// Body of the `setMappedSdcLimits` action.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMappedSdcLimitsParam {
    pub sdc_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_limit_in_kbps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops_limit: Option<String>,
}

/// The gateway spells boolean action flags as upper-case strings.
fn gateway_bool(value: bool) -> String {
    let flag = if value { "TRUE" } else { "FALSE" };
    flag.to_string()
}

impl Resource for Volume {
    const KIND: &'static str = "Volume";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Client {
    /// List every volume, snapshots included.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn volumes(&self) -> Result<Vec<Volume>, Error> {
        self.instances().await
    }

    /// Fetch a volume by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when no such volume
    /// exists.
    pub async fn volume(&self, id: &str) -> Result<Volume, Error> {
        self.instance(id).await
    }

    /// Find a volume by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no volume has that name.
    pub async fn volume_by_name(&self, name: &str) -> Result<Volume, Error> {
        self.find_by_name(name).await
    }

    /// Snapshots taken from the volume with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn snapshots_of(&self, volume_id: &str) -> Result<Vec<Volume>, Error> {
        let volumes = self.volumes().await?;
        Ok(volumes
            .into_iter()
            .filter(|v| v.ancestor_volume_id.as_deref() == Some(volume_id))
            .collect())
    }

    /// Volumes of the storage pool with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn storage_pool_volumes(&self, storage_pool_id: &str) -> Result<Vec<Volume>, Error> {
        self.get(&relationship_path(
            StoragePool::KIND,
            storage_pool_id,
            Volume::KIND,
        ))
        .await
    }

    /// Look up a volume identifier by name with the gateway's key query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the gateway answers with an empty id,
    /// otherwise any request failure.
    #[instrument(skip(self))]
    pub async fn volume_id_by_name(&self, name: &str) -> Result<String, Error> {
        let path = format!("{}/action/queryIdByKey", super::instances_path(Volume::KIND));
        let body = ReplayableBody::from_json(&QueryIdByKeyParam { name })?;
        let response = self.execute(Method::POST, &path, Some(body)).await?;
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        let id = text.trim().trim_matches('"');
        if id.is_empty() {
            return Err(Error::not_found(format!("volume named {name:?}")));
        }
        debug!(volume_id = id, "Resolved volume id");
        Ok(id.to_string())
    }

    /// Create a volume, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    #[instrument(skip(self, param), fields(name = %param.name, pool = %param.storage_pool_id))]
    pub async fn create_volume(&self, param: &VolumeParam) -> Result<String, Error> {
        self.create(Volume::KIND, param).await
    }

    /// Remove a volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    #[instrument(skip(self))]
    pub async fn remove_volume(&self, id: &str, mode: RemoveMode) -> Result<(), Error> {
        let param = RemoveVolumeParam { remove_mode: mode };
        self.post_no_response(&action_path(Volume::KIND, id, "removeVolume"), &param)
            .await
    }

    /// Map a volume to one or more SDCs.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    pub async fn map_volume_sdc(
        &self,
        volume_id: &str,
        param: &MapVolumeSdcParam,
    ) -> Result<(), Error> {
        self.post_no_response(&action_path(Volume::KIND, volume_id, "addMappedSdc"), param)
            .await
    }

    /// Remove SDC mappings from a volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    pub async fn unmap_volume_sdc(
        &self,
        volume_id: &str,
        param: &UnmapVolumeSdcParam,
    ) -> Result<(), Error> {
        self.post_no_response(
            &action_path(Volume::KIND, volume_id, "removeMappedSdc"),
            param,
        )
        .await
    }

    /// Set bandwidth and IOPS limits on one SDC mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    pub async fn set_mapped_sdc_limits(
        &self,
        volume_id: &str,
        param: &SetMappedSdcLimitsParam,
    ) -> Result<(), Error> {
        self.post_no_response(
            &action_path(Volume::KIND, volume_id, "setMappedSdcLimits"),
            param,
        )
        .await
    }
}
