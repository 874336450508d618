//! Typed gateway resources and the generic operations over them.
//!
//! Every record kind implements [`Resource`], which ties it to its type name
//! on the gateway (`/api/types/<Kind>/instances`,
//! `/api/instances/<Kind>::<id>`). Per-kind operations live in the submodules
//! as methods on [`Client`].

mod device;
mod fault_set;
mod protection_domain;
mod scsi_initiator;
mod sdc;
mod sds;
mod statistics;
mod storage_pool;
mod system;
mod user;
mod volume;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::Client;
use crate::error::Error;
use crate::types::{Link, find_link};

pub use device::{Device, DeviceParam, DeviceTestMode};
pub use fault_set::{FaultSet, FaultSetParam};
pub use protection_domain::{ProtectionDomain, ProtectionDomainParam};
pub use scsi_initiator::ScsiInitiator;
pub use sdc::Sdc;
pub use sds::{Sds, SdsIp, SdsIpEntry, SdsIpRole, SdsParam};
pub use statistics::Statistics;
pub use storage_pool::{StoragePool, StoragePoolParam};
pub use system::{Mdm, MdmCluster, System};
pub use user::User;
pub use volume::{
    MapVolumeSdcParam, MappedSdcInfo, RemoveMode, SetMappedSdcLimitsParam, UnmapVolumeSdcParam,
    Volume, VolumeParam,
};

/// A record kind exposed by the gateway.
pub trait Resource: DeserializeOwned + Send {
    /// Type name used in gateway paths, e.g. `StoragePool`.
    const KIND: &'static str;

    /// Gateway identifier of this record.
    fn id(&self) -> &str;

    /// Display name, when one is set.
    fn name(&self) -> Option<&str>;

    /// Relation links attached to this record.
    fn links(&self) -> &[Link];

    /// The href of the named relation, if present.
    fn link(&self, rel: &str) -> Option<&str> {
        find_link(self.links(), rel).map(|link| link.href.as_str())
    }
}

/// Response body of the create calls.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedId {
    pub id: String,
}

/// `/api/types/<kind>/instances`
pub(crate) fn instances_path(kind: &str) -> String {
    format!("/api/types/{kind}/instances")
}

/// `/api/instances/<kind>::<id>`
pub(crate) fn instance_path(kind: &str, id: &str) -> String {
    format!("/api/instances/{kind}::{id}")
}

/// `/api/instances/<kind>::<id>/relationships/<target>`
pub(crate) fn relationship_path(kind: &str, id: &str, target: &str) -> String {
    format!("/api/instances/{kind}::{id}/relationships/{target}")
}

/// `/api/instances/<kind>::<id>/action/<action>`
pub(crate) fn action_path(kind: &str, id: &str, action: &str) -> String {
    format!("/api/instances/{kind}::{id}/action/{action}")
}

/// Relation name linking `kind` to `target`, e.g.
/// `/api/ProtectionDomain/relationship/StoragePool`.
pub(crate) fn relation(kind: &str, target: &str) -> String {
    format!("/api/{kind}/relationship/{target}")
}

impl Client {
    /// List every record of a kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the listing does not decode.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn instances<R: Resource>(&self) -> Result<Vec<R>, Error> {
        let records: Vec<R> = self.get(&instances_path(R::KIND)).await?;
        debug!(count = records.len(), "Retrieved instances");
        Ok(records)
    }

    /// Fetch one record by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the record does not decode.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn instance<R: Resource>(&self, id: &str) -> Result<R, Error> {
        self.get(&instance_path(R::KIND, id)).await
    }

    /// Follow a relation link and list the records it points to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no link carries `rel`, otherwise any
    /// request or decode failure.
    pub async fn related<R: Resource>(&self, links: &[Link], rel: &str) -> Result<Vec<R>, Error> {
        let link = find_link(links, rel).ok_or_else(|| Error::not_found(format!("link {rel}")))?;
        self.get(&link.href).await
    }

    /// First record of a kind matching `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches.
    pub async fn find<R, F>(&self, predicate: F) -> Result<R, Error>
    where
        R: Resource,
        F: Fn(&R) -> bool,
    {
        let records = self.instances::<R>().await?;
        first_match(records, predicate, R::KIND)
    }

    /// First record of a kind with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has that name.
    pub async fn find_by_name<R: Resource>(&self, name: &str) -> Result<R, Error> {
        let records = self.instances::<R>().await?;
        records
            .into_iter()
            .find(|r| r.name() == Some(name))
            .ok_or_else(|| Error::not_found(format!("{} named {name:?}", R::KIND)))
    }

    /// Create a record of a kind, returning the new identifier.
    pub(crate) async fn create<P>(&self, kind: &str, param: &P) -> Result<String, Error>
    where
        P: Serialize + ?Sized,
    {
        let created: CreatedId = self.post(&instances_path(kind), param).await?;
        debug!(kind, id = %created.id, "Created instance");
        Ok(created.id)
    }
}

pub(crate) fn first_match<R, F>(records: Vec<R>, predicate: F, kind: &str) -> Result<R, Error>
where
    F: Fn(&R) -> bool,
{
    records
        .into_iter()
        .find(|r| predicate(r))
        .ok_or_else(|| Error::not_found(format!("matching {kind}")))
}
