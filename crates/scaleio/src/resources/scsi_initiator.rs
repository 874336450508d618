//! iSCSI initiators registered with a system.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::Link;

use super::{Resource, System, relationship_path};

/// An iSCSI initiator known to a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScsiInitiator {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub iqn: Option<String>,
    #[serde(rename = "systemID", default)]
    pub system_id: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Resource for ScsiInitiator {
    const KIND: &'static str = "ScsiInitiator";

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
    /// SCSI initiators of the system with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn system_scsi_initiators(&self, system_id: &str) -> Result<Vec<ScsiInitiator>, Error> {
        self.get(&relationship_path(
            System::KIND,
            system_id,
            ScsiInitiator::KIND,
        ))
        .await
    }
}
