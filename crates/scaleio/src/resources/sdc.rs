//! Storage data clients.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::Link;

use super::{Resource, Statistics, System, Volume, first_match, relation, relationship_path};

/// A storage data client: a host that consumes volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sdc {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sdc_ip: Option<String>,
    #[serde(default)]
    pub sdc_guid: Option<String>,
    #[serde(default)]
    pub system_id: Option<String>,
    #[serde(default)]
    pub sdc_approved: Option<bool>,
    #[serde(default)]
    pub mdm_connection_state: Option<String>,
    #[serde(default)]
    pub on_vmware: Option<bool>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Resource for Sdc {
    const KIND: &'static str = "Sdc";

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
    /// List every SDC known to the gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sdcs(&self) -> Result<Vec<Sdc>, Error> {
        self.instances().await
    }

    /// Fetch an SDC by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sdc(&self, id: &str) -> Result<Sdc, Error> {
        self.instance(id).await
    }

    /// SDCs registered with the system with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn system_sdcs(&self, system_id: &str) -> Result<Vec<Sdc>, Error> {
        self.get(&relationship_path(System::KIND, system_id, Sdc::KIND))
            .await
    }

    /// First SDC of a system matching `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches.
    pub async fn find_sdc<F>(&self, system_id: &str, predicate: F) -> Result<Sdc, Error>
    where
        F: Fn(&Sdc) -> bool,
    {
        let all = self.system_sdcs(system_id).await?;
        first_match(all, predicate, Sdc::KIND)
    }

    /// Find an SDC by its GUID anywhere on the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no SDC has that GUID.
    pub async fn sdc_by_guid(&self, guid: &str) -> Result<Sdc, Error> {
        self.find(|sdc: &Sdc| sdc.sdc_guid.as_deref() == Some(guid))
            .await
    }

    /// Volumes mapped to an SDC, following its relation link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the SDC carries no such link.
    pub async fn sdc_volumes(&self, sdc: &Sdc) -> Result<Vec<Volume>, Error> {
        self.related(&sdc.links, &relation(Sdc::KIND, Volume::KIND))
            .await
    }

    /// Statistics of an SDC, following its relation link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the SDC carries no such link.
    pub async fn sdc_statistics(&self, sdc: &Sdc) -> Result<Statistics, Error> {
        let rel = relation(Sdc::KIND, "Statistics");
        let href = sdc
            .link(&rel)
            .ok_or_else(|| Error::not_found(format!("link {rel}")))?;
        self.get(href).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sdc() {
        let sdc: Sdc = serde_json::from_str(
            r#"{"id":"5ab3ddc100000000","name":null,"sdcIp":"192.168.99.204",
                "sdcGuid":"271BAD82-08EE-44F2-A2B1-7E2787C27BE1","sdcApproved":true,
                "mdmConnectionState":"Connected","systemId":"788d9efb0a8f20cb",
                "links":[{"rel":"/api/Sdc/relationship/Volume",
                          "href":"/api/instances/Sdc::5ab3ddc100000000/relationships/Volume"}]}"#,
        )
        .unwrap();
        assert_eq!(sdc.name(), None);
        assert_eq!(sdc.sdc_ip.as_deref(), Some("192.168.99.204"));
        assert_eq!(
            sdc.link(&relation(Sdc::KIND, Volume::KIND)),
            Some("/api/instances/Sdc::5ab3ddc100000000/relationships/Volume")
        );
    }
}
