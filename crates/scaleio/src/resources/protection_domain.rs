//! Protection domains.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::Link;

use super::{FaultSet, Resource, Sds, StoragePool, relation};

/// A protection domain: a group of SDS nodes that protect each other's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionDomain {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub system_id: Option<String>,
    #[serde(default)]
    pub protection_domain_state: Option<String>,
    #[serde(default)]
    pub rebuild_network_throttling_enabled: Option<bool>,
    #[serde(default)]
    pub rebuild_network_throttling_in_kbps: Option<u64>,
    #[serde(default)]
    pub rebalance_network_throttling_enabled: Option<bool>,
    #[serde(default)]
    pub rebalance_network_throttling_in_kbps: Option<u64>,
    #[serde(default)]
    pub overall_io_network_throttling_enabled: Option<bool>,
    #[serde(default)]
    pub overall_io_network_throttling_in_kbps: Option<u64>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Body of the protection domain create call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionDomainParam {
    pub name: String,
}

impl Resource for ProtectionDomain {
    const KIND: &'static str = "ProtectionDomain";

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
    /// List every protection domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn protection_domains(&self) -> Result<Vec<ProtectionDomain>, Error> {
        self.instances().await
    }

    /// Fetch a protection domain by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn protection_domain(&self, id: &str) -> Result<ProtectionDomain, Error> {
        self.instance(id).await
    }

    /// Find a protection domain by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no domain has that name.
    pub async fn protection_domain_by_name(&self, name: &str) -> Result<ProtectionDomain, Error> {
        self.find_by_name(name).await
    }

    /// Create a protection domain, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    pub async fn create_protection_domain(&self, name: &str) -> Result<String, Error> {
        let param = ProtectionDomainParam {
            name: name.to_string(),
        };
        self.create(ProtectionDomain::KIND, &param).await
    }

    /// Storage pools of a protection domain, following its relation link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the domain carries no such link.
    pub async fn domain_storage_pools(
        &self,
        domain: &ProtectionDomain,
    ) -> Result<Vec<StoragePool>, Error> {
        self.related(
            &domain.links,
            &relation(ProtectionDomain::KIND, StoragePool::KIND),
        )
        .await
    }

    /// SDS nodes of a protection domain, following its relation link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the domain carries no such link.
    pub async fn domain_sds(&self, domain: &ProtectionDomain) -> Result<Vec<Sds>, Error> {
        self.related(&domain.links, &relation(ProtectionDomain::KIND, Sds::KIND))
            .await
    }

    /// Fault sets of a protection domain, following its relation link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the domain carries no such link.
    pub async fn domain_fault_sets(
        &self,
        domain: &ProtectionDomain,
    ) -> Result<Vec<FaultSet>, Error> {
        self.related(
            &domain.links,
            &relation(ProtectionDomain::KIND, FaultSet::KIND),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_null_throttling() {
        let pd: ProtectionDomain = serde_json::from_str(
            r#"{
                "systemId": "788d9efb0a8f20cb",
                "protectionDomainState": "Active",
                "rebuildNetworkThrottlingInKbps": null,
                "rebuildNetworkThrottlingEnabled": false,
                "name": "default",
                "id": "7042970f00000000",
                "links": [
                    {"rel": "/api/ProtectionDomain/relationship/StoragePool",
                     "href": "/api/instances/ProtectionDomain::7042970f00000000/relationships/StoragePool"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(pd.system_id.as_deref(), Some("788d9efb0a8f20cb"));
        assert_eq!(pd.rebuild_network_throttling_in_kbps, None);
        assert_eq!(pd.rebuild_network_throttling_enabled, Some(false));
        assert!(
            pd.link(&relation(ProtectionDomain::KIND, StoragePool::KIND))
                .is_some()
        );
    }

    #[test]
    fn create_param_wire_shape() {
        let param = ProtectionDomainParam {
            name: "pd1".to_string(),
        };
        assert_eq!(serde_json::to_string(&param).unwrap(), r#"{"name":"pd1"}"#);
    }
}
