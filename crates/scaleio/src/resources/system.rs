//! Storage systems.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::Link;

use super::{ProtectionDomain, Resource, Statistics, relation, relationship_path};

/// A storage system (cluster) managed by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub system_version_name: Option<String>,
    #[serde(default)]
    pub install_id: Option<String>,
    #[serde(default)]
    pub days_installed: Option<u32>,
    #[serde(default)]
    pub capacity_alert_high_threshold_percent: Option<u32>,
    #[serde(default)]
    pub capacity_alert_critical_threshold_percent: Option<u32>,
    #[serde(default)]
    pub upgrade_state: Option<String>,
    #[serde(default)]
    pub restricted_sdc_mode_enabled: Option<bool>,
    #[serde(default)]
    pub mdm_cluster: Option<MdmCluster>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Metadata manager cluster layout of a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MdmCluster {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cluster_state: Option<String>,
    #[serde(default)]
    pub cluster_mode: Option<String>,
    #[serde(default)]
    pub good_nodes_num: Option<u32>,
    #[serde(default)]
    pub good_replicas_num: Option<u32>,
    #[serde(default)]
    pub master: Option<Mdm>,
    #[serde(default)]
    pub slaves: Vec<Mdm>,
    #[serde(default)]
    pub tie_breakers: Vec<Mdm>,
}

/// One metadata manager node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mdm {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub ips: Vec<String>,
    #[serde(rename = "managementIPs", default)]
    pub management_ips: Vec<String>,
    #[serde(default)]
    pub version_info: Option<String>,
}

impl Resource for System {
    const KIND: &'static str = "System";

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
    /// List the systems behind this gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn systems(&self) -> Result<Vec<System>, Error> {
        self.instances().await
    }

    /// Fetch a system by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when no such system
    /// exists.
    pub async fn system(&self, id: &str) -> Result<System, Error> {
        self.instance(id).await
    }

    /// Find a system by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no system has that name.
    pub async fn system_by_name(&self, name: &str) -> Result<System, Error> {
        self.find_by_name(name).await
    }

    /// Statistics of a system.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn system_statistics(&self, system: &System) -> Result<Statistics, Error> {
        self.get(&relationship_path(System::KIND, &system.id, "Statistics"))
            .await
    }

    /// Protection domains of a system, following its relation link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the system carries no such link.
    pub async fn system_protection_domains(
        &self,
        system: &System,
    ) -> Result<Vec<ProtectionDomain>, Error> {
        self.related(
            &system.links,
            &relation(System::KIND, ProtectionDomain::KIND),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = r#"{
        "restrictedSdcModeEnabled": false,
        "daysInstalled": 5,
        "systemVersionName": "EMC ScaleIO Version: R2_0.6035.0",
        "installId": "68eb1ae058e2b67b",
        "capacityAlertHighThresholdPercent": 80,
        "capacityAlertCriticalThresholdPercent": 90,
        "upgradeState": "NoUpgrade",
        "mdmCluster": {
            "clusterState": "ClusteredNormal",
            "clusterMode": "ThreeNodes",
            "goodNodesNum": 3,
            "goodReplicasNum": 2,
            "master": {
                "managementIPs": ["192.168.99.202"],
                "versionInfo": "R2_0.6035.0",
                "ips": ["192.168.99.202"],
                "role": "Manager",
                "name": "mdm1",
                "id": "4cb067b24847d420",
                "port": 9011
            },
            "slaves": [{
                "managementIPs": ["192.168.99.203"],
                "ips": ["192.168.99.203"],
                "role": "Manager",
                "status": "Normal",
                "name": "mdm2",
                "id": "08a2e6a00dfaf432",
                "port": 9011
            }],
            "tieBreakers": [],
            "name": "scaleio",
            "id": "8686774057318686923"
        },
        "name": "scaleio",
        "id": "788d9efb0a8f20cb",
        "links": [
            {"rel": "self", "href": "/api/instances/System::788d9efb0a8f20cb"},
            {"rel": "/api/System/relationship/ProtectionDomain",
             "href": "/api/instances/System::788d9efb0a8f20cb/relationships/ProtectionDomain"}
        ]
    }"#;

    #[test]
    fn decodes_system() {
        let system: System = serde_json::from_str(SYSTEM).unwrap();
        assert_eq!(system.id(), "788d9efb0a8f20cb");
        assert_eq!(system.name(), Some("scaleio"));
        assert_eq!(system.days_installed, Some(5));

        let cluster = system.mdm_cluster.as_ref().unwrap();
        let master = cluster.master.as_ref().unwrap();
        assert_eq!(master.management_ips, vec!["192.168.99.202"]);
        assert_eq!(cluster.slaves[0].status.as_deref(), Some("Normal"));

        assert_eq!(
            system.link("/api/System/relationship/ProtectionDomain"),
            Some("/api/instances/System::788d9efb0a8f20cb/relationships/ProtectionDomain")
        );
    }
}
