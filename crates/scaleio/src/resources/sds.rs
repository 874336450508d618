//! Storage data servers.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::Client;
use crate::error::{Error, InvalidInputError};
use crate::types::Link;

use super::{ProtectionDomain, Resource, first_match, relationship_path};

/// A storage data server contributing capacity to a protection domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sds {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub protection_domain_id: Option<String>,
    #[serde(default)]
    pub fault_set_id: Option<String>,
    #[serde(default)]
    pub ip_list: Vec<SdsIpEntry>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub sds_state: Option<String>,
    #[serde(default)]
    pub membership_state: Option<String>,
    #[serde(default)]
    pub mdm_connection_state: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// What traffic an SDS address carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SdsIpRole {
    /// Client (SDC) traffic only.
    SdcOnly,
    /// Server-to-server traffic only.
    SdsOnly,
    /// Both kinds of traffic.
    All,
}

/// One SDS address and its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdsIp {
    pub ip: String,
    pub role: SdsIpRole,
}

/// Wire wrapper around [`SdsIp`]: `{"SdsIp": {"ip": ..., "role": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdsIpEntry {
    #[serde(rename = "SdsIp")]
    pub sds_ip: SdsIp,
}

/// Body of the SDS create call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdsParam {
    pub name: String,
    pub ip_list: Vec<SdsIpEntry>,
    pub protection_domain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_set_id: Option<String>,
}

impl SdsParam {
    /// Build the create body, pairing each address with its role.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] if no address is given or the number of
    /// roles differs from the number of addresses.
    pub fn new(
        name: impl Into<String>,
        protection_domain_id: impl Into<String>,
        ips: &[String],
        roles: &[SdsIpRole],
    ) -> Result<Self, Error> {
        if ips.is_empty() {
            return Err(InvalidInputError::Other {
                message: "at least one SDS IP is required".to_string(),
            }
            .into());
        }
        if ips.len() != roles.len() {
            return Err(InvalidInputError::Other {
                message: format!(
                    "{} SDS IPs given with {} roles; counts must match",
                    ips.len(),
                    roles.len()
                ),
            }
            .into());
        }

        let ip_list = ips
            .iter()
            .zip(roles)
            .map(|(ip, role)| SdsIpEntry {
                sds_ip: SdsIp {
                    ip: ip.clone(),
                    role: *role,
                },
            })
            .collect();

        Ok(Self {
            name: name.into(),
            ip_list,
            protection_domain_id: protection_domain_id.into(),
            fault_set_id: None,
        })
    }

    /// Place the SDS in a fault set.
    pub fn in_fault_set(mut self, fault_set_id: impl Into<String>) -> Self {
        self.fault_set_id = Some(fault_set_id.into());
        self
    }
}

impl Resource for Sds {
    const KIND: &'static str = "Sds";

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
    /// Add an SDS to a protection domain, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    #[instrument(skip(self, param), fields(name = %param.name))]
    pub async fn create_sds(&self, param: &SdsParam) -> Result<String, Error> {
        self.create(Sds::KIND, param).await
    }

    /// SDS nodes of the protection domain with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sds_in_domain(&self, protection_domain_id: &str) -> Result<Vec<Sds>, Error> {
        self.get(&relationship_path(
            ProtectionDomain::KIND,
            protection_domain_id,
            Sds::KIND,
        ))
        .await
    }

    /// First SDS of a protection domain matching `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches.
    pub async fn find_sds<F>(&self, protection_domain_id: &str, predicate: F) -> Result<Sds, Error>
    where
        F: Fn(&Sds) -> bool,
    {
        let all = self.sds_in_domain(protection_domain_id).await?;
        first_match(all, predicate, Sds::KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ips(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_addresses_with_roles() {
        let param = SdsParam::new(
            "sds1",
            "7042970f00000000",
            &ips(&["10.0.0.1", "10.0.1.1"]),
            &[SdsIpRole::SdcOnly, SdsIpRole::SdsOnly],
        )
        .unwrap()
        .in_fault_set("fs1");

        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            serde_json::json!({
                "name": "sds1",
                "ipList": [
                    {"SdsIp": {"ip": "10.0.0.1", "role": "sdcOnly"}},
                    {"SdsIp": {"ip": "10.0.1.1", "role": "sdsOnly"}}
                ],
                "protectionDomainId": "7042970f00000000",
                "faultSetId": "fs1"
            })
        );
    }

    #[test]
    fn requires_an_address() {
        let err = SdsParam::new("sds1", "pd", &[], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn role_count_must_match() {
        let err = SdsParam::new("sds1", "pd", &ips(&["10.0.0.1"]), &[]).unwrap_err();
        assert!(err.to_string().contains("counts must match"));
    }

    #[test]
    fn decodes_sds() {
        let sds: Sds = serde_json::from_str(
            r#"{"id":"d8e5a5f600000000","name":"sds1","port":7072,
                "ipList":[{"SdsIp":{"ip":"192.168.99.201","role":"all"}}],
                "sdsState":"Normal","links":[]}"#,
        )
        .unwrap();
        assert_eq!(sds.ip_list[0].sds_ip.role, SdsIpRole::All);
        assert_eq!(sds.port, Some(7072));
    }
}
