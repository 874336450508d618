//! Fault sets.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::Link;

use super::{ProtectionDomain, Resource, relationship_path};

/// A group of SDS nodes that fail together (same rack or power feed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultSet {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub protection_domain_id: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Body of the fault set create call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultSetParam {
    pub name: String,
    pub protection_domain_id: String,
}

impl Resource for FaultSet {
    const KIND: &'static str = "FaultSet";

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
    /// Create a fault set in a protection domain, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    pub async fn create_fault_set(
        &self,
        protection_domain_id: &str,
        name: &str,
    ) -> Result<String, Error> {
        let param = FaultSetParam {
            name: name.to_string(),
            protection_domain_id: protection_domain_id.to_string(),
        };
        self.create(FaultSet::KIND, &param).await
    }

    /// Fault sets of the protection domain with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fault_sets_in_domain(
        &self,
        protection_domain_id: &str,
    ) -> Result<Vec<FaultSet>, Error> {
        self.get(&relationship_path(
            ProtectionDomain::KIND,
            protection_domain_id,
            FaultSet::KIND,
        ))
        .await
    }
}
