//! Storage pools.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::Link;

use super::{ProtectionDomain, Resource, Statistics, Volume, relation, relationship_path};

/// A storage pool inside a protection domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePool {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub protection_domain_id: Option<String>,
    #[serde(default)]
    pub spare_percentage: Option<u32>,
    #[serde(default)]
    pub use_rmcache: Option<bool>,
    #[serde(default)]
    pub use_rfcache: Option<bool>,
    #[serde(default)]
    pub zero_padding_enabled: Option<bool>,
    #[serde(default)]
    pub rebuild_enabled: Option<bool>,
    #[serde(default)]
    pub rebalance_enabled: Option<bool>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Body of the storage pool create call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePoolParam {
    pub name: String,
    pub protection_domain_id: String,
}

impl Resource for StoragePool {
    const KIND: &'static str = "StoragePool";

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
    /// List every storage pool in the cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn storage_pools(&self) -> Result<Vec<StoragePool>, Error> {
        self.instances().await
    }

    /// Fetch a storage pool by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn storage_pool(&self, id: &str) -> Result<StoragePool, Error> {
        self.instance(id).await
    }

    /// Find a storage pool by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no pool has that name.
    pub async fn storage_pool_by_name(&self, name: &str) -> Result<StoragePool, Error> {
        self.find_by_name(name).await
    }

    /// Storage pools of the protection domain with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn storage_pools_in_domain(
        &self,
        protection_domain_id: &str,
    ) -> Result<Vec<StoragePool>, Error> {
        self.get(&relationship_path(
            ProtectionDomain::KIND,
            protection_domain_id,
            StoragePool::KIND,
        ))
        .await
    }

    /// Create a storage pool in a protection domain, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the request.
    pub async fn create_storage_pool(
        &self,
        domain: &ProtectionDomain,
        name: &str,
    ) -> Result<String, Error> {
        let param = StoragePoolParam {
            name: name.to_string(),
            protection_domain_id: domain.id.clone(),
        };
        self.create(StoragePool::KIND, &param).await
    }

    /// Volumes of a storage pool, following its relation link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the pool carries no such link.
    pub async fn pool_volumes(&self, pool: &StoragePool) -> Result<Vec<Volume>, Error> {
        self.related(&pool.links, &relation(StoragePool::KIND, Volume::KIND))
            .await
    }

    /// Statistics of a storage pool, following its relation link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the pool carries no such link.
    pub async fn storage_pool_statistics(&self, pool: &StoragePool) -> Result<Statistics, Error> {
        let rel = relation(StoragePool::KIND, "Statistics");
        let href = pool
            .link(&rel)
            .ok_or_else(|| Error::not_found(format!("link {rel}")))?;
        self.get(href).await
    }
}
