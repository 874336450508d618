//! Gateway users.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::Link;

use super::{Resource, System, relationship_path};

/// A management user of a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(default)]
    pub system_id: Option<String>,
    #[serde(default)]
    pub password_change_required: Option<bool>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Resource for User {
    const KIND: &'static str = "User";

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
    /// Users of the system with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn system_users(&self, system_id: &str) -> Result<Vec<User>, Error> {
        self.get(&relationship_path(System::KIND, system_id, User::KIND))
            .await
    }
}
