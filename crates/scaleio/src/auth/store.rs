//! Shared, synchronized credential state for one client handle.

use parking_lot::RwLock;

use crate::types::ApiVersion;

use super::credentials::Credentials;
use super::tokens::SessionToken;

/// The single piece of mutable state shared by every request on a client.
///
/// All reads and writes go through one lock, so a reader never observes a
/// half-updated value and two writers never interleave. Each operation holds
/// the lock only for an in-memory copy or assignment.
#[derive(Debug)]
pub struct CredentialStore {
    inner: RwLock<Credentials>,
}

impl CredentialStore {
    /// Create a store holding the given credentials.
    pub fn new(initial: Credentials) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    /// Snapshot the current credentials.
    pub fn get(&self) -> Credentials {
        self.inner.read().clone()
    }

    /// Current token epoch.
    pub fn epoch(&self) -> u64 {
        self.inner.read().epoch()
    }

    /// Install a newly issued token, returning the new epoch.
    pub fn set_token(&self, token: SessionToken) -> u64 {
        let mut creds = self.inner.write();
        creds.install_token(token);
        creds.epoch()
    }

    /// Replace endpoint, username, password, version and token in one step.
    ///
    /// A version already negotiated is kept when `new` carries none. The
    /// epoch always advances, since the token has been replaced.
    pub fn set_credentials(&self, mut new: Credentials) -> u64 {
        let mut creds = self.inner.write();
        if new.version().is_none()
            && let Some(version) = creds.version()
        {
            new.set_version(version);
        }
        let epoch = creds.epoch() + 1;
        new.set_epoch(epoch);
        *creds = new;
        epoch
    }

    /// Record the negotiated API version.
    pub fn set_version(&self, version: ApiVersion) {
        self.inner.write().set_version(version);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::GatewayUrl;

    fn endpoint(host: &str) -> GatewayUrl {
        GatewayUrl::new(format!("https://{host}/api")).unwrap()
    }

    #[test]
    fn set_token_is_visible_to_later_readers() {
        let store = CredentialStore::new(Credentials::new(endpoint("gw1"), "admin", "pw"));
        assert!(store.get().token().is_none());

        let epoch = store.set_token(SessionToken::new("abc123"));
        let snapshot = store.get();
        assert_eq!(snapshot.token().unwrap().as_str(), "abc123");
        assert_eq!(snapshot.epoch(), epoch);
    }

    #[test]
    fn set_credentials_keeps_known_version() {
        let store = CredentialStore::new(
            Credentials::anonymous(endpoint("gw1")).with_version(ApiVersion::new(2, 0)),
        );

        store.set_credentials(
            Credentials::new(endpoint("gw2"), "other", "pw").with_token(SessionToken::new("t2")),
        );

        let snapshot = store.get();
        assert_eq!(snapshot.endpoint().host(), Some("gw2"));
        assert_eq!(snapshot.username(), "other");
        assert_eq!(snapshot.version(), Some(ApiVersion::new(2, 0)));
        assert_eq!(snapshot.token().unwrap().as_str(), "t2");
        assert_eq!(snapshot.epoch(), 1);
    }

    #[test]
    fn set_credentials_prefers_new_version() {
        let store = CredentialStore::new(
            Credentials::anonymous(endpoint("gw1")).with_version(ApiVersion::new(2, 0)),
        );
        store.set_credentials(
            Credentials::new(endpoint("gw1"), "admin", "pw").with_version(ApiVersion::new(3, 5)),
        );
        assert_eq!(store.get().version(), Some(ApiVersion::new(3, 5)));
    }

    #[test]
    fn concurrent_writers_never_lose_an_epoch() {
        let store = Arc::new(CredentialStore::new(Credentials::anonymous(endpoint("gw1"))));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..100 {
                        store.set_token(SessionToken::new(format!("t{i}-{j}")));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.epoch(), 800);
    }
}
