//! Authentication types and session state.
//!
//! The [`CredentialStore`] is the only mutable state shared between requests
//! on a client; the [`Authenticator`] is the only writer of its token.

mod authenticator;
mod credentials;
mod store;
mod tokens;

pub use authenticator::Authenticator;
pub use credentials::Credentials;
pub use store::CredentialStore;
pub use tokens::SessionToken;
