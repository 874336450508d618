//! Core gateway types.
//!
//! These types enforce their invariants at construction time.

mod gateway_url;
mod link;
mod version;

pub use gateway_url::GatewayUrl;
pub use link::{Link, find_link};
pub use version::ApiVersion;
