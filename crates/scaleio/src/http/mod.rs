//! Authenticated HTTP plumbing.
//!
//! This module provides the transport, the replayable request body, the
//! response classifier and the request executor built on them.

mod body;
pub(crate) mod classify;
mod executor;
mod transport;

pub use body::{BodyReader, ReplayableBody};
pub use classify::classify;
pub use executor::Executor;
pub use transport::Transport;
