use async_trait::async_trait;

use crate::{domain::MatchRecord, Result};

/// Outbound messaging port.
///
/// The HTTP gateway adapter is the first implementation; test fakes are the
/// second. Destinations are raw identifiers; canonicalization (the JID
/// domain suffix) is an adapter concern.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, to: &str, text: &str) -> Result<()>;

    /// Presence self-ping used by the keep-alive timer.
    async fn send_presence(&self) -> Result<()>;
}

/// Directory lookup: does an identifier correspond to a registered account on
/// the network?
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Returns one record per directory hit; an empty list means the
    /// identifier is not registered.
    async fn query(&self, identifier: &str) -> Result<Vec<MatchRecord>>;
}
