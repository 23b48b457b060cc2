pub mod jira;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use jira::JiraFetcher;

/// Fetch seam between records and whatever performs the remote call.
///
/// Implementations own transport, auth, retries and timeouts; the core only
/// consumes the deserialized payload. `Ok(None)` means nothing was fetched
/// and the record stays unmapped.
#[async_trait]
pub trait HydrateStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_raw(&self, id: &str) -> Result<Option<Value>>;
}

/// Default binding for record types that never wired a fetcher. Warns
/// instead of failing so callers that never needed hydration keep working.
pub struct StubHydrate;

#[async_trait]
impl HydrateStrategy for StubHydrate {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_raw(&self, id: &str) -> Result<Option<Value>> {
        log::warn!("hydrate not implemented for this record type (id {id})");
        Ok(None)
    }
}
