use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde_json::Value;

use super::HydrateStrategy;

/// Jira REST fetcher for single issue reads. Handles auth and transport
/// only; the payload is handed back undigested for the field mappers.
pub struct JiraFetcher {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl JiraFetcher {
    pub fn new(domain: String, email: String, api_token: String) -> Self {
        let creds = format!("{email}:{api_token}");
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        Self {
            base_url: format!("https://{domain}.atlassian.net"),
            auth_header: format!("Basic {encoded}"),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HydrateStrategy for JiraFetcher {
    fn name(&self) -> &str {
        "Jira"
    }

    async fn fetch_raw(&self, id: &str) -> Result<Option<Value>> {
        let url = format!(
            "{}/rest/api/2/issue/{}",
            self.base_url,
            urlencoding::encode(id)
        );

        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Jira API request failed")?
            .error_for_status()
            .context("Jira API returned an error status")?;

        let raw: Value = resp.json().await.context("Failed to parse Jira response")?;
        Ok(Some(raw))
    }
}
