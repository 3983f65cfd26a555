use crate::config::EnrichmentConfig;
use crate::constants::{DUMMYJSON_API, USERS_ENDPOINT_ENV};
use crate::error::{Result, ScrubError};
use crate::pipeline::enrich::{EnrichmentRecord, EnrichmentSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct UsersResponse {
    users: Vec<ExternalUser>,
}

#[derive(Debug, Deserialize)]
struct ExternalUser {
    id: i64,
    age: Option<u32>,
    address: Option<ExternalAddress>,
}

#[derive(Debug, Deserialize)]
struct ExternalAddress {
    city: Option<String>,
}

/// Directory source backed by the dummyjson users endpoint.
pub struct DummyJsonUsers {
    client: reqwest::Client,
    endpoint: String,
}

impl DummyJsonUsers {
    /// Build a client for the configured endpoint. The environment variable
    /// takes precedence so runs can point at a mirror without a config file.
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let endpoint =
            std::env::var(USERS_ENDPOINT_ENV).unwrap_or_else(|_| config.endpoint.clone());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, endpoint })
    }
}

fn parse_users(bytes: &[u8]) -> Result<Vec<EnrichmentRecord>> {
    let response: UsersResponse = serde_json::from_slice(bytes)?;
    Ok(response
        .users
        .into_iter()
        .map(|user| EnrichmentRecord {
            id: user.id,
            age: user.age,
            city: user.address.and_then(|address| address.city),
        })
        .collect())
}

#[async_trait]
impl EnrichmentSource for DummyJsonUsers {
    fn source_name(&self) -> &'static str {
        DUMMYJSON_API
    }

    async fn fetch_users(&self) -> Result<Vec<EnrichmentRecord>> {
        debug!(endpoint = %self.endpoint, "Fetching directory records");
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrubError::Enrichment {
                message: format!("users endpoint returned HTTP {}", status.as_u16()),
            });
        }
        let bytes = response.bytes().await?;
        let records = parse_users(&bytes)?;
        info!(
            records = records.len(),
            source = self.source_name(),
            "Fetched directory records"
        );
        Ok(records)
    }
}
