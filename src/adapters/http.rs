use crate::domain::model::{StationUpdate, UpdateOutcome, UpdateResponse};
use crate::domain::ports::StationApi;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const UPDATE_STATION_PATH: &str = "/update_station";

/// `StationApi` over the site's own backend.
#[derive(Debug, Clone)]
pub struct HttpStationApi {
    client: Client,
    endpoint: String,
}

impl HttpStationApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), UPDATE_STATION_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StationApi for HttpStationApi {
    async fn update_station(&self, update: &StationUpdate) -> Result<UpdateOutcome> {
        tracing::debug!("POST {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(update).send().await?;

        // Failures come back as 4xx/5xx with an `error` body, so the body is
        // decoded whatever the status.
        let status = response.status();
        tracing::debug!("Update response status: {}", status);
        let body = response.text().await?;

        let reply: UpdateResponse =
            serde_json::from_str(&body).map_err(|e| SiteError::MalformedResponse {
                endpoint: self.endpoint.clone(),
                message: format!("status {}: {}", status, e),
            })?;
        reply.into_outcome(&self.endpoint)
    }
}
