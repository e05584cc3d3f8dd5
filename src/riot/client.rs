use std::num::NonZeroU32;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::region::Region;
use super::types::FetchError;

pub struct RiotClient {
    http: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Riot API Key
    key: String,
    /// Replaces the regional host, used to target a mock server.
    base_url: Option<String>,
}

impl RiotClient {
    pub fn new(key: String, rate_limit_per_second: NonZeroU32) -> Self {
        Self {
            http: reqwest::Client::new(),
            limiter: RateLimiter::direct(Quota::per_second(rate_limit_per_second)),
            key,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub(crate) fn route(&self, region: Region) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => region.base_url(),
        }
    }

    /// Shared request logic: waits for the rate limiter, authenticates and
    /// decodes a JSON body on `200 OK`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        self.limiter.until_ready().await;

        tracing::trace!(url, "[RIOT::CLIENT] GET");

        let res = self
            .http
            .get(url)
            .query(query)
            .header("X-Riot-Token", &self.key)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            status => {
                let message = res.text().await.unwrap_or_default();
                Err(FetchError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
