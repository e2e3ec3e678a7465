//! reqwest-backed remote gateway

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::{PHOTO_PAGE_SIZE, RemoteError, RemoteGateway, Result};
use crate::catalog::{AnimalDetail, PhotoPage};
use crate::config::RemoteConfig;

/// HTTP client for the animals API and the photo search API
pub struct HttpRemoteGateway {
    client: Client,
    animals_url: String,
    animals_api_key: String,
    photos_url: String,
    photos_api_key: String,
}

impl HttpRemoteGateway {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;

        if config.animals_api_key.is_none() {
            warn!("ANIMALS_API_KEY is not set, animal detail requests will likely be rejected");
        }
        if config.photos_api_key.is_none() {
            warn!("PEXELS_API_KEY is not set, photo requests will likely be rejected");
        }

        Ok(Self {
            client,
            animals_url: config.animals_url.clone(),
            animals_api_key: config.animals_api_key.clone().unwrap_or_default(),
            photos_url: config.photos_url.clone(),
            photos_api_key: config.photos_api_key.clone().unwrap_or_default(),
        })
    }

    async fn get(&self, request: reqwest::RequestBuilder, endpoint: &str) -> Result<Bytes> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout
            } else if e.is_builder() {
                RemoteError::InvalidUrl(e.to_string())
            } else {
                RemoteError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "Remote returned unexpected status");
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::RequestFailed(format!("Failed to read body: {}", e)))?;

        if body.is_empty() {
            return Err(RemoteError::NoData);
        }

        debug!(
            endpoint,
            size = body.len(),
            body = %String::from_utf8_lossy(&body),
            "Remote response received"
        );

        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

#[async_trait]
impl RemoteGateway for HttpRemoteGateway {
    async fn fetch_animal_details(&self, name: &str) -> Result<AnimalDetail> {
        let request = self
            .client
            .get(&self.animals_url)
            .query(&[("name", name)])
            .header("X-Api-Key", &self.animals_api_key);

        let body = self.get(request, "animals").await?;
        let animals: Vec<AnimalDetail> = decode(&body)?;

        animals.into_iter().next().ok_or(RemoteError::NoData)
    }

    async fn fetch_images(&self, query: &str, page: u32) -> Result<PhotoPage> {
        let per_page = PHOTO_PAGE_SIZE.to_string();
        let page_param = page.to_string();
        let request = self
            .client
            .get(&self.photos_url)
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
            ])
            .header("Authorization", &self.photos_api_key);

        let body = self.get(request, "photos").await?;
        decode(&body)
    }
}
