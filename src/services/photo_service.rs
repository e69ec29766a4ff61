use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use thiserror::Error;
use url::form_urlencoded;

use crate::config::UnsplashConfig;

/// Keyword photo lookup. `Ok(None)` means the search worked but found
/// nothing usable.
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Option<String>, PhotoSearchError>;
}

#[derive(Debug, Error)]
pub enum PhotoSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unsplash responded with {0}")]
    Status(u16),
}

#[derive(Debug, Deserialize)]
struct SearchPhotosResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
}

#[derive(Clone)]
pub struct UnsplashClient {
    http_client: Client,
    access_key: String,
    base_url: String,
}

impl UnsplashClient {
    pub fn new(http_client: Client, access_key: impl Into<String>, config: &UnsplashConfig) -> Self {
        Self {
            http_client,
            access_key: access_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PhotoSearch for UnsplashClient {
    async fn search(&self, query: &str) -> Result<Option<String>, PhotoSearchError> {
        let response = self
            .http_client
            .get(format!("{}/search/photos", self.base_url))
            .query(&[("query", query), ("orientation", "landscape"), ("per_page", "1")])
            .header(AUTHORIZATION, format!("Client-ID {}", self.access_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoSearchError::Status(status.as_u16()));
        }

        let payload: SearchPhotosResponse = response.json().await?;
        Ok(payload
            .results
            .into_iter()
            .next()
            .and_then(|photo| photo.urls.regular)
            .filter(|url| !url.trim().is_empty()))
    }
}

/// Keyword placeholder image for a destination. Same input, same URL.
pub fn fallback_image_url(base_url: &str, destination: &str) -> String {
    let keywords: Vec<String> = destination
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| form_urlencoded::byte_serialize(part.as_bytes()).collect())
        .collect();

    let mut tags = keywords.join(",");
    if !tags.is_empty() {
        tags.push(',');
    }
    tags.push_str("travel");

    format!("{}/1600/900/{}/all", base_url.trim_end_matches('/'), tags)
}

/// Resolves the hero image for a destination. Never fails: any problem with
/// the photo search is logged and replaced by the placeholder URL.
pub async fn resolve_hero_image(
    search: Option<&dyn PhotoSearch>,
    placeholder_base_url: &str,
    destination: &str,
) -> String {
    let fallback = || fallback_image_url(placeholder_base_url, destination);

    let Some(search) = search else {
        log::debug!("No photo search configured, using placeholder for {}", destination);
        return fallback();
    };

    match search.search(destination).await {
        Ok(Some(url)) => url,
        Ok(None) => {
            log::warn!("Photo search found nothing for {}, using placeholder", destination);
            fallback()
        }
        Err(e) => {
            log::warn!("Image fetch failed for {}: {}. Using placeholder", destination, e);
            fallback()
        }
    }
}
