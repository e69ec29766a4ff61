use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{ItineraryDocument, TripRequest};

/// Errors as the planner shows them. The `Display` text is what ends up in
/// the error banner.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Server Error ({status}): API endpoint not found or server crashed.")]
    Server { status: u16 },

    #[error("Failed to contact the Travel Agent API.")]
    Transport,

    #[error("The Travel Agent API returned an unreadable itinerary.")]
    Decode,
}

/// The planner's only backend.
#[async_trait]
pub trait ItineraryBackend: Send + Sync {
    async fn request_itinerary(
        &self,
        request: &TripRequest,
    ) -> Result<ItineraryDocument, BackendError>;
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// Calls `POST {base_url}/api/itinerary`.
#[derive(Clone)]
pub struct PlannerClient {
    http_client: Client,
    base_url: String,
}

impl PlannerClient {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ItineraryBackend for PlannerClient {
    async fn request_itinerary(
        &self,
        request: &TripRequest,
    ) -> Result<ItineraryDocument, BackendError> {
        let response = self
            .http_client
            .post(format!("{}/api/itinerary", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Itinerary request failed: {}", e);
                BackendError::Transport
            })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(false, |value| value.contains("application/json"));
        let body = response.bytes().await.map_err(|e| {
            log::error!("Failed to read itinerary response: {}", e);
            BackendError::Transport
        })?;

        if !status.is_success() {
            if !is_json {
                log::error!(
                    "Non-JSON Error Response: {}",
                    String::from_utf8_lossy(&body)
                );
                return Err(BackendError::Server {
                    status: status.as_u16(),
                });
            }

            let message = serde_json::from_slice::<ErrorPayload>(&body)
                .ok()
                .and_then(|payload| payload.error)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("Server responded with {}", status.as_u16()));
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            log::error!("Failed to decode itinerary: {}", e);
            BackendError::Decode
        })
    }
}
