use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::itinerary::ValidationError;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: Destination and Days are required.";
pub const MISCONFIGURATION_MESSAGE: &str =
    "Server misconfiguration: API Key missing. Please check the server environment.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate itinerary. Please try again.";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Everything that can stop an itinerary from being produced.
#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Text generation credential is not configured")]
    ServerMisconfiguration,

    #[error("Model output is not valid JSON: {source}")]
    UpstreamParse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Upstream call failed: {0}")]
    UpstreamCall(String),

    #[error("Model output failed validation: {0}")]
    Validation(#[from] ValidationError),
}

impl ItineraryError {
    /// The message the caller is allowed to see. Upstream detail stays in
    /// the server logs.
    pub fn client_message(&self) -> String {
        match self {
            ItineraryError::InvalidRequest(message) => message.clone(),
            ItineraryError::ServerMisconfiguration => MISCONFIGURATION_MESSAGE.to_string(),
            ItineraryError::UpstreamParse { .. }
            | ItineraryError::UpstreamCall(_)
            | ItineraryError::Validation(_) => GENERATION_FAILED_MESSAGE.to_string(),
        }
    }
}

impl ResponseError for ItineraryError {
    fn status_code(&self) -> StatusCode {
        match self {
            ItineraryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.client_message(),
        })
    }
}
