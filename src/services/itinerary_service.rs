use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::ItineraryError;
use crate::models::{ItineraryDocument, TripRequest};
use crate::services::gemini_service::{GeminiClient, TextGenerator};
use crate::services::photo_service::{resolve_hero_image, PhotoSearch, UnsplashClient};
use crate::services::prompt::build_prompt;

fn leading_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n?").expect("valid regex"))
}

fn trailing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n?[ \t]*```\s*$").expect("valid regex"))
}

/// Removes markdown code fences wrapped around a model response.
/// Unwrapped input comes back trimmed, so applying this twice changes nothing.
pub fn strip_code_fences(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let without_leading = leading_fence().replace(&current, "");
        let stripped = trailing_fence().replace(&without_leading, "").trim().to_string();
        if stripped == current {
            return stripped;
        }
        current = stripped;
    }
}

/// Parses the model's raw text as JSON. The raw text is logged on failure
/// and never leaves the server.
pub fn parse_model_json(raw: &str) -> Result<Value, ItineraryError> {
    let json_string = strip_code_fences(raw);
    serde_json::from_str(&json_string).map_err(|source| {
        log::error!("JSON Parse Error: {} in model output: {}", source, json_string);
        ItineraryError::UpstreamParse {
            raw: raw.to_string(),
            source,
        }
    })
}

/// Turns a trip request into an itinerary: one text generation call and
/// one hero image lookup, run together.
pub struct ItineraryService {
    text_generator: Option<Arc<dyn TextGenerator>>,
    photo_search: Option<Arc<dyn PhotoSearch>>,
    placeholder_image_base_url: String,
}

impl ItineraryService {
    pub fn new(
        text_generator: Option<Arc<dyn TextGenerator>>,
        photo_search: Option<Arc<dyn PhotoSearch>>,
        placeholder_image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            text_generator,
            photo_search,
            placeholder_image_base_url: placeholder_image_base_url.into(),
        }
    }

    /// Wires the Gemini and Unsplash clients for whichever keys are set.
    pub fn from_config(config: &AppConfig) -> reqwest::Result<Self> {
        let http_client = config.http_client()?;

        let text_generator = match &config.gemini.api_key {
            Some(key) => {
                log::info!("Gemini client configured with model {}", config.gemini.model);
                Some(Arc::new(GeminiClient::new(http_client.clone(), key, &config.gemini))
                    as Arc<dyn TextGenerator>)
            }
            None => {
                log::warn!("GEMINI_API_KEY not set. Itinerary requests will fail until it is configured");
                None
            }
        };

        let photo_search = match &config.unsplash.access_key {
            Some(key) => Some(Arc::new(UnsplashClient::new(http_client, key, &config.unsplash))
                as Arc<dyn PhotoSearch>),
            None => {
                log::info!("UNSPLASH_ACCESS_KEY not set. Using placeholder hero images");
                None
            }
        };

        Ok(Self::new(
            text_generator,
            photo_search,
            config.placeholder_image_base_url.clone(),
        ))
    }

    pub fn has_text_generator(&self) -> bool {
        self.text_generator.is_some()
    }

    pub fn has_photo_search(&self) -> bool {
        self.photo_search.is_some()
    }

    pub async fn generate(&self, request: &TripRequest) -> Result<ItineraryDocument, ItineraryError> {
        let generator = self
            .text_generator
            .as_deref()
            .ok_or(ItineraryError::ServerMisconfiguration)?;
        let trip = request.validate()?;

        log::info!(
            "Generating {}-day itinerary for {} ({}, {})",
            trip.days,
            trip.destination,
            trip.budget,
            trip.travelers
        );

        let prompt = build_prompt(&trip);
        let (text_result, hero_image) = futures::join!(
            generator.generate(&prompt),
            resolve_hero_image(
                self.photo_search.as_deref(),
                &self.placeholder_image_base_url,
                &trip.destination,
            )
        );

        let raw = text_result.map_err(|e| ItineraryError::UpstreamCall(e.to_string()))?;
        let value = parse_model_json(&raw)?;
        let mut document = ItineraryDocument::from_model_output(value, trip.start_date)?;
        document.hero_image = hero_image;

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```\n"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let once = strip_code_fences("```json\n{\"days\": []}\n```");
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn test_fenced_and_bare_parse_the_same() {
        let payload = json!({"tripTitle": "Kyoto", "days": [{"day": 1, "theme": "Temples"}]});
        let bare = payload.to_string();
        let fenced = format!("```json\n{}\n```", bare);
        assert_eq!(parse_model_json(&bare).unwrap(), parse_model_json(&fenced).unwrap());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_model_json("```json\n{\"tripTitle\": \"Kyo").unwrap_err();
        match err {
            ItineraryError::UpstreamParse { raw, .. } => assert!(raw.contains("Kyo")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
