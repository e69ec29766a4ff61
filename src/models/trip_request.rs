use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::error::{ItineraryError, MISSING_FIELDS_MESSAGE};

pub const DEFAULT_BUDGET: &str = "Medium";
pub const DEFAULT_TRAVELERS: &str = "Couple";

fn default_budget() -> String {
    DEFAULT_BUDGET.to_string()
}

fn default_travelers() -> String {
    DEFAULT_TRAVELERS.to_string()
}

/// Body of `POST /api/itinerary`.
///
/// `days` is accepted as a number or a numeric string since form selects
/// submit strings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    #[serde(default)]
    pub destination: String,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub days: Option<u32>,
    #[serde(default = "default_budget")]
    pub budget: String,
    #[serde(default = "default_travelers")]
    pub travelers: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

impl Default for TripRequest {
    fn default() -> Self {
        Self {
            destination: String::new(),
            days: None,
            budget: default_budget(),
            travelers: default_travelers(),
            interests: Vec::new(),
            start_date: None,
        }
    }
}

/// A request that passed validation. Only this type reaches the prompt
/// builder and the outbound clients.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTrip {
    pub destination: String,
    pub days: u32,
    pub budget: String,
    pub travelers: String,
    pub interests: Vec<String>,
    pub start_date: Option<NaiveDate>,
}

impl TripRequest {
    pub fn validate(&self) -> Result<ValidatedTrip, ItineraryError> {
        let destination = self.destination.trim();
        let days = self.days.unwrap_or(0);
        if destination.is_empty() || days == 0 {
            return Err(ItineraryError::InvalidRequest(
                MISSING_FIELDS_MESSAGE.to_string(),
            ));
        }

        let start_date = match self.start_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ItineraryError::InvalidRequest(format!(
                    "Invalid startDate '{}': expected YYYY-MM-DD.",
                    raw
                ))
            })?),
        };

        Ok(ValidatedTrip {
            destination: destination.to_string(),
            days,
            budget: self.budget.trim().to_string(),
            travelers: self.travelers.trim().to_string(),
            interests: self
                .interests
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .map(str::to_string)
                .collect(),
            start_date,
        })
    }
}
