use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::clipboard::{format_plan_text, Clipboard};
use super::{BUDGET_OPTIONS, DURATION_OPTIONS, INTERESTS};
use crate::models::{ItineraryDocument, TripRequest};

pub const COPIED_RESET_AFTER: Duration = Duration::from_secs(2);
pub const MISSING_DESTINATION_MESSAGE: &str = "Please enter a destination.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Itinerary,
    Intel,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A request is already in flight.
    Busy,
    MissingDestination,
}

/// Values of the trip settings form.
#[derive(Debug, Clone, PartialEq)]
pub struct TripForm {
    pub destination: String,
    pub days: u32,
    pub budget: String,
    pub travelers: String,
    pub interests: Vec<String>,
    pub start_date: String,
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            destination: String::new(),
            days: 3,
            budget: "Medium".to_string(),
            travelers: "Couple".to_string(),
            interests: Vec::new(),
            start_date: String::new(),
        }
    }
}

impl TripForm {
    /// Adds the interest if it is not selected, removes it if it is.
    /// Interests outside the offered list are ignored.
    pub fn toggle_interest(&mut self, interest: &str) -> bool {
        if !INTERESTS.contains(&interest) {
            return false;
        }
        if let Some(pos) = self.interests.iter().position(|i| i == interest) {
            self.interests.remove(pos);
        } else {
            self.interests.push(interest.to_string());
        }
        true
    }

    pub fn set_days(&mut self, days: u32) -> bool {
        if !DURATION_OPTIONS.contains(&days) {
            return false;
        }
        self.days = days;
        true
    }

    pub fn set_budget(&mut self, budget: &str) -> bool {
        if !BUDGET_OPTIONS.contains(&budget) {
            return false;
        }
        self.budget = budget.to_string();
        true
    }

    pub fn to_request(&self) -> TripRequest {
        TripRequest {
            destination: self.destination.clone(),
            days: Some(self.days),
            budget: self.budget.clone(),
            travelers: self.travelers.clone(),
            interests: self.interests.clone(),
            start_date: Some(self.start_date.clone()).filter(|d| !d.trim().is_empty()),
        }
    }
}

/// View state of the planner page.
#[derive(Debug, Default)]
pub struct PlannerState {
    pub form: TripForm,
    itinerary: Option<ItineraryDocument>,
    loading: bool,
    loading_step: String,
    error: String,
    active_tab: Tab,
    copied_at: Option<Instant>,
}

impl PlannerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.itinerary.is_some() {
            Phase::Success
        } else if !self.error.is_empty() {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }

    pub fn itinerary(&self) -> Option<&ItineraryDocument> {
        self.itinerary.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn loading_step(&self) -> &str {
        &self.loading_step
    }

    pub fn error(&self) -> Option<&str> {
        Some(self.error.as_str()).filter(|e| !e.is_empty())
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Starts a submission and returns the request to send. The previous
    /// itinerary and error are cleared.
    pub fn begin_submission(&mut self) -> Result<TripRequest, SubmitRejected> {
        if self.loading {
            return Err(SubmitRejected::Busy);
        }
        if self.form.destination.trim().is_empty() {
            self.error = MISSING_DESTINATION_MESSAGE.to_string();
            return Err(SubmitRejected::MissingDestination);
        }

        self.loading = true;
        self.error.clear();
        self.itinerary = None;
        Ok(self.form.to_request())
    }

    pub fn set_loading_step(&mut self, step: impl Into<String>) {
        self.loading_step = step.into();
    }

    pub fn finish_submission(&mut self, outcome: Result<ItineraryDocument, String>) {
        self.loading = false;
        self.loading_step.clear();
        match outcome {
            Ok(itinerary) => {
                self.itinerary = Some(itinerary);
                self.error.clear();
            }
            Err(message) => {
                self.error = message;
            }
        }
    }

    /// Copies the current plan. Returns `false` when there is nothing to copy.
    pub fn copy_plan(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> bool {
        let Some(itinerary) = &self.itinerary else {
            return false;
        };
        clipboard.write_text(&format_plan_text(&self.form.destination, itinerary));
        self.copied_at = Some(now);
        true
    }

    /// Whether the "Copied!" label is showing at `now`.
    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .map_or(false, |at| now.saturating_duration_since(at) < COPIED_RESET_AFTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::clipboard::MemoryClipboard;

    #[test]
    fn test_toggle_interest_keeps_order() {
        let mut form = TripForm::default();
        form.toggle_interest("Food");
        form.toggle_interest("History");
        form.toggle_interest("Art");
        form.toggle_interest("History");
        assert_eq!(form.interests, vec!["Food", "Art"]);
    }

    #[test]
    fn test_form_only_accepts_offered_options() {
        let mut form = TripForm::default();
        assert!(!form.toggle_interest("Skydiving"));
        assert!(form.interests.is_empty());
        assert!(form.toggle_interest("Nightlife"));

        assert!(form.set_days(7));
        assert!(!form.set_days(6));
        assert_eq!(form.days, 7);

        assert!(form.set_budget("Luxury"));
        assert!(!form.set_budget("Unlimited"));
        assert_eq!(form.budget, "Luxury");
    }

    #[test]
    fn test_form_to_request() {
        let mut form = TripForm {
            destination: "Kyoto".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_request().start_date, None);
        assert_eq!(form.to_request().days, Some(3));
        form.start_date = "2026-05-01".to_string();
        assert_eq!(form.to_request().start_date.as_deref(), Some("2026-05-01"));
    }

    #[test]
    fn test_blank_destination_fails_locally() {
        let mut state = PlannerState::new();
        assert_eq!(state.begin_submission(), Err(SubmitRejected::MissingDestination));
        assert_eq!(state.error(), Some(MISSING_DESTINATION_MESSAGE));
        assert_eq!(state.phase(), Phase::Failed);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_submission_lifecycle() {
        let mut state = PlannerState::new();
        state.form.destination = "Kyoto".to_string();

        state.begin_submission().unwrap();
        assert_eq!(state.phase(), Phase::Submitting);
        assert_eq!(state.begin_submission(), Err(SubmitRejected::Busy));

        state.finish_submission(Err("Failed to generate itinerary. Please try again.".into()));
        assert_eq!(state.phase(), Phase::Failed);

        state.begin_submission().unwrap();
        assert_eq!(state.error(), None);
        state.finish_submission(Ok(ItineraryDocument::default()));
        assert_eq!(state.phase(), Phase::Success);
        assert_eq!(state.error(), None);

        state.begin_submission().unwrap();
        assert!(state.itinerary().is_none());
    }

    #[test]
    fn test_tabs_default_to_itinerary() {
        let mut state = PlannerState::new();
        assert_eq!(state.active_tab(), Tab::Itinerary);
        state.select_tab(Tab::Map);
        assert_eq!(state.active_tab(), Tab::Map);
    }

    #[test]
    fn test_copied_flag_resets_after_two_seconds() {
        let mut state = PlannerState::new();
        let mut clipboard = MemoryClipboard::default();
        let now = Instant::now();
        assert!(!state.copy_plan(&mut clipboard, now));
        assert!(clipboard.contents.is_none());

        state.form.destination = "Kyoto".to_string();
        state.begin_submission().unwrap();
        state.finish_submission(Ok(ItineraryDocument::default()));

        assert!(state.copy_plan(&mut clipboard, now));
        assert_eq!(clipboard.contents.as_deref(), Some("Trip to Kyoto\n\n"));
        assert!(state.is_copied(now + Duration::from_millis(1999)));
        assert!(!state.is_copied(now + COPIED_RESET_AFTER));
    }
}
