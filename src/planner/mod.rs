//! Client side of the trip planner: form and view state, the cosmetic
//! progress sequence, the backend call and plain-text rendering of the
//! returned dossier.

use std::time::Duration;

pub mod client;
pub mod clipboard;
pub mod progress;
pub mod render;
pub mod state;

pub use client::{BackendError, ItineraryBackend, PlannerClient};
pub use clipboard::{format_plan_text, Clipboard, MemoryClipboard};
pub use state::{Phase, PlannerState, SubmitRejected, Tab, TripForm};

pub const INTERESTS: [&str; 7] = [
    "History",
    "Food",
    "Nature",
    "Art",
    "Shopping",
    "Nightlife",
    "Relaxation",
];
pub const DURATION_OPTIONS: [u32; 8] = [1, 2, 3, 4, 5, 7, 10, 14];
pub const BUDGET_OPTIONS: [&str; 3] = ["Budget", "Medium", "Luxury"];

/// Drives one planner page against a backend.
pub struct Planner<B> {
    pub state: PlannerState,
    backend: B,
    step_delay: Duration,
}

impl<B: ItineraryBackend> Planner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            state: PlannerState::new(),
            backend,
            step_delay: progress::DEFAULT_STEP_DELAY,
        }
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn generate(&mut self) -> Result<(), SubmitRejected> {
        self.generate_with_progress(|_| {}).await
    }

    /// Plays the progress steps, then sends the request. `on_step` sees each
    /// step as it is shown. Backend failures end up in `state.error()`.
    pub async fn generate_with_progress<F>(&mut self, mut on_step: F) -> Result<(), SubmitRejected>
    where
        F: FnMut(&str),
    {
        let request = self.state.begin_submission()?;

        let steps = progress::loading_steps(&self.state.form.destination, &self.state.form.start_date);
        for step in steps {
            on_step(&step);
            self.state.set_loading_step(step);
            tokio::time::sleep(self.step_delay).await;
        }

        let outcome = self
            .backend
            .request_itinerary(&request)
            .await
            .map_err(|e| e.to_string());
        self.state.finish_submission(outcome);
        Ok(())
    }
}
