use std::time::Duration;

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(800);

/// Status lines shown while a plan is being generated. They are cosmetic
/// and say nothing about how far the real request has got.
pub fn loading_steps(destination: &str, start_date: &str) -> [String; 4] {
    let season = if start_date.trim().is_empty() {
        "optimal season"
    } else {
        start_date.trim()
    };

    [
        "Connecting to secure API...".to_string(),
        format!("Analysing geography for {}...", destination),
        format!("Checking forecast for {}...", season),
        "Finalizing logistics...".to_string(),
    ]
}
