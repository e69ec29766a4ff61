use crate::models::ItineraryDocument;

/// Where "Copy plan" writes its text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str);
}

/// Keeps the last copied text. Used when there is no system clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}

/// Plain-text summary of a plan: a title line, then one block per day with
/// its theme and one line per activity.
pub fn format_plan_text(destination: &str, itinerary: &ItineraryDocument) -> String {
    let days: Vec<String> = itinerary
        .days
        .iter()
        .map(|day| {
            let activities: Vec<String> = day
                .activities
                .iter()
                .map(|activity| format!("- {}: {}", activity.time, activity.activity))
                .collect();
            format!("Day {}: {}\n{}", day.day, day.theme, activities.join("\n"))
        })
        .collect();

    format!("Trip to {}\n\n{}", destination, days.join("\n\n"))
}
