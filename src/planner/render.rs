use url::form_urlencoded;

use super::state::Tab;
use crate::config::DEFAULT_PLACEHOLDER_IMAGE_BASE_URL;
use crate::models::{ActivityType, DayPlan, ItineraryDocument};
use crate::services::photo_service::fallback_image_url;

const MAPS_EMBED_URL: &str = "https://maps.google.com/maps";
const WEB_SEARCH_URL: &str = "https://www.google.com/search";

/// Embeddable map centred on a place.
pub fn maps_embed_url(query: &str) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .append_pair("output", "embed")
        .finish();
    format!("{}?{}", MAPS_EMBED_URL, params)
}

pub fn web_search_url(query: &str) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .finish();
    format!("{}?{}", WEB_SEARCH_URL, params)
}

/// The hero image to show. Documents that arrive without one get a
/// placeholder keyed on the first two words of the title.
pub fn display_hero_image(itinerary: &ItineraryDocument) -> String {
    if !itinerary.hero_image.trim().is_empty() {
        return itinerary.hero_image.clone();
    }
    let keywords: Vec<&str> = itinerary.trip_title.split_whitespace().take(2).collect();
    fallback_image_url(DEFAULT_PLACEHOLDER_IMAGE_BASE_URL, &keywords.join(","))
}

/// Illustration for an activity card. `lock` pins the picture per position.
pub fn activity_image_url(kind: ActivityType, lock: usize) -> String {
    let keywords = match kind {
        ActivityType::Food => "food,meal",
        _ => "landmark,travel",
    };
    format!(
        "{}/600/400/{}?lock={}",
        DEFAULT_PLACEHOLDER_IMAGE_BASE_URL, keywords, lock
    )
}

fn kind_label(kind: ActivityType) -> &'static str {
    match kind {
        ActivityType::Food => "food",
        ActivityType::Sightseeing => "sightseeing",
        ActivityType::Relax => "relax",
    }
}

/// Hero block plus the selected tab, as plain text.
pub fn render_dossier(itinerary: &ItineraryDocument, tab: Tab, destination: &str) -> String {
    let mut out = String::new();
    out.push_str(&itinerary.trip_title);
    out.push('\n');
    if !itinerary.summary.is_empty() {
        out.push_str(&itinerary.summary);
        out.push('\n');
    }
    out.push_str(&format!("Image: {}\n\n", display_hero_image(itinerary)));
    out.push_str(&render_tab(itinerary, tab, destination));
    out
}

pub fn render_tab(itinerary: &ItineraryDocument, tab: Tab, destination: &str) -> String {
    match tab {
        Tab::Itinerary => itinerary
            .days
            .iter()
            .map(render_day)
            .collect::<Vec<_>>()
            .join("\n"),
        Tab::Intel => render_intel(itinerary),
        Tab::Map => render_map(itinerary, destination),
    }
}

fn render_day(day: &DayPlan) -> String {
    let mut out = format!("Day {}: {}", day.day, day.theme);
    if let Some(date) = day.date.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!(" ({})", date));
    }
    out.push('\n');

    for (idx, activity) in day.activities.iter().enumerate() {
        out.push_str(&format!(
            "  [{}] {} ({})\n",
            activity.time,
            activity.activity,
            kind_label(activity.kind)
        ));
        if !activity.description.is_empty() {
            out.push_str(&format!("      {}\n", activity.description));
        }
        if let Some(location) = activity.location.as_deref().filter(|l| !l.is_empty()) {
            out.push_str(&format!("      @ {}\n", location));
        }
        out.push_str(&format!("      {}\n", activity_image_url(activity.kind, idx)));
    }
    out
}

fn render_intel(itinerary: &ItineraryDocument) -> String {
    let mut out = String::from("Packing Essentials\n");
    for item in &itinerary.packing_list {
        out.push_str(&format!("  - {}\n", item));
    }

    out.push_str("\nCurrency & Money\n");
    out.push_str(&format!("  Currency: {}\n", itinerary.currency.code));
    out.push_str(&format!("  Rate: {}\n", itinerary.currency.rate));
    if !itinerary.currency.tips.is_empty() {
        out.push_str(&format!("  {}\n", itinerary.currency.tips));
    }

    out.push_str("\nLocal Tips & Etiquette\n");
    for tip in &itinerary.local_tips {
        out.push_str(&format!("  - {}\n", tip));
    }

    out.push_str("\nExpected Weather\n");
    out.push_str(&format!("  {}\n", itinerary.weather));
    out
}

fn render_map(itinerary: &ItineraryDocument, destination: &str) -> String {
    let mut out = format!("Map: {}\n", maps_embed_url(destination));
    for activity in itinerary.activities() {
        let query = match activity.location.as_deref().filter(|l| !l.is_empty()) {
            Some(location) => format!("{} {} {}", activity.activity, location, destination),
            None => format!("{} {}", activity.activity, destination),
        };
        out.push_str(&format!("  - {}: {}\n", activity.activity, web_search_url(&query)));
    }
    out
}
