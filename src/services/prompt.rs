use crate::models::ValidatedTrip;

const SCHEMA_TEMPLATE: &str = r#"{
  "tripTitle": "Creative Trip Name",
  "summary": "A 2-sentence captivating summary.",
  "currency": { "code": "USD/JPY/EUR", "rate": "Approximate exchange rate to USD", "tips": "Cash vs Card advice" },
  "weather": "Brief forecast for the travel dates or typical season",
  "packingList": ["item 1", "item 2", "item 3", "item 4", "item 5"],
  "localTips": ["cultural tip 1", "safety tip 2", "transport tip 3"],
  "days": [
    {
      "day": 1,
      "date": "YYYY-MM-DD (only when a start date is given)",
      "theme": "Theme of the day",
      "activities": [
        {
          "time": "Morning/Afternoon/Evening",
          "activity": "Name of activity",
          "type": "food" | "sightseeing" | "relax",
          "description": "Short description",
          "location": "Neighborhood/Area"
        }
      ]
    }
  ]
}"#;

/// Builds the single free-text instruction sent to the model.
pub fn build_prompt(trip: &ValidatedTrip) -> String {
    let interests = if trip.interests.is_empty() {
        "No specific interests".to_string()
    } else {
        trip.interests.join(", ")
    };

    let timing = match trip.start_date {
        Some(start) => format!(
            "Starting {}. Give each day its calendar date.",
            start.format("%Y-%m-%d")
        ),
        None => "Assume the optimal season for this destination.".to_string(),
    };

    format!(
        r#"You are an expert travel agent. Create a comprehensive travel plan for a {days}-day trip to {destination}.

User Profile:
- Budget: {budget}
- Travelers: {travelers}
- Interests: {interests}
- Dates: {timing}

Instructions:
1. Return ONLY valid JSON, with no markdown formatting.
2. The JSON must follow this structure exactly:
{schema}
3. "days" must contain exactly {days} entries, numbered from 1.
4. Every activity "type" must be one of "food", "sightseeing" or "relax".
5. Be specific with restaurant names and locations."#,
        days = trip.days,
        destination = trip.destination,
        budget = trip.budget,
        travelers = trip.travelers,
        interests = interests,
        timing = timing,
        schema = SCHEMA_TEMPLATE,
    )
}
