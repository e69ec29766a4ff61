pub mod itinerary;
pub mod trip_request;

pub use itinerary::{Activity, ActivityType, Currency, DayPlan, ItineraryDocument, ValidationError};
pub use trip_request::{TripRequest, ValidatedTrip};
