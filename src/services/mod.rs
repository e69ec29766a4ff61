pub mod gemini_service;
pub mod itinerary_service;
pub mod photo_service;
pub mod prompt;

pub use gemini_service::{GeminiClient, GenerationError, TextGenerator};
pub use itinerary_service::ItineraryService;
pub use photo_service::{PhotoSearch, PhotoSearchError, UnsplashClient};
