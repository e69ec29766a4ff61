#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use actix_web::{web, App};
use async_trait::async_trait;
use serde_json::json;

use wanderlust_api::{
    config::AppConfig,
    routes,
    services::{GenerationError, ItineraryService, PhotoSearch, PhotoSearchError, TextGenerator},
};

pub const PLACEHOLDER_BASE: &str = "https://placeholder.test";

pub enum Reply {
    Text(String),
    Fail,
}

/// Text generator double that records every prompt it receives.
pub struct FakeGenerator {
    reply: Reply,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Reply::Fail,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail => Err(GenerationError::Status {
                status: 503,
                body: "model overloaded".to_string(),
            }),
        }
    }
}

pub enum PhotoOutcome {
    Found(String),
    Nothing,
    Fail,
}

pub struct FakePhotos {
    outcome: PhotoOutcome,
    pub calls: AtomicUsize,
}

impl FakePhotos {
    pub fn new(outcome: PhotoOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoSearch for FakePhotos {
    async fn search(&self, _query: &str) -> Result<Option<String>, PhotoSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            PhotoOutcome::Found(url) => Ok(Some(url.clone())),
            PhotoOutcome::Nothing => Ok(None),
            PhotoOutcome::Fail => Err(PhotoSearchError::Status(500)),
        }
    }
}

pub struct TestApp {
    pub generator: Option<Arc<FakeGenerator>>,
    pub photos: Option<Arc<FakePhotos>>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new(generator: FakeGenerator) -> Self {
        let mut config = AppConfig::default().with_gemini_key("test-gemini-key-1234");
        config.placeholder_image_base_url = PLACEHOLDER_BASE.to_string();
        Self {
            generator: Some(Arc::new(generator)),
            photos: None,
            config,
        }
    }

    /// An app whose Gemini key was never configured.
    pub fn without_generator() -> Self {
        let mut app = Self::new(FakeGenerator::failing());
        app.generator = None;
        app.config.gemini.api_key = None;
        app
    }

    pub fn with_photos(mut self, photos: FakePhotos) -> Self {
        self.photos = Some(Arc::new(photos));
        self.config = self.config.with_unsplash_key("test-unsplash-key");
        self
    }

    pub fn generator_calls(&self) -> usize {
        self.generator.as_ref().map_or(0, |g| g.call_count())
    }

    pub fn photo_calls(&self) -> usize {
        self.photos.as_ref().map_or(0, |p| p.call_count())
    }

    pub fn service(&self) -> ItineraryService {
        ItineraryService::new(
            self.generator
                .clone()
                .map(|g| g as Arc<dyn TextGenerator>),
            self.photos.clone().map(|p| p as Arc<dyn PhotoSearch>),
            self.config.placeholder_image_base_url.clone(),
        )
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.service()))
            .configure(routes::configure)
    }
}

/// Model output for an itinerary with `days` days, two activities each.
pub fn itinerary_json(title: &str, days: usize) -> serde_json::Value {
    let days: Vec<serde_json::Value> = (1..=days)
        .map(|day| {
            json!({
                "day": day,
                "theme": format!("Day {} theme", day),
                "activities": [
                    {"time": "Morning", "activity": format!("Temple visit {}", day), "type": "sightseeing", "description": "Quiet grounds", "location": "Higashiyama"},
                    {"time": "Evening", "activity": format!("Dinner {}", day), "type": "food", "description": "Kaiseki"}
                ]
            })
        })
        .collect();

    json!({
        "tripTitle": title,
        "summary": "A short summary.",
        "currency": {"code": "JPY", "rate": "1 USD = 150 JPY", "tips": "Carry cash"},
        "weather": "Mild and clear",
        "packingList": ["Walking shoes", "Umbrella"],
        "localTips": ["Remove shoes indoors"],
        "days": days
    })
}

pub fn kyoto_request() -> serde_json::Value {
    json!({
        "destination": "Kyoto",
        "days": 3,
        "budget": "Medium",
        "travelers": "Couple",
        "interests": ["Food", "History"]
    })
}
