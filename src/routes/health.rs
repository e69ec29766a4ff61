use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::{mask_key, AppConfig};

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(config: web::Data<AppConfig>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let gemini_result = check_gemini(&config);
    health
        .services
        .insert("gemini".to_string(), gemini_result.clone());

    let unsplash_result = check_unsplash(&config);
    health
        .services
        .insert("unsplash".to_string(), unsplash_result);

    // Without Gemini no itinerary can be produced. Unsplash has a fallback.
    if gemini_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_gemini(config: &AppConfig) -> ServiceStatus {
    match &config.gemini.api_key {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Gemini API key configured ({}), model {}",
                mask_key(key),
                config.gemini.model
            )),
        },
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some("GEMINI_API_KEY not configured".to_string()),
        },
    }
}

fn check_unsplash(config: &AppConfig) -> ServiceStatus {
    match &config.unsplash.access_key {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Unsplash access key configured ({})", mask_key(key))),
        },
        None => ServiceStatus {
            status: "fallback".to_string(),
            details: Some(format!(
                "UNSPLASH_ACCESS_KEY not configured, using {}",
                config.placeholder_image_base_url
            )),
        },
    }
}
