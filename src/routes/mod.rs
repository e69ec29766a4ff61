use actix_web::web;

pub mod health;
pub mod itinerary;

/// Mounts every route. Callers provide `web::Data<AppConfig>` and
/// `web::Data<ItineraryService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .app_data(itinerary::json_config())
                .route("/itinerary", web::post().to(itinerary::generate)),
        );
}
