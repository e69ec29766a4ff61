use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    error::{ItineraryError, MISSING_FIELDS_MESSAGE},
    models::TripRequest,
    services::ItineraryService,
};

/// Bodies that are not a JSON trip request are answered like a request with
/// missing fields. A missing credential still wins over a bad body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        let configured = req
            .app_data::<web::Data<ItineraryService>>()
            .map_or(false, |service| service.has_text_generator());
        if !configured {
            log::error!("API Error: {}", ItineraryError::ServerMisconfiguration);
            return ItineraryError::ServerMisconfiguration.into();
        }

        log::warn!("Rejected itinerary request body: {}", err);
        ItineraryError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string()).into()
    })
}

/*
    /api/itinerary
*/
pub async fn generate(
    service: web::Data<ItineraryService>,
    input: web::Json<TripRequest>,
) -> Result<HttpResponse, ItineraryError> {
    match service.generate(&input).await {
        Ok(document) => Ok(HttpResponse::Ok().json(document)),
        Err(err) => {
            if err.status_code().is_server_error() {
                log::error!("API Error: {}", err);
            } else {
                log::warn!("Bad itinerary request: {}", err);
            }
            Err(err)
        }
    }
}
