use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use wanderlust_api::{config::AppConfig, routes, services::ItineraryService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env();
    let service = ItineraryService::from_config(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let host = config.host.clone();
    let port = config.port;
    log::info!("Attempting to bind to {}:{}", host, port);

    let config = web::Data::new(config);
    let service = web::Data::new(service);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allowed_header(header::CONTENT_TYPE)
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(config.clone())
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
