use std::sync::Arc;

use actix_web::web;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::AppConfig;
use services::{
    events_service::EventsService,
    i18n_service::Language,
    itinerary_service::ItineraryService,
    maps_service::MapsService,
    vertex_ai_service::{TextGenerator, VertexAiClient},
    weather_service::WeatherService,
};

/// Shared, read-only service handles. Nothing here is mutated after start-up.
pub struct AppState {
    pub config: AppConfig,
    pub itineraries: ItineraryService,
    pub weather: WeatherService,
    pub events: EventsService,
    pub maps: Option<MapsService>,
    pub default_language: Language,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let model: Option<Arc<dyn TextGenerator>> = match config.vertex_ai.clone() {
            Some(vertex) => match VertexAiClient::new(vertex) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    log::error!("Failed to create Vertex AI client: {}", e);
                    None
                }
            },
            None => {
                log::warn!("GOOGLE_CLOUD_PROJECT_ID not set, itineraries will use mock data");
                None
            }
        };

        Self::with_model(config, model)
    }

    /// Builds the state around an explicit text model, or none for mock
    /// itineraries.
    pub fn with_model(config: AppConfig, model: Option<Arc<dyn TextGenerator>>) -> Self {
        let maps = config
            .maps
            .clone()
            .and_then(|maps| match MapsService::new(maps) {
                Ok(service) => Some(service),
                Err(e) => {
                    log::error!("Failed to create maps client: {}", e);
                    None
                }
            });

        Self {
            itineraries: ItineraryService::new(model),
            weather: WeatherService::new(config.weather.clone()),
            events: EventsService::new(),
            maps,
            default_language: Language::parse_or_default(&config.default_language),
            config,
        }
    }
}

/// Registers every route. `AppState` is expected in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(routes::json_config())
        .app_data(routes::query_config())
        .route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/generate-itinerary")
                        .route(web::post().to(routes::itinerary::generate))
                        .default_service(web::to(routes::method_not_allowed)),
                )
                .service(
                    web::resource("/optimize-itinerary")
                        .route(web::post().to(routes::itinerary::optimize))
                        .default_service(web::to(routes::method_not_allowed)),
                )
                .service(
                    web::resource("/places/search")
                        .route(web::get().to(routes::places::search))
                        .default_service(web::to(routes::method_not_allowed)),
                )
                .route(
                    "/places/{place_id}",
                    web::get().to(routes::places::details),
                )
                .route("/geocode", web::get().to(routes::places::geocode))
                .route("/directions", web::get().to(routes::places::directions))
                .route("/weather", web::get().to(routes::weather::get_weather))
                .route(
                    "/weather/analyze",
                    web::post().to(routes::weather::analyze),
                )
                .route("/events", web::get().to(routes::events::search))
                .route(
                    "/events/recommendations",
                    web::get().to(routes::events::recommendations),
                )
                .route("/events/{id}", web::get().to(routes::events::get_by_id))
                .route("/languages", web::get().to(routes::languages::list))
                .route(
                    "/translations",
                    web::get().to(routes::languages::translations),
                )
                .route("/format", web::get().to(routes::languages::format))
                .route("/inventory", web::get().to(routes::bookings::inventory))
                .route("/bookings/draft", web::post().to(routes::bookings::draft))
                .route(
                    "/bookings/cancellation",
                    web::post().to(routes::bookings::cancellation),
                ),
        );
}
