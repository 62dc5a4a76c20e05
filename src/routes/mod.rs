use actix_web::{web, HttpResponse};

use crate::error::ApiError;

pub mod bookings;
pub mod events;
pub mod health;
pub mod itinerary;
pub mod languages;
pub mod places;
pub mod weather;

/// Malformed JSON bodies answer 400 with the usual `{ "error": ... }` body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("Rejected body for {}: {}", req.path(), err);
        ApiError::bad_request(format!("Invalid request body: {}", err)).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("Rejected query for {}: {}", req.path(), err);
        ApiError::bad_request(format!("Invalid query parameters: {}", err)).into()
    })
}

pub async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}
