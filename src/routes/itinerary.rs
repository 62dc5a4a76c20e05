use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::ApiError,
    models::{
        itinerary::{Itinerary, OptimizationConditions},
        preferences::{PreferencesError, PreferencesInput},
    },
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub preferences: Option<PreferencesInput>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub itinerary: Option<Value>,
    pub conditions: Option<Value>,
}

#[derive(Serialize)]
struct ItineraryResponse {
    success: bool,
    itinerary: Itinerary,
}

/*
    /api/generate-itinerary
*/
pub async fn generate(
    body: web::Json<GenerateRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let preferences = body
        .into_inner()
        .preferences
        .ok_or(PreferencesError::MissingFields)?
        .into_preferences()?;

    log::info!(
        "Generating {}-day itinerary for {}",
        preferences.duration,
        preferences.location
    );

    let itinerary = state.itineraries.generate(&preferences).await;

    Ok(HttpResponse::Ok().json(ItineraryResponse {
        success: true,
        itinerary,
    }))
}

fn has_itinerary_shape(value: &Value) -> bool {
    value.get("id").is_some_and(|id| id.is_string())
        && value.get("days").is_some_and(|days| days.is_array())
}

/*
    /api/optimize-itinerary
*/
pub async fn optimize(
    body: web::Json<OptimizeRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let OptimizeRequest {
        itinerary,
        conditions,
    } = body.into_inner();

    let itinerary = itinerary
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::bad_request("Itinerary is required"))?;
    let conditions = conditions
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::bad_request("Conditions are required"))?;

    if !has_itinerary_shape(&itinerary) {
        return Err(ApiError::bad_request("Invalid itinerary structure"));
    }
    let itinerary: Itinerary = serde_json::from_value(itinerary).map_err(|e| {
        log::warn!("Itinerary failed to decode: {}", e);
        ApiError::bad_request("Invalid itinerary structure")
    })?;
    let conditions: OptimizationConditions = serde_json::from_value(conditions)
        .map_err(|e| ApiError::bad_request(format!("Invalid conditions: {}", e)))?;

    match state.itineraries.optimize(itinerary, &conditions).await {
        Ok(itinerary) => Ok(HttpResponse::Ok().json(ItineraryResponse {
            success: true,
            itinerary,
        })),
        Err(e) => {
            log::error!("Error optimizing itinerary: {}", e);
            Err(ApiError::internal("Failed to optimize itinerary"))
        }
    }
}
