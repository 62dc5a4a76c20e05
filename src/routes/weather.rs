use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    models::weather::{WeatherConditions, WeatherData},
    services::weather_service::{analyze_conditions, recommendations_for},
    AppState,
};

const MAX_FORECAST_DAYS: u32 = 14;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub location: Option<String>,
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub weather: WeatherData,
    pub activity_type: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    conditions: WeatherConditions,
    recommendations: Vec<String>,
}

/*
    /api/weather?location=&days=
*/
pub async fn get_weather(
    query: web::Query<WeatherQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let location = query
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .ok_or_else(|| ApiError::bad_request("Location is required"))?;

    let weather = match query.days {
        Some(days) if days == 0 || days > MAX_FORECAST_DAYS => {
            return Err(ApiError::bad_request(format!(
                "Days must be between 1 and {}",
                MAX_FORECAST_DAYS
            )));
        }
        Some(days) => state.weather.forecast(&location, days).await,
        None => state.weather.current_weather(&location).await,
    };

    Ok(HttpResponse::Ok().json(weather))
}

/*
    /api/weather/analyze
*/
pub async fn analyze(body: web::Json<AnalyzeRequest>) -> Result<HttpResponse, ApiError> {
    let AnalyzeRequest {
        weather,
        activity_type,
    } = body.into_inner();

    let activity_type = activity_type.unwrap_or_default();
    let conditions = analyze_conditions(&weather, &activity_type);
    let recommendations = recommendations_for(&weather);

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        conditions,
        recommendations,
    }))
}
