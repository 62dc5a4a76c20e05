use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    models::event::{EventCategory, EventSearchParams, LocalEvent, PriceRange},
    AppState,
};

const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<EventCategory>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsQuery {
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Comma separated.
    pub interests: Option<String>,
}

#[derive(Serialize)]
struct EventsResponse {
    success: bool,
    events: Vec<LocalEvent>,
}

/// Defaults to a week from the reference day.
fn date_range(
    state: &AppState,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let start = start.unwrap_or_else(|| state.events.reference_date());
    let end = end.unwrap_or(start + Duration::days(DEFAULT_WINDOW_DAYS));

    if end < start {
        return Err(ApiError::bad_request("End date must not be before start date"));
    }
    Ok((start, end))
}

fn split_interests(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/*
    /api/events?location=&startDate=&endDate=&category=&minPrice=&maxPrice=
*/
pub async fn search(
    query: web::Query<EventsQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let (start, end) = date_range(&state, query.start_date, query.end_date)?;

    let mut params = EventSearchParams::new(query.location.unwrap_or_default(), start, end);
    params.category = query.category;
    params.radius = query.radius;
    if query.min_price.is_some() || query.max_price.is_some() {
        params.price_range = Some(PriceRange {
            min: query.min_price.unwrap_or(0.0),
            max: query.max_price.unwrap_or(f64::MAX),
        });
    }

    let events = state.events.search(&params);
    Ok(HttpResponse::Ok().json(EventsResponse {
        success: true,
        events,
    }))
}

/*
    /api/events/recommendations?location=&startDate=&endDate=&interests=a,b
*/
pub async fn recommendations(
    query: web::Query<RecommendationsQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let (start, end) = date_range(&state, query.start_date, query.end_date)?;
    let interests = split_interests(query.interests.as_deref());

    let events = state.events.recommendations(
        query.location.as_deref().unwrap_or_default(),
        &interests,
        start,
        end,
    );
    Ok(HttpResponse::Ok().json(EventsResponse {
        success: true,
        events,
    }))
}

/*
    /api/events/{id}
*/
pub async fn get_by_id(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    match state.events.event_by_id(&path.into_inner()) {
        Some(event) => Ok(HttpResponse::Ok().json(event)),
        None => Err(ApiError::NotFound("Event not found".to_string())),
    }
}
