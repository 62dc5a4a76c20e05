use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    models::{
        itinerary::GeoPoint,
        place::{Directions, Place, TravelMode},
    },
    AppState,
};

const DEFAULT_RADIUS: u32 = 5000;

/// Raw query; numbers stay strings so bad values get their own messages.
#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
}

#[derive(Serialize)]
struct PlacesResponse {
    success: bool,
    places: Vec<Place>,
    query: String,
    location: Option<GeoPoint>,
    radius: u32,
    #[serde(rename = "type")]
    place_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub address: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(default)]
    pub mode: TravelMode,
}

#[derive(Serialize)]
struct GeocodeResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<GeoPoint>,
}

#[derive(Serialize)]
struct DirectionsResponse {
    success: bool,
    directions: Option<Directions>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Location is used only when both coordinates are supplied.
fn parse_location(lat: Option<&str>, lng: Option<&str>) -> Result<Option<GeoPoint>, ApiError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => match (parse_coordinate(lat), parse_coordinate(lng)) {
            (Some(lat), Some(lng)) => Ok(Some(GeoPoint::new(lat, lng))),
            _ => Err(ApiError::bad_request("Invalid latitude or longitude values")),
        },
        _ => Ok(None),
    }
}

fn parse_radius(radius: Option<&str>) -> Result<u32, ApiError> {
    match radius {
        None => Ok(DEFAULT_RADIUS),
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|_| ApiError::bad_request("Invalid radius value")),
    }
}

/*
    /api/places/search?q=&lat=&lng=&radius=&type=
*/
pub async fn search(
    query: web::Query<PlacesQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();

    let q = query
        .q
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter \"q\" is required"))?;
    let location = parse_location(query.lat.as_deref(), query.lng.as_deref())?;
    let radius = parse_radius(query.radius.as_deref())?;

    let places = match &state.maps {
        None => {
            log::warn!("GOOGLE_MAPS_API_KEY not set, returning no places for {}", q);
            Vec::new()
        }
        Some(maps) => {
            let origin = location.unwrap_or_default();
            let result = match query.place_type.as_deref() {
                Some("restaurant") => maps.search_restaurants(origin, radius, Some(&q)).await,
                Some("attraction") => {
                    maps.search_nearby_attractions(origin, radius, "tourist_attraction")
                        .await
                }
                _ => maps.search_places(&q, location, radius).await,
            };

            result.map_err(|_| ApiError::internal("Failed to search places"))?
        }
    };

    Ok(HttpResponse::Ok().json(PlacesResponse {
        success: true,
        places,
        query: q,
        location,
        radius,
        place_type: query.place_type,
    }))
}

/*
    /api/places/{place_id}
*/
pub async fn details(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let place_id = path.into_inner();
    let Some(maps) = &state.maps else {
        log::warn!("GOOGLE_MAPS_API_KEY not set, no details for {}", place_id);
        return Err(ApiError::NotFound("Place not found".to_string()));
    };

    match maps.place_details(&place_id).await {
        Ok(Some(place)) => Ok(HttpResponse::Ok().json(place)),
        Ok(None) => Err(ApiError::NotFound("Place not found".to_string())),
        Err(_) => Err(ApiError::internal("Failed to get place details")),
    }
}

/*
    /api/geocode?address=  or  /api/geocode?lat=&lng=
*/
pub async fn geocode(
    query: web::Query<GeocodeQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let address = non_blank(query.address);
    let point = parse_location(query.lat.as_deref(), query.lng.as_deref())?;

    let response = match (address, point) {
        (Some(address), _) => {
            let location = match &state.maps {
                Some(maps) => maps
                    .geocode(&address)
                    .await
                    .map_err(|_| ApiError::internal("Failed to geocode address"))?,
                None => None,
            };
            GeocodeResponse {
                success: true,
                address: Some(address),
                location,
            }
        }
        (None, Some(point)) => {
            let address = match &state.maps {
                Some(maps) => maps
                    .reverse_geocode(point.lat, point.lng)
                    .await
                    .map_err(|_| ApiError::internal("Failed to reverse geocode location"))?,
                None => None,
            };
            GeocodeResponse {
                success: true,
                address,
                location: Some(point),
            }
        }
        (None, None) => {
            return Err(ApiError::bad_request(
                "Either address or lat and lng are required",
            ))
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

/*
    /api/directions?origin=&destination=&mode=
*/
pub async fn directions(
    query: web::Query<DirectionsQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let (Some(origin), Some(destination)) = (non_blank(query.origin), non_blank(query.destination))
    else {
        return Err(ApiError::bad_request("Origin and destination are required"));
    };

    let directions = match &state.maps {
        Some(maps) => maps
            .directions(&origin, &destination, query.mode)
            .await
            .map_err(|_| ApiError::internal("Failed to get directions"))?,
        None => {
            log::warn!("GOOGLE_MAPS_API_KEY not set, no directions returned");
            None
        }
    };

    Ok(HttpResponse::Ok().json(DirectionsResponse {
        success: true,
        directions,
    }))
}
