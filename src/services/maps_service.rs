//! Google Maps Platform over its REST web services.
//!
//! Uses the Places (nearby search, details), Geocoding and Directions APIs and
//! reshapes their snake_case responses into the camelCase `Place` /
//! `Directions` models. Requires `GOOGLE_MAPS_API_KEY`; without it the service
//! is not constructed and callers take their mock path.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::MapsConfig;
use crate::models::itinerary::GeoPoint;
use crate::models::place::{
    DirectionStep, Directions, OpeningHours, Place, PlaceReview, TravelMode,
};

const MAPS_API_BASE: &str = "https://maps.googleapis.com/maps/api";
const DETAIL_FIELDS: &str =
    "place_id,name,formatted_address,geometry,rating,price_level,types,photos,opening_hours,reviews";

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Maps API error: {0}")]
    ApiError(String),
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    error_message: Option<String>,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ResultsBody<T> {
    #[serde(default)]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct DetailBody {
    result: Option<ApiPlace>,
}

#[derive(Debug, Deserialize)]
struct RoutesBody {
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize, Default)]
struct ApiLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize, Default)]
struct ApiGeometry {
    location: Option<ApiLatLng>,
}

#[derive(Debug, Deserialize)]
struct ApiPhoto {
    photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiOpeningHours {
    #[serde(default)]
    open_now: bool,
    #[serde(default)]
    periods: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ApiReview {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    text: String,
    /// Unix seconds.
    #[serde(default)]
    time: i64,
}

#[derive(Debug, Deserialize)]
struct ApiPlace {
    #[serde(default)]
    place_id: String,
    #[serde(default)]
    name: String,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<ApiGeometry>,
    #[serde(default)]
    rating: f64,
    price_level: Option<u8>,
    #[serde(default)]
    types: Vec<String>,
    photos: Option<Vec<ApiPhoto>>,
    opening_hours: Option<ApiOpeningHours>,
    reviews: Option<Vec<ApiReview>>,
}

impl ApiPlace {
    fn coordinates(&self) -> GeoPoint {
        self.geometry
            .as_ref()
            .and_then(|g| g.location.as_ref())
            .map(|l| GeoPoint::new(l.lat, l.lng))
            .unwrap_or_default()
    }

    fn into_place(self) -> Place {
        let coordinates = self.coordinates();
        Place {
            place_id: self.place_id,
            name: self.name,
            address: self
                .vicinity
                .or(self.formatted_address)
                .unwrap_or_default(),
            coordinates,
            rating: self.rating,
            price_level: self.price_level,
            types: self.types,
            photos: self.photos.map(|photos| {
                photos
                    .into_iter()
                    .map(|p| p.photo_reference.unwrap_or_default())
                    .collect()
            }),
            opening_hours: self.opening_hours.map(|h| OpeningHours {
                open_now: h.open_now,
                periods: h.periods,
            }),
            reviews: self.reviews.map(|reviews| {
                reviews
                    .into_iter()
                    .map(|r| PlaceReview {
                        author: r.author_name,
                        rating: r.rating,
                        text: r.text,
                        time: DateTime::<Utc>::from_timestamp(r.time, 0).unwrap_or_default(),
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiText {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiStep {
    #[serde(default)]
    html_instructions: String,
    distance: Option<ApiText>,
    duration: Option<ApiText>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    distance: Option<ApiText>,
    duration: Option<ApiText>,
    #[serde(default)]
    steps: Vec<ApiStep>,
}

#[derive(Debug, Deserialize)]
struct ApiPolyline {
    #[serde(default)]
    points: String,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    legs: Vec<ApiLeg>,
    overview_polyline: Option<ApiPolyline>,
}

#[derive(Debug, Deserialize)]
struct ApiGeocode {
    formatted_address: Option<String>,
    geometry: Option<ApiGeometry>,
}

fn text(value: Option<ApiText>) -> String {
    value.map(|t| t.text).unwrap_or_default()
}

fn lat_lng(point: GeoPoint) -> String {
    format!("{},{}", point.lat, point.lng)
}

#[derive(Clone)]
pub struct MapsService {
    client: Client,
    api_key: String,
}

impl MapsService {
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let response = self
            .client
            .get(format!("{}/{}/json", MAPS_API_BASE, path))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MapsError::ApiError(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        match envelope.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(envelope.body),
            status => Err(MapsError::ApiError(format!(
                "{}: {}",
                status,
                envelope.error_message.unwrap_or_default()
            ))),
        }
    }

    async fn nearby(&self, params: Vec<(&str, String)>) -> Result<Vec<Place>, MapsError> {
        let body: ResultsBody<ApiPlace> = self.call("place/nearbysearch", &params).await?;
        Ok(body.results.into_iter().map(ApiPlace::into_place).collect())
    }

    /// Keyword search around `location`, or around (0, 0) when none is given.
    pub async fn search_places(
        &self,
        query: &str,
        location: Option<GeoPoint>,
        radius: u32,
    ) -> Result<Vec<Place>, MapsError> {
        self.nearby(vec![
            ("location", lat_lng(location.unwrap_or_default())),
            ("radius", radius.to_string()),
            ("keyword", query.to_string()),
        ])
        .await
        .map_err(|e| {
            log::error!("Error searching places: {}", e);
            e
        })
    }

    pub async fn search_restaurants(
        &self,
        location: GeoPoint,
        radius: u32,
        cuisine: Option<&str>,
    ) -> Result<Vec<Place>, MapsError> {
        let mut params = vec![
            ("location", lat_lng(location)),
            ("radius", radius.to_string()),
            ("type", "restaurant".to_string()),
        ];
        if let Some(cuisine) = cuisine.filter(|c| !c.is_empty()) {
            params.push(("keyword", cuisine.to_string()));
        }

        self.nearby(params).await.map_err(|e| {
            log::error!("Error searching restaurants: {}", e);
            e
        })
    }

    pub async fn search_nearby_attractions(
        &self,
        location: GeoPoint,
        radius: u32,
        place_type: &str,
    ) -> Result<Vec<Place>, MapsError> {
        self.nearby(vec![
            ("location", lat_lng(location)),
            ("radius", radius.to_string()),
            ("type", place_type.to_string()),
        ])
        .await
        .map_err(|e| {
            log::error!("Error searching nearby attractions: {}", e);
            e
        })
    }

    pub async fn place_details(&self, place_id: &str) -> Result<Option<Place>, MapsError> {
        let body: DetailBody = self
            .call(
                "place/details",
                &[
                    ("place_id", place_id.to_string()),
                    ("fields", DETAIL_FIELDS.to_string()),
                ],
            )
            .await
            .map_err(|e| {
                log::error!("Error getting place details: {}", e);
                e
            })?;

        Ok(body.result.map(|place| Place {
            // details carry the full address, not the vicinity
            address: place.formatted_address.clone().unwrap_or_default(),
            ..place.into_place()
        }))
    }

    pub async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, MapsError> {
        let body: ResultsBody<ApiGeocode> = self
            .call("geocode", &[("address", address.to_string())])
            .await?;

        Ok(body
            .results
            .into_iter()
            .next()
            .and_then(|r| r.geometry)
            .and_then(|g| g.location)
            .map(|l| GeoPoint::new(l.lat, l.lng)))
    }

    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<String>, MapsError> {
        let body: ResultsBody<ApiGeocode> = self
            .call("geocode", &[("latlng", lat_lng(GeoPoint::new(lat, lng)))])
            .await?;

        Ok(body
            .results
            .into_iter()
            .next()
            .and_then(|r| r.formatted_address))
    }

    /// First leg of the first route, or `None` when no route exists.
    pub async fn directions(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<Option<Directions>, MapsError> {
        let body: RoutesBody = self
            .call(
                "directions",
                &[
                    ("origin", origin.to_string()),
                    ("destination", destination.to_string()),
                    ("mode", mode.as_str().to_string()),
                ],
            )
            .await
            .map_err(|e| {
                log::error!("Error getting directions: {}", e);
                e
            })?;

        Ok(body.routes.into_iter().next().and_then(route_to_directions))
    }
}

fn route_to_directions(route: ApiRoute) -> Option<Directions> {
    let polyline = route
        .overview_polyline
        .map(|p| p.points)
        .unwrap_or_default();
    let leg = route.legs.into_iter().next()?;

    Some(Directions {
        distance: text(leg.distance),
        duration: text(leg.duration),
        steps: leg
            .steps
            .into_iter()
            .map(|step| DirectionStep {
                instruction: step.html_instructions,
                distance: text(step.distance),
                duration: text(step.duration),
            })
            .collect(),
        polyline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nearby_result_reshaped() {
        let envelope: ApiEnvelope<ResultsBody<ApiPlace>> = serde_json::from_value(json!({
            "status": "OK",
            "results": [{
                "place_id": "abc123",
                "name": "Baga Beach Shack",
                "vicinity": "Baga, Goa",
                "geometry": { "location": { "lat": 15.55, "lng": 73.75 } },
                "rating": 4.1,
                "price_level": 2,
                "types": ["restaurant", "food"],
                "photos": [{ "photo_reference": "ref-1" }, {}]
            }]
        }))
        .unwrap();

        let place = envelope.body.results.into_iter().next().unwrap().into_place();
        assert_eq!(place.place_id, "abc123");
        assert_eq!(place.address, "Baga, Goa");
        assert_eq!(place.coordinates, GeoPoint::new(15.55, 73.75));
        assert_eq!(place.price_level, Some(2));
        assert_eq!(place.photos, Some(vec!["ref-1".to_string(), String::new()]));
    }

    #[test]
    fn test_missing_fields_default() {
        let place: ApiPlace = serde_json::from_value(json!({ "name": "Unnamed" })).unwrap();
        let place = place.into_place();
        assert_eq!(place.place_id, "");
        assert_eq!(place.coordinates, GeoPoint::default());
        assert_eq!(place.rating, 0.0);
        assert!(place.photos.is_none());
    }

    #[test]
    fn test_zero_results_envelope() {
        let envelope: ApiEnvelope<ResultsBody<ApiPlace>> =
            serde_json::from_value(json!({ "status": "ZERO_RESULTS", "results": [] })).unwrap();
        assert_eq!(envelope.status, "ZERO_RESULTS");
        assert!(envelope.body.results.is_empty());
    }

    #[test]
    fn test_geocode_envelope_without_results() {
        let envelope: ApiEnvelope<ResultsBody<ApiGeocode>> =
            serde_json::from_value(json!({ "status": "ZERO_RESULTS" })).unwrap();
        assert!(envelope.body.results.is_empty());

        let envelope: ApiEnvelope<ResultsBody<ApiGeocode>> = serde_json::from_value(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Fort Kochi, Kerala",
                "geometry": { "location": { "lat": 9.96, "lng": 76.24 } }
            }]
        }))
        .unwrap();
        let first = envelope.body.results.into_iter().next().unwrap();
        assert_eq!(first.formatted_address.as_deref(), Some("Fort Kochi, Kerala"));
    }

    #[test]
    fn test_route_to_directions() {
        let route: ApiRoute = serde_json::from_value(json!({
            "legs": [{
                "distance": { "text": "12 km" },
                "duration": { "text": "25 mins" },
                "steps": [
                    { "html_instructions": "Head <b>north</b>", "distance": { "text": "1 km" }, "duration": { "text": "2 mins" } }
                ]
            }],
            "overview_polyline": { "points": "a~l~Fjk~uOwHJy@P" }
        }))
        .unwrap();

        let directions = route_to_directions(route).unwrap();
        assert_eq!(directions.distance, "12 km");
        assert_eq!(directions.steps.len(), 1);
        assert_eq!(directions.steps[0].instruction, "Head <b>north</b>");
        assert_eq!(directions.polyline, "a~l~Fjk~uOwHJy@P");
    }

    #[test]
    fn test_route_without_legs() {
        let route: ApiRoute = serde_json::from_value(json!({ "legs": [] })).unwrap();
        assert!(route_to_directions(route).is_none());
    }

    #[test]
    fn test_review_time_conversion() {
        let place: ApiPlace = serde_json::from_value(json!({
            "reviews": [{ "author_name": "Asha", "rating": 5, "text": "Lovely", "time": 1700000000 }]
        }))
        .unwrap();
        let reviews = place.into_place().reviews.unwrap();
        assert_eq!(reviews[0].author, "Asha");
        assert_eq!(reviews[0].time.timestamp(), 1_700_000_000);
    }
}
