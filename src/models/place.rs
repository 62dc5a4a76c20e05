use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::itinerary::GeoPoint;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub open_now: bool,
    pub periods: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PlaceReview {
    pub author: String,
    pub rating: f64,
    pub text: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub coordinates: GeoPoint,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<PlaceReview>>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DirectionStep {
    pub instruction: String,
    pub distance: String,
    pub duration: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Directions {
    pub distance: String,
    pub duration: String,
    pub steps: Vec<DirectionStep>,
    pub polyline: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Transit,
    Bicycling,
}

impl TravelMode {
    pub fn as_str(&self) -> &str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
            TravelMode::Bicycling => "bicycling",
        }
    }
}
