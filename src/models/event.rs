use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::itinerary::GeoPoint;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Festival,
    Concert,
    Exhibition,
    Sports,
    Cultural,
    Food,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Festival => "festival",
            EventCategory::Concert => "concert",
            EventCategory::Exhibition => "exhibition",
            EventCategory::Sports => "sports",
            EventCategory::Cultural => "cultural",
            EventCategory::Food => "food",
            EventCategory::Other => "other",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EventLocation {
    pub name: String,
    pub address: String,
    pub coordinates: GeoPoint,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EventPrice {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalEvent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: EventLocation,
    pub category: EventCategory,
    pub price: EventPrice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub organizer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventSearchParams {
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: Option<EventCategory>,
    pub price_range: Option<PriceRange>,
    /// Kilometres. Accepted for API compatibility; the catalog is not geo-filtered.
    pub radius: Option<f64>,
}

impl EventSearchParams {
    pub fn new(location: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            location: location.into(),
            start_date,
            end_date,
            category: None,
            price_range: None,
            radius: None,
        }
    }
}
