use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ActivityLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coordinates: GeoPoint,
}

/// Anything unrecognised, including a missing value, reads as `Other`.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Sightseeing,
    Adventure,
    Cultural,
    Food,
    Shopping,
    Entertainment,
    #[default]
    Other,
}

impl ActivityCategory {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "sightseeing" => Self::Sightseeing,
            "adventure" => Self::Adventure,
            "cultural" => Self::Cultural,
            "food" => Self::Food,
            "shopping" => Self::Shopping,
            "entertainment" => Self::Entertainment,
            _ => Self::Other,
        }
    }
}

impl<'de> Deserialize<'de> for ActivityCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Case-insensitive on input. Unknown or missing slots read as `Flexible`.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
    #[default]
    Flexible,
}

impl TimeSlot {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "morning" => Self::Morning,
            "afternoon" => Self::Afternoon,
            "evening" => Self::Evening,
            "night" => Self::Night,
            _ => Self::Flexible,
        }
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ActivityCategory,
    /// Hours.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub location: ActivityLocation,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub booking_required: bool,
    #[serde(default)]
    pub time_slot: TimeSlot,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TransportLeg {
    pub mode: String,
    pub cost: f64,
    /// Hours.
    pub duration: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Meal {
    pub name: String,
    pub cost: f64,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Meals {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    pub day: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default)]
    pub transportation: TransportLeg,
    #[serde(default)]
    pub meals: Meals,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Accommodation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub cost: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub total_days: u32,
    #[serde(default)]
    pub total_budget: f64,
    #[serde(default)]
    pub actual_cost: f64,
    pub days: Vec<DayItinerary>,
    #[serde(default)]
    pub accommodation: Accommodation,
    #[serde(default)]
    pub summary: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Itinerary {
    /// Sum of per-day costs. Not checked against `total_budget`.
    pub fn total_day_cost(&self) -> f64 {
        self.days.iter().map(|day| day.total_cost).sum()
    }
}

/// Real-time conditions handed to the optimizer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OptimizationConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Activity id -> bookable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<HashMap<String, bool>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_category_maps_to_other() {
        let category: ActivityCategory = serde_json::from_value(json!("nightlife")).unwrap();
        assert_eq!(category, ActivityCategory::Other);
    }

    #[test]
    fn test_enums_read_case_insensitively() {
        let slot: TimeSlot = serde_json::from_value(json!("Morning")).unwrap();
        assert_eq!(slot, TimeSlot::Morning);
        let slot: TimeSlot = serde_json::from_value(json!("late night")).unwrap();
        assert_eq!(slot, TimeSlot::Flexible);
        let category: ActivityCategory = serde_json::from_value(json!("FOOD")).unwrap();
        assert_eq!(category, ActivityCategory::Food);
        assert_eq!(serde_json::to_value(TimeSlot::Evening).unwrap(), json!("evening"));
    }

    #[test]
    fn test_sparse_activity_deserializes() {
        let activity: Activity = serde_json::from_value(json!({
            "name": "Sunset at Chapora Fort",
            "category": null
        }))
        .unwrap();

        assert_eq!(activity.time_slot, TimeSlot::Flexible);
        assert_eq!(activity.category, ActivityCategory::Other);
        assert_eq!(activity.cost, 0.0);
        assert_eq!(activity.location, ActivityLocation::default());
    }

    #[test]
    fn test_minimal_itinerary_deserializes() {
        let itinerary: Itinerary = serde_json::from_value(json!({
            "id": "itinerary_1",
            "days": [
                { "day": 1, "activities": [], "totalCost": 400.0 },
                { "day": 2, "activities": [], "totalCost": 600.0 }
            ]
        }))
        .unwrap();

        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(itinerary.total_day_cost(), 1000.0);
        assert_eq!(itinerary.user_id, "");
    }

    #[test]
    fn test_itinerary_serializes_camel_case() {
        let itinerary: Itinerary = serde_json::from_value(json!({
            "id": "itinerary_2",
            "totalBudget": 5000.0,
            "days": []
        }))
        .unwrap();

        let value = serde_json::to_value(&itinerary).unwrap();
        assert_eq!(value["totalBudget"], 5000.0);
        assert!(value.get("actualCost").is_some());
        assert!(value.get("createdAt").is_some());
    }
}
