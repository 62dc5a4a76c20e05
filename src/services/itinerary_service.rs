use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    itinerary::{
        Accommodation, Activity, ActivityCategory, ActivityLocation, DayItinerary, GeoPoint,
        Itinerary, Meal, Meals, OptimizationConditions, TimeSlot, TransportLeg,
    },
    preferences::{AccommodationType, TransportMode, TripPreferences},
};
use crate::services::{
    ids,
    response_parser::extract_json_object,
    vertex_ai_service::{TextGenerator, VertexAiError},
};

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("Model request failed: {0}")]
    Model(#[from] VertexAiError),
    #[error("No valid JSON found in model response")]
    NoJson,
    #[error("Failed to parse itinerary response: {0}")]
    Parse(String),
    #[error("Failed to serialize itinerary: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Fields the model is asked to produce. Everything else on an itinerary is
/// derived from the request.
#[derive(Debug, Deserialize)]
struct GeneratedItinerary {
    title: Option<String>,
    summary: Option<String>,
    accommodation: Option<Accommodation>,
    days: Vec<DayItinerary>,
}

/// Generates itineraries through a text model, substituting a synthetic plan
/// when the model is absent or its output is unusable.
#[derive(Clone)]
pub struct ItineraryService {
    model: Option<Arc<dyn TextGenerator>>,
}

impl ItineraryService {
    pub fn new(model: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { model }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub async fn generate(&self, preferences: &TripPreferences) -> Itinerary {
        let Some(model) = &self.model else {
            log::info!("No generative model configured, using mock itinerary");
            return mock_itinerary(preferences);
        };

        let prompt = build_itinerary_prompt(preferences);

        let result = match model.generate(&prompt).await {
            Ok(text) => parse_itinerary_response(&text, preferences),
            Err(e) => Err(ItineraryError::from(e)),
        };

        match result {
            Ok(itinerary) => itinerary,
            Err(e) => {
                log::error!("Error generating itinerary: {}", e);
                log::warn!("Falling back to mock itinerary for {}", preferences.location);
                mock_itinerary(preferences)
            }
        }
    }

    /// Re-plans `itinerary` under the given conditions. Identity, location,
    /// budget, dates and `created_at` are carried over from the input.
    pub async fn optimize(
        &self,
        itinerary: Itinerary,
        conditions: &OptimizationConditions,
    ) -> Result<Itinerary, ItineraryError> {
        let Some(model) = &self.model else {
            log::info!("No generative model configured, returning itinerary unchanged");
            return Ok(itinerary);
        };

        let prompt = build_optimization_prompt(&itinerary, conditions)?;
        let text = model.generate(&prompt).await?;
        let generated = parse_generated(&text)?;

        let mut optimized = itinerary;
        optimized.days = generated.days;
        if let Some(summary) = generated.summary {
            optimized.summary = summary;
        }
        if let Some(title) = generated.title.filter(|t| !t.is_empty()) {
            optimized.title = title;
        }
        if let Some(accommodation) = generated.accommodation {
            optimized.accommodation = accommodation;
        }
        optimized.actual_cost = optimized.total_day_cost();
        optimized.updated_at = Utc::now();

        Ok(optimized)
    }
}

fn trip_start(preferences: &TripPreferences) -> NaiveDate {
    preferences
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive())
}

fn interests_label(preferences: &TripPreferences) -> String {
    if preferences.interests.is_empty() {
        "general sightseeing".to_string()
    } else {
        preferences.interests.join(", ")
    }
}

pub fn build_itinerary_prompt(preferences: &TripPreferences) -> String {
    format!(
        r#"You are an expert travel planner. Create a detailed, personalized itinerary for a trip with the following requirements:

**Trip Details:**
- Location: {location}
- Duration: {duration} days
- Start Date: {start}
- Budget: {min} - {max} {currency}
- Group Size: {group} people
- Travel Style: {style}
- Interests: {interests}
- Accommodation Type: {accommodation}
- Transportation: {transport}

**Requirements:**
1. Create a day-by-day itinerary with specific activities, timings, and costs
2. Include breakfast, lunch, and dinner recommendations with local restaurants
3. Suggest transportation options between locations
4. Provide realistic cost estimates for all activities and meals
5. Include a mix of popular attractions and hidden gems
6. Consider the travel style and interests provided
7. Ensure the total cost stays within the budget range
8. Include practical information like booking requirements and best times to visit

**Output Format:**
Respond with a single JSON object with the following structure:
{{
  "title": "Trip title",
  "summary": "Brief trip summary",
  "accommodation": {{
    "name": "Hotel/Accommodation name",
    "type": "hotel/hostel/homestay/resort",
    "cost": 0,
    "location": "Location",
    "rating": 4.5
  }},
  "days": [
    {{
      "day": 1,
      "date": "YYYY-MM-DD",
      "activities": [
        {{
          "id": "unique_id",
          "name": "Activity name",
          "description": "Detailed description",
          "category": "sightseeing/adventure/cultural/food/shopping/entertainment",
          "duration": 2,
          "cost": 100,
          "location": {{
            "name": "Location name",
            "coordinates": {{"lat": 0, "lng": 0}}
          }},
          "rating": 4.5,
          "bookingRequired": true,
          "timeSlot": "morning/afternoon/evening/night"
        }}
      ],
      "totalCost": 500,
      "totalDuration": 8,
      "transportation": {{
        "mode": "taxi/bus/metro/walking",
        "cost": 50,
        "duration": 1
      }},
      "meals": {{
        "breakfast": {{"name": "Restaurant name", "cost": 50, "location": "Location"}},
        "lunch": {{"name": "Restaurant name", "cost": 100, "location": "Location"}},
        "dinner": {{"name": "Restaurant name", "cost": 150, "location": "Location"}}
      }}
    }}
  ]
}}

Make sure the response is valid JSON and includes realistic, practical recommendations."#,
        location = preferences.location,
        duration = preferences.duration,
        start = trip_start(preferences),
        min = preferences.budget.min,
        max = preferences.budget.max,
        currency = preferences.budget.currency.code(),
        group = preferences.group_size,
        style = preferences.travel_style.as_str(),
        interests = interests_label(preferences),
        accommodation = preferences.accommodation_type.as_str(),
        transport = preferences.transportation.as_str(),
    )
}

pub fn build_optimization_prompt(
    itinerary: &Itinerary,
    conditions: &OptimizationConditions,
) -> Result<String, ItineraryError> {
    let current = serde_json::to_string_pretty(itinerary)?;
    let availability = serde_json::to_string(&conditions.availability.clone().unwrap_or_default())?;

    let weather = conditions
        .weather
        .as_deref()
        .filter(|w| !w.is_empty())
        .unwrap_or("Normal conditions");
    let events = match &conditions.events {
        Some(events) if !events.is_empty() => events.join(", "),
        _ => "No special events".to_string(),
    };

    Ok(format!(
        r#"You are an expert travel planner. Optimize the following itinerary based on real-time conditions:

**Current Itinerary:**
{current}

**Real-time Conditions:**
- Weather: {weather}
- Local Events: {events}
- Activity Availability: {availability}

**Optimization Requirements:**
1. Adjust activities based on weather conditions
2. Include or avoid local events as appropriate
3. Replace unavailable activities with suitable alternatives
4. Maintain the same budget and duration
5. Keep the overall trip structure intact

Respond with the optimized itinerary as a single JSON object in the same format, including "title", "summary", "accommodation" and "days"."#
    ))
}

fn parse_generated(text: &str) -> Result<GeneratedItinerary, ItineraryError> {
    let value = extract_json_object(text).ok_or(ItineraryError::NoJson)?;

    if !value.get("days").is_some_and(|days| days.is_array()) {
        return Err(ItineraryError::Parse("missing days array".to_string()));
    }

    serde_json::from_value(value).map_err(|e| ItineraryError::Parse(e.to_string()))
}

/// Builds an itinerary from model output, filling request-derived fields from
/// `preferences`. `actual_cost` is the sum of day costs.
pub fn parse_itinerary_response(
    text: &str,
    preferences: &TripPreferences,
) -> Result<Itinerary, ItineraryError> {
    let generated = parse_generated(text)?;
    let start = trip_start(preferences);
    let now = Utc::now();

    let mut itinerary = Itinerary {
        id: ids::itinerary_id(),
        user_id: String::new(),
        title: generated
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("{} Adventure", preferences.location)),
        location: preferences.location.clone(),
        start_date: start,
        end_date: start + Duration::days(i64::from(preferences.duration)),
        total_days: preferences.duration,
        total_budget: preferences.budget.max,
        actual_cost: 0.0,
        days: generated.days,
        accommodation: generated.accommodation.unwrap_or_default(),
        summary: generated.summary.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };
    itinerary.actual_cost = itinerary.total_day_cost();

    Ok(itinerary)
}

fn mock_day(day: u32, date: NaiveDate, preferences: &TripPreferences) -> DayItinerary {
    let mut rng = rand::thread_rng();
    let location = &preferences.location;

    DayItinerary {
        day,
        date: date.to_string(),
        activities: vec![
            Activity {
                id: format!("activity_{}_1", day),
                name: format!("Morning Activity - Day {}", day),
                description: "Explore local attractions and cultural sites".to_string(),
                category: ActivityCategory::Sightseeing,
                duration: 3.0,
                cost: f64::from(rng.gen_range(200_u32..700)),
                location: ActivityLocation {
                    name: format!("{} City Center", location),
                    coordinates: GeoPoint::new(28.6139, 77.2090),
                },
                rating: 4.5,
                booking_required: false,
                time_slot: TimeSlot::Morning,
            },
            Activity {
                id: format!("activity_{}_2", day),
                name: format!("Afternoon Experience - Day {}", day),
                description: "Local food tour and cultural immersion".to_string(),
                category: ActivityCategory::Food,
                duration: 2.0,
                cost: f64::from(rng.gen_range(150_u32..450)),
                location: ActivityLocation {
                    name: format!("Local Market, {}", location),
                    coordinates: GeoPoint::new(28.6140, 77.2091),
                },
                rating: 4.2,
                booking_required: true,
                time_slot: TimeSlot::Afternoon,
            },
        ],
        total_cost: f64::from(rng.gen_range(500_u32..1300)),
        total_duration: 8.0,
        transportation: TransportLeg {
            mode: match preferences.transportation {
                TransportMode::Public => "Metro/Bus".to_string(),
                _ => "Taxi".to_string(),
            },
            cost: f64::from(rng.gen_range(100_u32..300)),
            duration: 1.0,
        },
        meals: Meals {
            breakfast: Meal {
                name: "Local Cafe".to_string(),
                cost: 150.0,
                location: "Hotel Area".to_string(),
            },
            lunch: Meal {
                name: "Traditional Restaurant".to_string(),
                cost: 300.0,
                location: "City Center".to_string(),
            },
            dinner: Meal {
                name: "Fine Dining".to_string(),
                cost: 500.0,
                location: "Downtown".to_string(),
            },
        },
    }
}

/// Synthetic itinerary with fixed shape and randomized costs.
pub fn mock_itinerary(preferences: &TripPreferences) -> Itinerary {
    let start = trip_start(preferences);
    let days: Vec<DayItinerary> = (1..=preferences.duration)
        .map(|day| {
            mock_day(
                day,
                start + Duration::days(i64::from(day) - 1),
                preferences,
            )
        })
        .collect();

    let accommodation_name = match preferences.accommodation_type {
        AccommodationType::Hotel => "Grand Hotel".to_string(),
        other => format!("Cozy {}", other.as_str()),
    };

    let now = Utc::now();
    let mut itinerary = Itinerary {
        id: ids::itinerary_id(),
        user_id: String::new(),
        title: format!(
            "{} Adventure - {} Days",
            preferences.location, preferences.duration
        ),
        location: preferences.location.clone(),
        start_date: start,
        end_date: start + Duration::days(i64::from(preferences.duration)),
        total_days: preferences.duration,
        total_budget: preferences.budget.max,
        actual_cost: 0.0,
        days,
        accommodation: Accommodation {
            name: accommodation_name,
            kind: preferences.accommodation_type.as_str().to_string(),
            cost: f64::from(rand::thread_rng().gen_range(1000_u32..3000)),
            location: format!("{} City Center", preferences.location),
            rating: 4.3,
        },
        summary: format!(
            "A wonderful {}-day adventure in {} featuring {} experiences. Perfect for {} travelers with a budget of {}{:.0}.",
            preferences.duration,
            preferences.location,
            interests_label(preferences),
            preferences.travel_style.as_str(),
            preferences.budget.currency.symbol(),
            preferences.budget.max
        ),
        created_at: now,
        updated_at: now,
    };
    itinerary.actual_cost = itinerary.total_day_cost();

    itinerary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preferences::{Budget, Currency, TravelStyle};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct CannedModel(Result<String, String>);

    #[async_trait]
    impl TextGenerator for CannedModel {
        async fn generate(&self, _prompt: &str) -> Result<String, VertexAiError> {
            self.0
                .clone()
                .map_err(VertexAiError::ResponseError)
        }
    }

    fn preferences() -> TripPreferences {
        TripPreferences {
            location: "Udaipur".to_string(),
            duration: 3,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            budget: Budget {
                min: 15000.0,
                max: 40000.0,
                currency: Currency::Inr,
            },
            group_size: 2,
            interests: vec!["heritage".to_string(), "food".to_string()],
            travel_style: TravelStyle::Cultural,
            accommodation_type: AccommodationType::Homestay,
            transportation: TransportMode::Public,
        }
    }

    const MODEL_RESPONSE: &str = r#"Sure! Here is the plan:
```json
{
  "title": "Lakes and Palaces",
  "summary": "Three days around the lakes.",
  "accommodation": { "name": "Lake View Homestay", "type": "homestay", "cost": 2500, "location": "Lake Pichola", "rating": 4.6 },
  "days": [
    {
      "day": 1,
      "date": "2025-03-10",
      "activities": [
        {
          "id": "a1",
          "name": "City Palace",
          "description": "Palace complex tour",
          "category": "sightseeing",
          "duration": 3,
          "cost": 300,
          "location": { "name": "City Palace", "coordinates": { "lat": 24.576, "lng": 73.683 } },
          "rating": 4.7,
          "bookingRequired": true,
          "timeSlot": "morning"
        }
      ],
      "totalCost": 1200,
      "totalDuration": 6,
      "transportation": { "mode": "auto-rickshaw", "cost": 150, "duration": 1 },
      "meals": {
        "breakfast": { "name": "Cafe", "cost": 100, "location": "Old City" },
        "lunch": { "name": "Thali House", "cost": 250, "location": "Old City" },
        "dinner": { "name": "Rooftop", "cost": 500, "location": "Lake Pichola" }
      }
    },
    { "day": 2, "date": "2025-03-11", "activities": [], "totalCost": 800 }
  ]
}
```"#;

    #[test]
    fn test_mock_itinerary_shape() {
        let prefs = preferences();
        let itinerary = mock_itinerary(&prefs);

        assert!(itinerary.id.starts_with("itinerary_"));
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(itinerary.total_days, 3);
        assert_eq!(itinerary.total_budget, 40000.0);
        assert_eq!(itinerary.title, "Udaipur Adventure - 3 Days");
        assert_eq!(itinerary.accommodation.name, "Cozy homestay");
        assert_eq!(itinerary.end_date, NaiveDate::from_ymd_opt(2025, 3, 13).unwrap());
        assert!(itinerary.summary.contains("heritage, food"));

        for day in &itinerary.days {
            assert_eq!(day.activities.len(), 2);
            assert_eq!(day.transportation.mode, "Metro/Bus");
            assert!((500.0..1300.0).contains(&day.total_cost));
            assert!((200.0..700.0).contains(&day.activities[0].cost));
            assert_eq!(day.meals.dinner.cost, 500.0);
        }
        assert_eq!(itinerary.days[2].date, "2025-03-12");
        assert_eq!(itinerary.actual_cost, itinerary.total_day_cost());
    }

    #[test]
    fn test_mock_hotel_naming_and_private_transport() {
        let mut prefs = preferences();
        prefs.accommodation_type = AccommodationType::Hotel;
        prefs.transportation = TransportMode::Private;

        let itinerary = mock_itinerary(&prefs);
        assert_eq!(itinerary.accommodation.name, "Grand Hotel");
        assert_eq!(itinerary.days[0].transportation.mode, "Taxi");
    }

    #[test]
    fn test_prompt_embeds_preferences() {
        let prompt = build_itinerary_prompt(&preferences());
        assert!(prompt.contains("Location: Udaipur"));
        assert!(prompt.contains("Budget: 15000 - 40000 INR"));
        assert!(prompt.contains("Interests: heritage, food"));
        assert!(prompt.contains("Accommodation Type: homestay"));
    }

    #[test]
    fn test_parse_response() {
        let itinerary = parse_itinerary_response(MODEL_RESPONSE, &preferences()).unwrap();

        assert_eq!(itinerary.title, "Lakes and Palaces");
        assert_eq!(itinerary.location, "Udaipur");
        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(itinerary.actual_cost, 2000.0);
        assert_eq!(itinerary.accommodation.name, "Lake View Homestay");
        assert_eq!(itinerary.days[0].activities[0].time_slot, TimeSlot::Morning);
    }

    #[test]
    fn test_parse_response_requires_days() {
        let result = parse_itinerary_response(r#"{"title": "No days"}"#, &preferences());
        assert!(matches!(result, Err(ItineraryError::Parse(_))));

        let result = parse_itinerary_response("I cannot help with that.", &preferences());
        assert!(matches!(result, Err(ItineraryError::NoJson)));
    }

    #[test]
    fn test_parse_response_tolerates_loose_activities() {
        let reply = r#"Here you go:
{"title": "Goa Beaches", "days": [
  {"day": 1, "totalCost": 1800, "activities": [
    {"id": "a1", "name": "Calangute Beach", "category": "Sightseeing", "timeSlot": "Morning", "cost": 0},
    {"id": "a2", "name": "Fish thali at Ritz Classic", "category": "FOOD", "cost": 600},
    {"name": "Tito's Lane", "timeSlot": "late night"}
  ]}
]}"#;

        let itinerary = parse_itinerary_response(reply, &preferences()).unwrap();
        let activities = &itinerary.days[0].activities;

        assert_eq!(itinerary.title, "Goa Beaches");
        assert_eq!(activities.len(), 3);
        assert_eq!(activities[0].time_slot, TimeSlot::Morning);
        assert_eq!(activities[0].category, ActivityCategory::Sightseeing);
        assert_eq!(activities[1].time_slot, TimeSlot::Flexible);
        assert_eq!(activities[1].category, ActivityCategory::Food);
        assert_eq!(activities[2].time_slot, TimeSlot::Flexible);
        assert_eq!(activities[2].cost, 0.0);
        assert_eq!(itinerary.actual_cost, 1800.0);
    }

    #[actix_rt::test]
    async fn test_generate_without_model_uses_mock() {
        let service = ItineraryService::new(None);
        let itinerary = service.generate(&preferences()).await;
        assert_eq!(itinerary.title, "Udaipur Adventure - 3 Days");
    }

    #[actix_rt::test]
    async fn test_generate_uses_model_output() {
        let model = Arc::new(CannedModel(Ok(MODEL_RESPONSE.to_string())));
        let service = ItineraryService::new(Some(model));
        let itinerary = service.generate(&preferences()).await;
        assert_eq!(itinerary.title, "Lakes and Palaces");
    }

    #[actix_rt::test]
    async fn test_generate_falls_back_on_model_error() {
        let model = Arc::new(CannedModel(Err("quota exceeded".to_string())));
        let service = ItineraryService::new(Some(model));
        let itinerary = service.generate(&preferences()).await;
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(itinerary.title, "Udaipur Adventure - 3 Days");
    }

    #[actix_rt::test]
    async fn test_optimize_without_model_returns_input() {
        let original = mock_itinerary(&preferences());
        let service = ItineraryService::new(None);
        let optimized = service
            .optimize(original.clone(), &OptimizationConditions::default())
            .await
            .unwrap();
        assert_eq!(optimized, original);
    }

    #[actix_rt::test]
    async fn test_optimize_preserves_identity() {
        let original = mock_itinerary(&preferences());
        let model = Arc::new(CannedModel(Ok(MODEL_RESPONSE.to_string())));
        let service = ItineraryService::new(Some(model));

        let conditions = OptimizationConditions {
            weather: Some("Heavy rain".to_string()),
            events: Some(vec!["Holi festival".to_string()]),
            availability: Some(HashMap::from([("activity_1_1".to_string(), false)])),
        };
        let optimized = service.optimize(original.clone(), &conditions).await.unwrap();

        assert_eq!(optimized.id, original.id);
        assert_eq!(optimized.created_at, original.created_at);
        assert_eq!(optimized.total_budget, original.total_budget);
        assert_eq!(optimized.start_date, original.start_date);
        assert_eq!(optimized.days.len(), 2);
        assert_eq!(optimized.summary, "Three days around the lakes.");
        assert_eq!(optimized.actual_cost, 2000.0);
        assert!(optimized.updated_at >= original.updated_at);
    }

    #[actix_rt::test]
    async fn test_optimize_fails_on_unusable_output() {
        let model = Arc::new(CannedModel(Ok("no json here".to_string())));
        let service = ItineraryService::new(Some(model));
        let result = service
            .optimize(mock_itinerary(&preferences()), &OptimizationConditions::default())
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_optimization_prompt_defaults() {
        let itinerary = mock_itinerary(&preferences());
        let prompt =
            build_optimization_prompt(&itinerary, &OptimizationConditions::default()).unwrap();
        assert!(prompt.contains("Weather: Normal conditions"));
        assert!(prompt.contains("Local Events: No special events"));
        assert!(prompt.contains("Activity Availability: {}"));
        assert!(prompt.contains(&itinerary.id));
    }
}
