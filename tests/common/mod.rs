#![allow(dead_code)]

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use async_trait::async_trait;
use chrono::NaiveDate;

use trip_planner_api::{
    config::AppConfig,
    configure,
    services::{
        events_service::EventsService,
        vertex_ai_service::{TextGenerator, VertexAiError},
    },
    AppState,
};

/// Answers every prompt with the same canned text, or fails.
pub struct StubModel {
    response: Result<String, String>,
}

impl StubModel {
    pub fn replying(text: &str) -> Arc<dyn TextGenerator> {
        Arc::new(Self {
            response: Ok(text.to_string()),
        })
    }

    pub fn failing(message: &str) -> Arc<dyn TextGenerator> {
        Arc::new(Self {
            response: Err(message.to_string()),
        })
    }
}

#[async_trait]
impl TextGenerator for StubModel {
    async fn generate(&self, _prompt: &str) -> Result<String, VertexAiError> {
        self.response
            .clone()
            .map_err(VertexAiError::ResponseError)
    }
}

pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

pub struct TestApp {
    pub state: web::Data<AppState>,
}

impl TestApp {
    /// No credentials at all, so every service is on its mock path.
    pub fn new() -> Self {
        Self::build(AppConfig::default(), None)
    }

    pub fn with_model(model: Arc<dyn TextGenerator>) -> Self {
        Self::build(AppConfig::default(), Some(model))
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, None)
    }

    fn build(config: AppConfig, model: Option<Arc<dyn TextGenerator>>) -> Self {
        let mut state = AppState::with_model(config, model);
        state.events = EventsService::with_reference_date(reference_date());

        Self {
            state: web::Data::new(state),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(self.state.clone())
            .configure(configure)
    }
}

pub const MODEL_ITINERARY: &str = r#"Here is a plan for your trip.

```json
{
  "title": "Jaipur in Pink",
  "summary": "Forts, bazaars and Rajasthani food.",
  "accommodation": { "name": "Haveli Stay", "type": "homestay", "cost": 3000, "location": "Old City", "rating": 4.4 },
  "days": [
    {
      "day": 1,
      "date": "2025-02-01",
      "activities": [
        {
          "id": "amber_fort",
          "name": "Amber Fort",
          "description": "Hilltop fort",
          "category": "sightseeing",
          "duration": 3,
          "cost": 500,
          "location": { "name": "Amer", "coordinates": { "lat": 26.9855, "lng": 75.8513 } },
          "rating": 4.8,
          "bookingRequired": true,
          "timeSlot": "morning"
        }
      ],
      "totalCost": 2100,
      "totalDuration": 7,
      "transportation": { "mode": "taxi", "cost": 400, "duration": 1 },
      "meals": {
        "breakfast": { "name": "Tapri", "cost": 150, "location": "C-Scheme" },
        "lunch": { "name": "LMB", "cost": 400, "location": "Johari Bazaar" },
        "dinner": { "name": "Chokhi Dhani", "cost": 900, "location": "Tonk Road" }
      }
    }
  ]
}
```
Enjoy!"#;
