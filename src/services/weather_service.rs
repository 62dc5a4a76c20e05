//! Weather lookups and weather-driven activity advice.
//!
//! `current_weather` and `forecast` call OpenWeather when an API key is
//! configured and fall back to fixed mock data otherwise. The advice functions
//! are pure rule tables over a `WeatherData` snapshot.

use chrono::{Duration, NaiveDate, Utc};
use rand::{seq::SliceRandom, Rng};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::WeatherConfig;
use crate::models::weather::{ForecastDay, TemperatureRange, WeatherConditions, WeatherData};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_CONDITIONS: [&str; 5] = ["Clear", "Partly Cloudy", "Cloudy", "Rain", "Sunny"];

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Weather API returned {0}")]
    ApiError(String),
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    name: Option<String>,
    main: OpenWeatherMain,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
    wind: Option<OpenWeatherWind>,
    /// Metres.
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherWind {
    /// Metres per second.
    speed: f64,
}

impl OpenWeatherResponse {
    fn into_weather(self, requested: &str) -> WeatherData {
        let (condition, description) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_default();

        WeatherData {
            location: self.name.unwrap_or_else(|| requested.to_string()),
            temperature: self.main.temp,
            condition,
            description,
            humidity: self.main.humidity,
            wind_speed: self.wind.map(|w| w.speed * 3.6).unwrap_or_default(),
            visibility: self.visibility.map(|v| v / 1000.0).unwrap_or_default(),
            uv_index: 0.0,
            forecast: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct WeatherService {
    client: Client,
    config: Option<WeatherConfig>,
}

impl WeatherService {
    pub fn new(config: Option<WeatherConfig>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    pub fn is_live(&self) -> bool {
        self.config.is_some()
    }

    pub async fn current_weather(&self, location: &str) -> WeatherData {
        let Some(config) = &self.config else {
            return mock_weather(location);
        };

        match self.fetch_current(config, location).await {
            Ok(weather) => weather,
            Err(e) => {
                log::error!("Error fetching weather for {}: {}", location, e);
                log::warn!("Using mock weather for {}", location);
                mock_weather(location)
            }
        }
    }

    async fn fetch_current(
        &self,
        config: &WeatherConfig,
        location: &str,
    ) -> Result<WeatherData, WeatherError> {
        let response = self
            .client
            .get(OPENWEATHER_URL)
            .query(&[
                ("q", location),
                ("units", "metric"),
                ("appid", config.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::ApiError(response.status().to_string()));
        }

        let body: OpenWeatherResponse = response.json().await?;
        Ok(body.into_weather(location))
    }

    /// Current conditions plus `days` synthetic forecast entries.
    pub async fn forecast(&self, location: &str, days: u32) -> WeatherData {
        let mut weather = self.current_weather(location).await;
        weather.forecast = synthetic_forecast(Utc::now().date_naive(), days);
        weather
    }
}

/// One entry per day starting the day after `today`.
fn synthetic_forecast(today: NaiveDate, days: u32) -> Vec<ForecastDay> {
    let mut rng = rand::thread_rng();

    (1..=days)
        .map(|i| ForecastDay {
            date: (today + Duration::days(i64::from(i))).to_string(),
            temperature: TemperatureRange {
                min: f64::from(rng.gen_range(15_u32..25)),
                max: f64::from(rng.gen_range(25_u32..40)),
            },
            condition: FORECAST_CONDITIONS
                .choose(&mut rng)
                .copied()
                .unwrap_or("Clear")
                .to_string(),
            description: "Weather description".to_string(),
            precipitation: rng.gen_range(0..100),
        })
        .collect()
}

pub fn mock_weather(location: &str) -> WeatherData {
    let today = Utc::now().date_naive();

    WeatherData {
        location: location.to_string(),
        temperature: 25.0,
        condition: "Clear".to_string(),
        description: "Clear sky".to_string(),
        humidity: 65.0,
        wind_speed: 12.0,
        visibility: 10.0,
        uv_index: 6.0,
        forecast: vec![
            ForecastDay {
                date: (today + Duration::days(1)).to_string(),
                temperature: TemperatureRange { min: 20.0, max: 28.0 },
                condition: "Partly Cloudy".to_string(),
                description: "Partly cloudy with some sun".to_string(),
                precipitation: 10,
            },
            ForecastDay {
                date: (today + Duration::days(2)).to_string(),
                temperature: TemperatureRange { min: 18.0, max: 26.0 },
                condition: "Rain".to_string(),
                description: "Light rain expected".to_string(),
                precipitation: 80,
            },
        ],
    }
}

fn push_all(target: &mut Vec<String>, items: &[&str]) {
    target.extend(items.iter().map(|s| s.to_string()));
}

/// Suitability of `activity_kind` under `weather`. Checks within a branch are
/// additive; only rain (outdoor, adventure) and cold water (beach) mark the
/// activity unsuitable.
pub fn analyze_conditions(weather: &WeatherData, activity_kind: &str) -> WeatherConditions {
    let mut result = WeatherConditions {
        suitable: true,
        ..Default::default()
    };

    let rainy = weather.condition.to_lowercase().contains("rain");
    let temperature = weather.temperature;

    match activity_kind.trim().to_lowercase().as_str() {
        "outdoor" | "sightseeing" => {
            if rainy {
                result.suitable = false;
                push_all(
                    &mut result.recommendations,
                    &["Bring an umbrella or raincoat", "Consider indoor alternatives"],
                );
                push_all(
                    &mut result.alternative_activities,
                    &["Museums", "Indoor markets", "Art galleries"],
                );
            }
            if temperature < 10.0 {
                push_all(
                    &mut result.recommendations,
                    &["Dress warmly", "Consider hot beverages"],
                );
            }
            if temperature > 35.0 {
                push_all(
                    &mut result.recommendations,
                    &[
                        "Stay hydrated",
                        "Avoid peak sun hours (12-3 PM)",
                        "Wear sunscreen and hat",
                    ],
                );
            }
        }
        "adventure" | "hiking" => {
            if rainy {
                result.suitable = false;
                push_all(
                    &mut result.recommendations,
                    &["Trails may be slippery", "Consider postponing or indoor activities"],
                );
                push_all(
                    &mut result.alternative_activities,
                    &["Indoor rock climbing", "Museums", "Shopping"],
                );
            }
            if weather.wind_speed > 20.0 {
                push_all(&mut result.recommendations, &["High winds may affect safety"]);
                push_all(
                    &mut result.alternative_activities,
                    &["Indoor activities", "City tours"],
                );
            }
        }
        "beach" | "water sports" => {
            if temperature < 20.0 {
                result.suitable = false;
                push_all(&mut result.recommendations, &["Water may be too cold"]);
                push_all(
                    &mut result.alternative_activities,
                    &["Beach walking", "Beachside restaurants", "Spa treatments"],
                );
            }
            if weather.wind_speed > 15.0 {
                push_all(
                    &mut result.recommendations,
                    &["Strong winds may affect water activities"],
                );
            }
        }
        "food tour" | "shopping" => {
            if rainy {
                push_all(&mut result.recommendations, &["Bring an umbrella"]);
            }
        }
        _ => {
            if rainy {
                push_all(&mut result.recommendations, &["Bring rain protection"]);
            }
            if temperature < 15.0 {
                push_all(&mut result.recommendations, &["Dress warmly"]);
            }
            if temperature > 30.0 {
                push_all(
                    &mut result.recommendations,
                    &["Stay hydrated and use sunscreen"],
                );
            }
        }
    }

    result
}

/// General advice for the day: temperature band, condition, then UV.
pub fn recommendations_for(weather: &WeatherData) -> Vec<String> {
    let mut recommendations = Vec::new();

    if weather.temperature < 10.0 {
        push_all(
            &mut recommendations,
            &[
                "Perfect weather for indoor activities like museums and cafes",
                "Consider hot chocolate or warm beverages",
            ],
        );
    } else if weather.temperature > 35.0 {
        push_all(
            &mut recommendations,
            &[
                "Great weather for early morning or evening activities",
                "Consider water activities or air-conditioned venues",
            ],
        );
    } else {
        push_all(
            &mut recommendations,
            &["Ideal weather for outdoor activities and sightseeing"],
        );
    }

    match weather.condition.trim().to_lowercase().as_str() {
        "clear" | "sunny" => push_all(
            &mut recommendations,
            &[
                "Perfect day for outdoor photography",
                "Great weather for walking tours",
            ],
        ),
        "partly cloudy" => push_all(
            &mut recommendations,
            &["Good weather for outdoor activities with some shade"],
        ),
        "cloudy" => push_all(
            &mut recommendations,
            &["Comfortable weather for extended outdoor activities"],
        ),
        "rain" => push_all(
            &mut recommendations,
            &[
                "Consider indoor activities and cultural sites",
                "Perfect weather for cozy cafes and restaurants",
            ],
        ),
        _ => {}
    }

    if weather.uv_index > 6.0 {
        push_all(
            &mut recommendations,
            &["High UV index - use sunscreen and seek shade"],
        );
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(temperature: f64, condition: &str, wind_speed: f64) -> WeatherData {
        WeatherData {
            temperature,
            condition: condition.to_string(),
            wind_speed,
            ..mock_weather("Shimla")
        }
    }

    fn has(list: &[String], needle: &str) -> bool {
        list.iter().any(|s| s.contains(needle))
    }

    #[test]
    fn test_rain_makes_outdoor_unsuitable() {
        let result = analyze_conditions(&weather(22.0, "Light Rain", 5.0), "outdoor");
        assert!(!result.suitable);
        assert!(has(&result.recommendations, "umbrella"));
        assert_eq!(result.alternative_activities.len(), 3);
    }

    #[test]
    fn test_rain_makes_adventure_unsuitable() {
        let result = analyze_conditions(&weather(22.0, "Rain", 5.0), "Hiking");
        assert!(!result.suitable);
        assert!(has(&result.recommendations, "Trails may be slippery"));
    }

    #[test]
    fn test_rain_does_not_disqualify_food_tour() {
        let result = analyze_conditions(&weather(22.0, "rain", 5.0), "food tour");
        assert!(result.suitable);
        assert_eq!(result.recommendations, vec!["Bring an umbrella"]);
    }

    #[test]
    fn test_cold_default_branch_dresses_warmly() {
        let result = analyze_conditions(&weather(5.0, "Clear", 0.0), "museum visit");
        assert!(result.suitable);
        assert!(has(&result.recommendations, "Dress warmly"));
    }

    #[test]
    fn test_hot_outdoor_hydration_and_sunscreen() {
        let result = analyze_conditions(&weather(38.0, "Clear", 0.0), "outdoor");
        assert!(result.suitable);
        assert!(has(&result.recommendations, "Stay hydrated"));
        assert!(has(&result.recommendations, "sunscreen"));
    }

    #[test]
    fn test_checks_are_additive() {
        let result = analyze_conditions(&weather(5.0, "Rain", 0.0), "sightseeing");
        assert!(!result.suitable);
        assert!(has(&result.recommendations, "umbrella"));
        assert!(has(&result.recommendations, "Dress warmly"));
    }

    #[test]
    fn test_cold_water_and_wind_for_beach() {
        let result = analyze_conditions(&weather(18.0, "Clear", 25.0), "beach");
        assert!(!result.suitable);
        assert!(has(&result.recommendations, "too cold"));
        assert!(has(&result.recommendations, "Strong winds"));

        let result = analyze_conditions(&weather(28.0, "Clear", 5.0), "water sports");
        assert!(result.suitable);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_high_wind_for_adventure() {
        let result = analyze_conditions(&weather(22.0, "Clear", 30.0), "adventure");
        assert!(result.suitable);
        assert!(has(&result.alternative_activities, "City tours"));
    }

    #[test]
    fn test_recommendations_for_clear_mild_day() {
        let recommendations = recommendations_for(&mock_weather("Goa"));
        assert_eq!(
            recommendations,
            vec![
                "Ideal weather for outdoor activities and sightseeing",
                "Perfect day for outdoor photography",
                "Great weather for walking tours",
            ]
        );
    }

    #[test]
    fn test_recommendations_condition_is_exact_match() {
        let recommendations = recommendations_for(&weather(5.0, "Light Rain", 0.0));
        assert_eq!(recommendations.len(), 2);

        let recommendations = recommendations_for(&weather(5.0, "RAIN", 0.0));
        assert!(has(&recommendations, "cozy cafes"));
    }

    #[test]
    fn test_high_uv_warning() {
        let mut data = weather(40.0, "Sunny", 0.0);
        data.uv_index = 9.0;
        let recommendations = recommendations_for(&data);
        assert!(has(&recommendations, "early morning"));
        assert!(has(&recommendations, "High UV index"));
    }

    #[test]
    fn test_synthetic_forecast_ranges() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let forecast = synthetic_forecast(today, 5);
        assert_eq!(forecast.len(), 5);
        assert_eq!(forecast[0].date, "2025-02-01");
        assert_eq!(forecast[4].date, "2025-02-05");
        for day in forecast {
            assert!((15.0..25.0).contains(&day.temperature.min));
            assert!((25.0..40.0).contains(&day.temperature.max));
            assert!(day.precipitation < 100);
            assert!(FORECAST_CONDITIONS.contains(&day.condition.as_str()));
        }
    }

    #[test]
    fn test_openweather_conversion() {
        let body: OpenWeatherResponse = serde_json::from_value(serde_json::json!({
            "name": "Mumbai",
            "main": { "temp": 31.2, "humidity": 70 },
            "weather": [{ "main": "Haze", "description": "haze" }],
            "wind": { "speed": 5.0 },
            "visibility": 4000
        }))
        .unwrap();

        let data = body.into_weather("mumbai");
        assert_eq!(data.location, "Mumbai");
        assert_eq!(data.condition, "Haze");
        assert!((data.wind_speed - 18.0).abs() < 1e-9);
        assert_eq!(data.visibility, 4.0);
    }

    #[actix_rt::test]
    async fn test_unconfigured_service_uses_mock() {
        let service = WeatherService::new(None);
        let data = service.forecast("Pune", 3).await;
        assert_eq!(data.temperature, 25.0);
        assert_eq!(data.forecast.len(), 3);
    }
}
