use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub temperature: TemperatureRange,
    pub condition: String,
    pub description: String,
    /// Chance of precipitation, percent.
    pub precipitation: u8,
}

/// Read-only snapshot for a single query. Temperature in °C, wind in km/h.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub location: String,
    pub temperature: f64,
    pub condition: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub humidity: f64,
    pub wind_speed: f64,
    #[serde(default)]
    pub visibility: f64,
    #[serde(default)]
    pub uv_index: f64,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeatherConditions {
    pub suitable: bool,
    pub recommendations: Vec<String>,
    pub alternative_activities: Vec<String>,
}
