use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_TRIP_DAYS: u32 = 1;
pub const MAX_TRIP_DAYS: u32 = 30;
pub const MIN_GROUP_SIZE: u32 = 1;
pub const MAX_GROUP_SIZE: u32 = 20;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    #[default]
    Budget,
    Luxury,
    Adventure,
    Cultural,
    Wellness,
}

impl TravelStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Budget => "budget",
            TravelStyle::Luxury => "luxury",
            TravelStyle::Adventure => "adventure",
            TravelStyle::Cultural => "cultural",
            TravelStyle::Wellness => "wellness",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    #[default]
    Hotel,
    Hostel,
    Homestay,
    Resort,
}

impl AccommodationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationType::Hotel => "hotel",
            AccommodationType::Hostel => "hostel",
            AccommodationType::Homestay => "homestay",
            AccommodationType::Resort => "resort",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Public,
    Private,
    #[default]
    Mixed,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Public => "public",
            TransportMode::Private => "private",
            TransportMode::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Budget {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub currency: Currency,
}

/// Validated trip constraints. Immutable input to itinerary generation.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripPreferences {
    pub location: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    pub budget: Budget,
    pub group_size: u32,
    pub interests: Vec<String>,
    pub travel_style: TravelStyle,
    pub accommodation_type: AccommodationType,
    pub transportation: TransportMode,
}

#[derive(Debug, Error, PartialEq)]
pub enum PreferencesError {
    #[error("Missing required fields: location, duration, and budget are required")]
    MissingFields,
    #[error("Minimum budget must be less than maximum budget")]
    InvalidBudget,
    #[error("Duration must be between 1 and 30 days")]
    InvalidDuration,
    #[error("Group size must be between 1 and 20 people")]
    InvalidGroupSize,
}

fn default_group_size() -> u32 {
    1
}

/// Wire shape of the `preferences` body. Required fields are optional here so
/// that missing values surface as a validation error instead of a decode error.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesInput {
    pub location: Option<String>,
    pub duration: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub budget: Option<Budget>,
    #[serde(default = "default_group_size")]
    pub group_size: u32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub travel_style: TravelStyle,
    #[serde(default)]
    pub accommodation_type: AccommodationType,
    #[serde(default)]
    pub transportation: TransportMode,
}

impl PreferencesInput {
    pub fn into_preferences(self) -> Result<TripPreferences, PreferencesError> {
        let location = self
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        // duration of 0 counts as missing, matching a falsy check on the wire value
        let (location, duration, budget) = match (location, self.duration, self.budget) {
            (Some(location), Some(duration), Some(budget)) if duration != 0 => {
                (location, duration, budget)
            }
            _ => return Err(PreferencesError::MissingFields),
        };

        if budget.min >= budget.max {
            return Err(PreferencesError::InvalidBudget);
        }

        let duration = u32::try_from(duration)
            .ok()
            .filter(|d| (MIN_TRIP_DAYS..=MAX_TRIP_DAYS).contains(d))
            .ok_or(PreferencesError::InvalidDuration)?;

        if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&self.group_size) {
            return Err(PreferencesError::InvalidGroupSize);
        }

        Ok(TripPreferences {
            location,
            duration,
            start_date: self.start_date,
            budget,
            group_size: self.group_size,
            interests: self.interests,
            travel_style: self.travel_style,
            accommodation_type: self.accommodation_type,
            transportation: self.transportation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> PreferencesInput {
        PreferencesInput {
            location: Some("Jaipur".to_string()),
            duration: Some(3),
            budget: Some(Budget {
                min: 10000.0,
                max: 25000.0,
                currency: Currency::Inr,
            }),
            group_size: 2,
            interests: vec!["heritage".to_string(), "food".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_preferences() {
        let prefs = valid_input().into_preferences().unwrap();
        assert_eq!(prefs.location, "Jaipur");
        assert_eq!(prefs.duration, 3);
        assert_eq!(prefs.transportation, TransportMode::Mixed);
    }

    #[test]
    fn test_missing_location() {
        let mut input = valid_input();
        input.location = Some("   ".to_string());
        assert_eq!(
            input.into_preferences(),
            Err(PreferencesError::MissingFields)
        );
    }

    #[test]
    fn test_budget_min_must_be_below_max() {
        let mut input = valid_input();
        input.budget = Some(Budget {
            min: 5000.0,
            max: 5000.0,
            currency: Currency::Usd,
        });
        assert_eq!(
            input.into_preferences(),
            Err(PreferencesError::InvalidBudget)
        );
    }

    #[test]
    fn test_duration_bounds() {
        let mut input = valid_input();
        input.duration = Some(31);
        assert_eq!(
            input.into_preferences(),
            Err(PreferencesError::InvalidDuration)
        );

        let mut input = valid_input();
        input.duration = Some(-2);
        assert_eq!(
            input.into_preferences(),
            Err(PreferencesError::InvalidDuration)
        );

        let mut input = valid_input();
        input.duration = Some(30);
        assert!(input.into_preferences().is_ok());
    }

    #[test]
    fn test_group_size_bounds() {
        let mut input = valid_input();
        input.group_size = 21;
        assert_eq!(
            input.into_preferences(),
            Err(PreferencesError::InvalidGroupSize)
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let input: PreferencesInput = serde_json::from_value(serde_json::json!({
            "location": "Goa",
            "duration": 4,
            "budget": { "min": 1, "max": 2 },
            "travelStyle": "luxury"
        }))
        .unwrap();

        assert_eq!(input.group_size, 1);
        assert_eq!(input.travel_style, TravelStyle::Luxury);
        assert_eq!(input.budget.unwrap().currency, Currency::Inr);
    }
}
