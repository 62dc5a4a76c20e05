use chrono::{Duration, NaiveDate, Utc};

use crate::models::event::{
    EventCategory, EventLocation, EventPrice, EventSearchParams, LocalEvent, PriceRange,
};
use crate::models::itinerary::GeoPoint;

/// Days after the reference date that `event_by_id` looks through.
const LOOKUP_WINDOW_DAYS: i64 = 30;

/// Local events over a fixed catalog whose dates are relative to a reference
/// day, so "upcoming" stays upcoming. Without a pinned date the reference is
/// today at call time.
#[derive(Debug, Clone, Default)]
pub struct EventsService {
    pinned_date: Option<NaiveDate>,
}

impl EventsService {
    pub fn new() -> Self {
        Self { pinned_date: None }
    }

    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            pinned_date: Some(reference_date),
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.pinned_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    fn catalog(&self) -> Vec<LocalEvent> {
        let today = self.reference_date();
        let day = |offset: i64| today + Duration::days(offset);

        vec![
            LocalEvent {
                id: "event_1".to_string(),
                name: "Cultural Heritage Festival".to_string(),
                description: "Celebrate local culture with traditional music, dance, and food"
                    .to_string(),
                date: day(2),
                start_time: "10:00".to_string(),
                end_time: "18:00".to_string(),
                location: EventLocation {
                    name: "City Center Plaza".to_string(),
                    address: "123 Main Street, City Center".to_string(),
                    coordinates: GeoPoint::new(28.6139, 77.2090),
                },
                category: EventCategory::Cultural,
                price: EventPrice {
                    min: 0.0,
                    max: 500.0,
                    currency: "INR".to_string(),
                },
                capacity: Some(1000),
                organizer: "City Cultural Society".to_string(),
                website: Some("https://example.com/heritage-festival".to_string()),
                image_url: None,
                tags: tags(&["culture", "heritage", "music", "dance", "food"]),
            },
            LocalEvent {
                id: "event_2".to_string(),
                name: "Food & Wine Tasting".to_string(),
                description: "Sample local cuisine and wines from regional producers".to_string(),
                date: day(3),
                start_time: "19:00".to_string(),
                end_time: "22:00".to_string(),
                location: EventLocation {
                    name: "Grand Hotel Ballroom".to_string(),
                    address: "456 Hotel Street, Downtown".to_string(),
                    coordinates: GeoPoint::new(28.6140, 77.2091),
                },
                category: EventCategory::Food,
                price: EventPrice {
                    min: 1500.0,
                    max: 2500.0,
                    currency: "INR".to_string(),
                },
                capacity: Some(100),
                organizer: "Local Restaurant Association".to_string(),
                website: None,
                image_url: None,
                tags: tags(&["food", "wine", "tasting", "gourmet"]),
            },
            LocalEvent {
                id: "event_3".to_string(),
                name: "Art Exhibition Opening".to_string(),
                description: "Contemporary art exhibition featuring local artists".to_string(),
                date: day(1),
                start_time: "18:00".to_string(),
                end_time: "21:00".to_string(),
                location: EventLocation {
                    name: "Modern Art Gallery".to_string(),
                    address: "789 Art District, Cultural Quarter".to_string(),
                    coordinates: GeoPoint::new(28.6141, 77.2092),
                },
                category: EventCategory::Exhibition,
                price: EventPrice {
                    min: 0.0,
                    max: 0.0,
                    currency: "INR".to_string(),
                },
                capacity: Some(200),
                organizer: "Modern Art Gallery".to_string(),
                website: None,
                image_url: None,
                tags: tags(&["art", "exhibition", "contemporary", "culture"]),
            },
        ]
    }

    /// Catalog events inside the inclusive date range, narrowed by category and
    /// price range when given. Location and radius do not filter.
    pub fn search(&self, params: &EventSearchParams) -> Vec<LocalEvent> {
        log::debug!(
            "Searching events in {} from {} to {}",
            params.location,
            params.start_date,
            params.end_date
        );

        self.catalog()
            .into_iter()
            .filter(|event| event.date >= params.start_date && event.date <= params.end_date)
            .filter(|event| params.category.map_or(true, |c| event.category == c))
            .filter(|event| {
                params
                    .price_range
                    .map_or(true, |range| within_price(&event.price, range))
            })
            .collect()
    }

    pub fn events_for_date(&self, location: &str, date: NaiveDate) -> Vec<LocalEvent> {
        self.search(&EventSearchParams::new(location, date, date))
    }

    pub fn events_by_category(
        &self,
        location: &str,
        category: EventCategory,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Vec<LocalEvent> {
        let mut params = EventSearchParams::new(location, start_date, end_date);
        params.category = Some(category);
        self.search(&params)
    }

    pub fn free_events(
        &self,
        location: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Vec<LocalEvent> {
        let mut params = EventSearchParams::new(location, start_date, end_date);
        params.price_range = Some(PriceRange { min: 0.0, max: 0.0 });
        self.search(&params)
    }

    pub fn event_by_id(&self, id: &str) -> Option<LocalEvent> {
        let today = self.reference_date();
        let params =
            EventSearchParams::new("", today, today + Duration::days(LOOKUP_WINDOW_DAYS));
        self.search(&params).into_iter().find(|event| event.id == id)
    }

    pub fn recommendations(
        &self,
        location: &str,
        interests: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Vec<LocalEvent> {
        let events = self.search(&EventSearchParams::new(location, start_date, end_date));
        recommend(events, interests)
    }
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn within_price(price: &EventPrice, range: PriceRange) -> bool {
    price.min >= range.min && price.max <= range.max
}

fn relevance(event: &LocalEvent, interests: &[String]) -> u32 {
    interests
        .iter()
        .map(|interest| interest.trim().to_lowercase())
        .filter(|interest| !interest.is_empty())
        .map(|interest| {
            let mut score = 0;
            if event.tags.iter().any(|tag| tag.to_lowercase() == interest) {
                score += 1;
            }
            if event.category.as_str() == interest {
                score += 2;
            }
            score
        })
        .sum()
}

/// Events scored against `interests`, most relevant first. Unscored events are
/// dropped; equal scores keep their input order.
pub fn recommend(events: Vec<LocalEvent>, interests: &[String]) -> Vec<LocalEvent> {
    let mut scored: Vec<(u32, LocalEvent)> = events
        .into_iter()
        .map(|event| (relevance(&event, interests), event))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, event)| event).collect()
}
