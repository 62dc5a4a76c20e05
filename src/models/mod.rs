pub mod booking;
pub mod event;
pub mod itinerary;
pub mod place;
pub mod preferences;
pub mod weather;
