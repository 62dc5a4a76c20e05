pub mod booking_service;
pub mod events_service;
pub mod i18n_service;
pub mod ids;
pub mod itinerary_service;
pub mod maps_service;
pub mod response_parser;
pub mod vertex_ai_service;
pub mod weather_service;
