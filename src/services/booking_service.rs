use chrono::{DateTime, Duration, NaiveTime, Utc};
use thiserror::Error;

use crate::models::booking::{
    BookingData, BookingStatus, CancellationPolicy, CustomerInfo, InventoryItem, InventoryType,
    PaymentInfo, PaymentMethod, PaymentStatus,
};
use crate::models::itinerary::Itinerary;
use crate::services::ids::{now_millis, random_base36, to_base36};

const CANCELLATION_WINDOW_HOURS: i64 = 24;
const BOOKING_CURRENCY: &str = "INR";

#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("Cancellation not allowed for this booking")]
    CancellationNotAllowed,
    #[error("Cancellation deadline has passed")]
    DeadlinePassed,
    #[error("Cannot change booking status from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// `BK<millis><5 uppercase base36>`
pub fn generate_booking_id() -> String {
    format!("BK{}{}", now_millis(), random_base36(5).to_uppercase())
}

/// `CONF-<base36 millis>-<4 base36>`, all uppercase.
pub fn generate_confirmation_number() -> String {
    format!(
        "CONF-{}-{}",
        to_base36(now_millis()).to_uppercase(),
        random_base36(4).to_uppercase()
    )
}

impl CancellationPolicy {
    /// Fully refundable for 24 hours from `now`.
    pub fn standard(now: DateTime<Utc>) -> Self {
        Self {
            can_cancel: true,
            cancellation_deadline: now + Duration::hours(CANCELLATION_WINDOW_HOURS),
            refund_percentage: 100.0,
        }
    }

    pub fn refund_amount(&self, total: f64, now: DateTime<Utc>) -> Result<f64, BookingError> {
        if !self.can_cancel {
            return Err(BookingError::CancellationNotAllowed);
        }
        if now > self.cancellation_deadline {
            return Err(BookingError::DeadlinePassed);
        }

        Ok(total * self.refund_percentage / 100.0)
    }
}

impl BookingData {
    /// A pending booking for `itinerary`, charged at its actual cost.
    pub fn draft(
        itinerary: &Itinerary,
        customer_info: CustomerInfo,
        method: PaymentMethod,
        payment_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let total_amount = itinerary.actual_cost;

        Self {
            id: generate_booking_id(),
            itinerary_id: itinerary.id.clone(),
            customer_info,
            payment_info: PaymentInfo {
                method,
                payment_id: payment_id.into(),
                amount: total_amount,
                currency: BOOKING_CURRENCY.to_string(),
                status: PaymentStatus::Pending,
            },
            status: BookingStatus::Pending,
            booking_date: now,
            travel_date: itinerary.start_date.and_time(NaiveTime::MIN).and_utc(),
            total_amount,
            confirmation_number: generate_confirmation_number(),
            e_ticket_url: None,
            cancellation_policy: CancellationPolicy::standard(now),
        }
    }

    pub fn transition(&mut self, next: BookingStatus) -> Result<(), BookingError> {
        if !self.status.can_transition_to(next) {
            return Err(BookingError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        log::info!(
            "Booking {} status {} -> {}",
            self.id,
            self.status.as_str(),
            next.as_str()
        );
        self.status = next;
        Ok(())
    }

    /// Cancels the booking and returns the refund owed under its policy.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<f64, BookingError> {
        if !self.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(BookingError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: BookingStatus::Cancelled.as_str().to_string(),
            });
        }

        let refund = self
            .cancellation_policy
            .refund_amount(self.total_amount, now)?;
        self.transition(BookingStatus::Cancelled)?;
        Ok(refund)
    }
}

fn inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem {
            id: "emt_1".to_string(),
            kind: InventoryType::Hotel,
            name: "Grand Hotel".to_string(),
            description: "Luxury hotel in city center".to_string(),
            price: 5000.0,
            availability: true,
            booking_url: Some("https://example.com/book/grand-hotel".to_string()),
            provider: "EMT Hotels".to_string(),
        },
        InventoryItem {
            id: "emt_2".to_string(),
            kind: InventoryType::Activity,
            name: "City Tour".to_string(),
            description: "Guided city tour with local expert".to_string(),
            price: 1500.0,
            availability: true,
            booking_url: Some("https://example.com/book/city-tour".to_string()),
            provider: "EMT Activities".to_string(),
        },
    ]
}

/// Mock inventory filtered by item type. Location and date do not narrow it.
pub fn search_inventory(location: &str, kind: InventoryType, date: &str) -> Vec<InventoryItem> {
    log::debug!("Searching inventory for {} on {}", location, date);

    inventory()
        .into_iter()
        .filter(|item| item.kind == kind)
        .collect()
}
