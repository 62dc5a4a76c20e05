use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    models::{
        booking::{BookingData, CustomerInfo, InventoryItem, InventoryType, PaymentMethod},
        itinerary::Itinerary,
    },
    services::booking_service::search_inventory,
};

#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<InventoryType>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub itinerary: Itinerary,
    pub customer_info: CustomerInfo,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CancellationRequest {
    pub booking: BookingData,
}

#[derive(Serialize)]
struct InventoryResponse {
    success: bool,
    items: Vec<InventoryItem>,
}

#[derive(Serialize)]
struct BookingResponse {
    success: bool,
    booking: BookingData,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CancellationResponse {
    success: bool,
    refund_amount: f64,
    booking: BookingData,
}

/*
    /api/inventory?location=&type=&date=
*/
pub async fn inventory(query: web::Query<InventoryQuery>) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let kind = query
        .kind
        .ok_or_else(|| ApiError::bad_request("Inventory type is required"))?;

    let items = search_inventory(
        query.location.as_deref().unwrap_or_default(),
        kind,
        query.date.as_deref().unwrap_or_default(),
    );
    Ok(HttpResponse::Ok().json(InventoryResponse {
        success: true,
        items,
    }))
}

/*
    /api/bookings/draft
*/
pub async fn draft(body: web::Json<DraftRequest>) -> Result<HttpResponse, ApiError> {
    let DraftRequest {
        itinerary,
        customer_info,
        payment_method,
        payment_id,
    } = body.into_inner();

    let booking = BookingData::draft(
        &itinerary,
        customer_info,
        payment_method,
        payment_id,
        Utc::now(),
    );
    log::info!(
        "Drafted booking {} for itinerary {}",
        booking.id,
        booking.itinerary_id
    );

    Ok(HttpResponse::Ok().json(BookingResponse {
        success: true,
        booking,
    }))
}

/*
    /api/bookings/cancellation
*/
pub async fn cancellation(
    body: web::Json<CancellationRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut booking = body.into_inner().booking;

    let refund_amount = booking
        .cancel(Utc::now())
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok(HttpResponse::Ok().json(CancellationResponse {
        success: true,
        refund_amount,
        booking,
    }))
}
