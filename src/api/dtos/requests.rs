use crate::domain::models::booking::{
    BookingDetailsInput, BookingKind, GuestDetails, ListingSnapshot, SortField, SortOrder,
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ConfirmBookingRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub booking: BookingPayload,
}

#[derive(Deserialize)]
pub struct BookingPayload {
    pub info_details: ListingSnapshot,
    pub booking_details: BookingDetailsInput,
    pub guest_details: GuestDetails,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub owner_id: String,
}

#[derive(Deserialize, Default)]
pub struct BookingListParams {
    #[serde(rename = "type")]
    pub kind: Option<BookingKind>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

#[derive(Deserialize)]
pub struct CancelBookingRequest {
    #[serde(default)]
    pub reason: String,
}
