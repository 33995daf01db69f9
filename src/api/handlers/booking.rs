use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{BookingListParams, CancelBookingRequest, ConfirmBookingRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::BookingQuery;
use crate::domain::services::booking_service::ConfirmationRequest;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Entry point of the confirmation workflow. The checkout client relays the
/// gateway's order id, payment id and signature together with the booking
/// payload; everything past this point is sequenced by the booking service.
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<ConfirmBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(order_id = %payload.order_id, "confirm_booking: received payment confirmation");

    let mut guest_details = payload.booking.guest_details;
    // The purchaser on record is always the authenticated requester,
    // whatever the client put in the payload.
    guest_details.user_id = user.id;

    let booking = state
        .booking_service
        .confirm(ConfirmationRequest {
            order_id: payload.order_id,
            payment_id: payload.payment_id,
            signature: payload.signature,
            info_details: payload.booking.info_details,
            booking_details: payload.booking.booking_details,
            guest_details,
            recipients: payload.booking.recipients,
            owner_id: payload.booking.owner_id,
        })
        .await?;

    Ok(Json(booking))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if Uuid::parse_str(&booking_id).is_err() {
        return Err(AppError::Validation("Invalid booking id".to_string()));
    }

    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".to_string()))?;

    if booking.guest_details.user_id != user.id && booking.owner_id != user.id {
        return Err(AppError::Forbidden(
            "Booking belongs to a different guest".to_string(),
        ));
    }

    Ok(Json(booking))
}

/// Customer-facing "my bookings" listing.
pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<BookingListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = BookingQuery {
        user_id: Some(user.id),
        kind: params.kind,
        search: params.search,
        sort_by: params.sort_by,
        sort_order: params.sort_order,
        limit: params.limit,
        skip: params.skip,
        ..Default::default()
    };

    let bookings = state.booking_repo.query(&filter).await?;
    Ok(Json(bookings))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state
        .booking_service
        .cancel(&user.id, &booking_id, &payload.reason)
        .await?;
    Ok(Json(cancelled))
}

pub async fn review_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_service.mark_reviewed(&user.id, &booking_id).await?;
    Ok(Json(json!({ "status": "reviewed" })))
}
