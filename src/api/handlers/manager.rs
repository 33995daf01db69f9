use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::BookingListParams;
use crate::api::dtos::responses::BookingCountResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::BookingQuery;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

fn require_manager(user: &AuthUser) -> Result<(), AppError> {
    if user.role == "manager" || user.role == "admin" {
        Ok(())
    } else {
        Err(AppError::Forbidden("Manager access required".to_string()))
    }
}

fn owner_filter(user: &AuthUser, params: BookingListParams) -> BookingQuery {
    BookingQuery {
        owner_id: Some(user.id.clone()),
        kind: params.kind,
        search: params.search,
        sort_by: params.sort_by,
        sort_order: params.sort_order,
        limit: params.limit,
        skip: params.skip,
        ..Default::default()
    }
}

/// Manager dashboard listing, scoped to listings the requester owns.
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<BookingListParams>,
) -> Result<impl IntoResponse, AppError> {
    require_manager(&user)?;
    let filter = owner_filter(&user, params);
    let bookings = state.booking_repo.query(&filter).await?;
    Ok(Json(bookings))
}

/// Total matching the listing above under the identical predicate, used by
/// the dashboard to compute page counts.
pub async fn count_owner_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<BookingListParams>,
) -> Result<impl IntoResponse, AppError> {
    require_manager(&user)?;
    let filter = owner_filter(&user, params);
    let count = state.booking_repo.count(&filter).await?;
    Ok(Json(BookingCountResponse { count }))
}
