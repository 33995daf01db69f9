use crate::domain::models::{
    booking::{Booking, BookingQuery},
    property::{Property, RoomCategory},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn query(&self, filter: &BookingQuery) -> Result<Vec<Booking>, AppError>;
    async fn count(&self, filter: &BookingQuery) -> Result<i64, AppError>;
    /// Conditional cancel: only flips a booking that is not already in a
    /// terminal state. Returns the updated row, or `None` when nothing was
    /// modified (absent id, or a concurrent cancel won the race).
    async fn cancel(&self, id: &str, reason: &str) -> Result<Option<Booking>, AppError>;
    /// Single-shot review flag. Returns false when the booking is absent or
    /// was already marked reviewed.
    async fn mark_reviewed(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &Property) -> Result<Property, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, AppError>;
    async fn add_category(&self, category: &RoomCategory) -> Result<RoomCategory, AppError>;
    /// Marks `dates` as sold out for each of `category_ids` that belongs to
    /// the property, in one transaction. Dates already present and category
    /// ids that do not resolve are skipped, never errors.
    async fn block_dates(
        &self,
        property_id: &str,
        category_ids: &[String],
        dates: &[NaiveDate],
    ) -> Result<(), AppError>;
    async fn unavailable_dates(&self, category_id: &str) -> Result<Vec<NaiveDate>, AppError>;
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Sends the confirmation mail for a booking to its recipient list.
    /// Failures are reported as values; the confirmation workflow absorbs
    /// them once the booking is persisted.
    async fn send_confirmation(&self, booking: &Booking) -> Result<(), AppError>;
}
