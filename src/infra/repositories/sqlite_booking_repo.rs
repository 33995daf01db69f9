use crate::domain::{
    models::booking::{Booking, BookingQuery},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// One predicate builder for both the paginated listing and its count, so
/// the two can never drift apart.
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &BookingQuery) {
    qb.push(" WHERE 1 = 1");
    if let Some(user_id) = &filter.user_id {
        qb.push(" AND guest_user_id = ").push_bind(user_id.clone());
    }
    if let Some(owner_id) = &filter.owner_id {
        qb.push(" AND owner_id = ").push_bind(owner_id.clone());
    }
    if let Some(kind) = filter.kind {
        qb.push(" AND kind = ").push_bind(kind);
    }
    if let Some(term) = &filter.search {
        let pattern = format!("%{}%", term);
        qb.push(" AND (title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR guest_name LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, kind, title, guest_name, guest_user_id, owner_id, status, is_reviewed, cancel_reason,
                                   check_in, check_out, info_details, booking_details, guest_details, recipients, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(booking.kind)
        .bind(booking.info_details.title())
        .bind(&booking.guest_details.name)
        .bind(&booking.guest_details.user_id)
        .bind(&booking.owner_id)
        .bind(booking.status)
        .bind(booking.is_reviewed)
        .bind(&booking.cancel_reason)
        .bind(booking.booking_details.check_in)
        .bind(booking.booking_details.check_out)
        .bind(&booking.info_details)
        .bind(&booking.booking_details)
        .bind(&booking.guest_details)
        .bind(&booking.recipients)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn query(&self, filter: &BookingQuery) -> Result<Vec<Booking>, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM bookings");
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY ")
            .push(filter.sort_by.column())
            .push(" ")
            .push(filter.sort_order.keyword());

        match (filter.limit, filter.skip) {
            (Some(limit), Some(skip)) => {
                qb.push(" LIMIT ").push_bind(limit).push(" OFFSET ").push_bind(skip);
            }
            (Some(limit), None) => {
                qb.push(" LIMIT ").push_bind(limit);
            }
            // SQLite only accepts OFFSET after a LIMIT clause.
            (None, Some(skip)) => {
                qb.push(" LIMIT -1 OFFSET ").push_bind(skip);
            }
            (None, None) => {}
        }

        qb.build_query_as::<Booking>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count(&self, filter: &BookingQuery) -> Result<i64, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM bookings");
        push_filters(&mut qb, filter);
        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn cancel(&self, id: &str, reason: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', cancel_reason = ?, updated_at = ?
             WHERE id = ? AND status != 'cancelled'
             RETURNING *",
        )
        .bind(reason)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn mark_reviewed(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET is_reviewed = 1, updated_at = ? WHERE id = ? AND is_reviewed = 0",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
