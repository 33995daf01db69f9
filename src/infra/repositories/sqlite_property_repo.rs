use crate::domain::{
    models::property::{Property, RoomCategory},
    ports::PropertyRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::warn;

pub struct SqlitePropertyRepo {
    pool: SqlitePool,
}

impl SqlitePropertyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for SqlitePropertyRepo {
    async fn create(&self, property: &Property) -> Result<Property, AppError> {
        sqlx::query_as::<_, Property>(
            "INSERT INTO properties (id, owner_id, title, location, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&property.id)
        .bind(&property.owner_id)
        .bind(&property.title)
        .bind(&property.location)
        .bind(property.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, AppError> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn add_category(&self, category: &RoomCategory) -> Result<RoomCategory, AppError> {
        sqlx::query_as::<_, RoomCategory>(
            "INSERT INTO room_categories (id, property_id, title, qty, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&category.id)
        .bind(&category.property_id)
        .bind(&category.title)
        .bind(category.qty)
        .bind(category.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn block_dates(
        &self,
        property_id: &str,
        category_ids: &[String],
        dates: &[NaiveDate],
    ) -> Result<(), AppError> {
        if category_ids.is_empty() || dates.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Only categories that actually belong to the property count; a
        // stale or foreign reference must not fail an already-paid booking.
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id FROM room_categories WHERE property_id = ");
        qb.push_bind(property_id).push(" AND id IN (");
        let mut separated = qb.separated(", ");
        for id in category_ids {
            separated.push_bind(id.clone());
        }
        qb.push(")");

        let resolved: Vec<String> = qb
            .build_query_scalar()
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for id in category_ids {
            if !resolved.contains(id) {
                warn!(
                    property_id = %property_id,
                    category_id = %id,
                    "skipping room category not present on property"
                );
            }
        }

        if resolved.is_empty() {
            tx.commit().await.map_err(AppError::Database)?;
            return Ok(());
        }

        // INSERT OR IGNORE against the (category_id, date) primary key is
        // the set-union write: re-adding a blocked date is a no-op, and two
        // concurrent bookings for overlapping dates both land their rows.
        let mut insert: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT OR IGNORE INTO room_unavailable_dates (category_id, date) ");
        insert.push_values(
            resolved.iter().flat_map(|id| dates.iter().map(move |d| (id.clone(), *d))),
            |mut row, (category_id, date)| {
                row.push_bind(category_id).push_bind(date);
            },
        );
        insert
            .build()
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)
    }

    async fn unavailable_dates(&self, category_id: &str) -> Result<Vec<NaiveDate>, AppError> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT date FROM room_unavailable_dates WHERE category_id = ? ORDER BY date",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
