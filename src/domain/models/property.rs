use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn new(owner_id: String, title: String, location: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            title,
            location,
            created_at: Utc::now(),
        }
    }
}

/// A bookable room class within a property. `qty` is the number of physical
/// rooms of this class; sold-out calendar dates live in their own table with
/// a `(category_id, date)` primary key, which is what gives
/// `unavailable_dates` its set semantics.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RoomCategory {
    pub id: String,
    pub property_id: String,
    pub title: String,
    pub qty: i32,
    pub created_at: DateTime<Utc>,
}

impl RoomCategory {
    pub fn new(property_id: String, title: String, qty: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            property_id,
            title,
            qty,
            created_at: Utc::now(),
        }
    }
}
