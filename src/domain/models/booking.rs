use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Discriminator for the three bookable product shapes. Stored as its own
/// column so listings can be filtered without unpacking the JSON snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingKind {
    Property,
    Travelling,
    Trip,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Property => "property",
            BookingKind::Travelling => "travelling",
            BookingKind::Trip => "trip",
        }
    }
}

/// Lifecycle state of a booking. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Succeeded,
    Cancelled,
    Failed,
}

/// Denormalized snapshot of the purchased listing at booking time. Bookings
/// keep rendering correctly even if the listing is later edited or deleted,
/// so none of these fields are ever re-read from the listing store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ListingSnapshot {
    Property(PropertySnapshot),
    Travelling(TravellingSnapshot),
    Trip(TripSnapshot),
}

impl ListingSnapshot {
    pub fn kind(&self) -> BookingKind {
        match self {
            ListingSnapshot::Property(_) => BookingKind::Property,
            ListingSnapshot::Travelling(_) => BookingKind::Travelling,
            ListingSnapshot::Trip(_) => BookingKind::Trip,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ListingSnapshot::Property(s) => &s.title,
            ListingSnapshot::Travelling(s) => &s.title,
            ListingSnapshot::Trip(s) => &s.title,
        }
    }

    pub fn listing_id(&self) -> &str {
        match self {
            ListingSnapshot::Property(s) => &s.id,
            ListingSnapshot::Travelling(s) => &s.id,
            ListingSnapshot::Trip(s) => &s.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub cancellation_policy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravellingSnapshot {
    pub id: String,
    pub title: String,
    pub route: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub duration_days: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSnapshot {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub duration_days: i32,
}

/// One purchased room class within a property booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSelection {
    pub category_id: String,
    pub qty: i32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub provider: String,
    pub order_id: String,
    pub payment_id: String,
    pub status: String,
}

/// Stay details as submitted by the caller. The orchestrator attaches the
/// verified payment record and the computed night count to form the stored
/// `BookingDetails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetailsInput {
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub adults: i32,
    #[serde(default)]
    pub children: i32,
    #[serde(default)]
    pub rooms_detail: Vec<RoomSelection>,
    pub subtotal: f64,
    pub service_fee: f64,
    pub taxes: f64,
    pub total_price: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetails {
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub nights: i64,
    pub adults: i32,
    pub children: i32,
    #[serde(default)]
    pub rooms_detail: Vec<RoomSelection>,
    pub subtotal: f64,
    pub service_fee: f64,
    pub taxes: f64,
    pub total_price: f64,
    pub currency: String,
    pub payment: PaymentRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestDetails {
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub kind: BookingKind,
    pub info_details: Json<ListingSnapshot>,
    pub booking_details: Json<BookingDetails>,
    pub guest_details: Json<GuestDetails>,
    pub recipients: Json<Vec<String>>,
    pub status: BookingStatus,
    pub owner_id: String,
    pub is_reviewed: bool,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub info_details: ListingSnapshot,
    pub booking_details: BookingDetailsInput,
    pub guest_details: GuestDetails,
    pub recipients: Vec<String>,
    pub owner_id: String,
    pub payment: PaymentRecord,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let input = params.booking_details;
        let nights = (input.check_out.date_naive() - input.check_in.date_naive()).num_days();
        let now = Utc::now();

        let details = BookingDetails {
            check_in: input.check_in,
            check_out: input.check_out,
            nights,
            adults: input.adults,
            children: input.children,
            rooms_detail: input.rooms_detail,
            subtotal: input.subtotal,
            service_fee: input.service_fee,
            taxes: input.taxes,
            total_price: input.total_price,
            currency: input.currency,
            payment: params.payment,
        };

        Self {
            id: Uuid::new_v4().to_string(),
            kind: params.info_details.kind(),
            info_details: Json(params.info_details),
            booking_details: Json(details),
            guest_details: Json(params.guest_details),
            recipients: Json(params.recipients),
            status: BookingStatus::Succeeded,
            owner_id: params.owner_id,
            is_reviewed: false,
            cancel_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Whitelisted sort columns for booking listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CheckIn,
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CheckIn => "check_in",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter shared by the paginated booking listing and the matching count,
/// so a dashboard page and its total can never disagree.
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    pub user_id: Option<String>,
    pub owner_id: Option<String>,
    pub kind: Option<BookingKind>,
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}
