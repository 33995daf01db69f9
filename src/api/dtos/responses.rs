use serde::Serialize;

#[derive(Serialize)]
pub struct BookingCountResponse {
    pub count: i64,
}
