use crate::config::Config;
use crate::domain::ports::{BookingRepository, NotificationService, PropertyRepository};
use crate::domain::services::booking_service::BookingService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub notifier: Arc<dyn NotificationService>,
    pub booking_service: Arc<BookingService>,
}
