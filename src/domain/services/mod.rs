pub mod booking_service;
pub mod calendar;
pub mod payment;
